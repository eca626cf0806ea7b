use handreco::{ActivationFunction, Network, NetworkConfig};

fn main() -> handreco::Result<()> {
    tracing_subscriber::fmt::init();

    let mut network = Network::new(
        &NetworkConfig::new(vec![2, 3, 1])
            .activation(ActivationFunction::Sigmoid)
            .learning_rate(0.5),
    )?;

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];

    let epochs = 20000;

    for epoch in 0..epochs {
        let mut error = 0.0;
        for (input, expected) in inputs.iter().zip(expected_outputs.iter()) {
            network.learn_once(input, expected)?;
            error += network.error(input, expected)?;
        }
        if epoch % 2000 == 0 {
            println!("Epoch {epoch}: rms error = {:.6}", error / inputs.len() as f64);
        }
    }

    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input, network.feed_forward(input)?[0]);
    }
    Ok(())
}
