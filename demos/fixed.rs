//! Trains a runtime-shaped and a compile-time-shaped network side by side from
//! the same seed and shows that they stay in lockstep.

use handreco::{one_hot_array, ActivationFunction, FixedNetwork, Network, NetworkConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

type Fixed = FixedNetwork<4, 3, 2, 3000>;

fn main() -> handreco::Result<()> {
    tracing_subscriber::fmt::init();

    let config = NetworkConfig::new(vec![4, 3, 2])
        .activation(ActivationFunction::Sigmoid)
        .learning_rate(Fixed::LEARNING_RATE);
    let mut dynamic = Network::with_rng(&config, &mut StdRng::seed_from_u64(2024))?;
    let mut fixed = Fixed::with_rng(ActivationFunction::Sigmoid, &mut StdRng::seed_from_u64(2024));

    let samples = [([0.0, 1.0, 0.0, 1.0], 0), ([1.0, 0.0, 1.0, 0.0], 1)];
    for step in 0..20 {
        let (input, label) = samples[step % samples.len()];
        let expected = one_hot_array::<2>(label)?;
        dynamic.learn_once(&input, &expected)?;
        fixed.learn_once_array(&input, &expected);

        let a = dynamic.feed_forward(&input)?;
        let b = fixed.feed_forward_array(&input);
        println!("step {step:2}: runtime {:?} fixed {:?} identical={}", a, b, a[..] == b[..]);
    }
    Ok(())
}
