use handreco::{one_hot, ActivationFunction, FixedNetwork, Network, NetworkConfig, NeuronLayer};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn pair<const I: usize, const H: usize, const O: usize, const R: u32>(
    activation: ActivationFunction,
    seed: u64,
) -> (Network, FixedNetwork<I, H, O, R>) {
    let config = NetworkConfig::new(vec![I, H, O])
        .activation(activation)
        .learning_rate(FixedNetwork::<I, H, O, R>::LEARNING_RATE);
    let dynamic = Network::with_rng(&config, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
    let fixed = FixedNetwork::with_rng(activation, &mut ChaCha8Rng::seed_from_u64(seed));
    (dynamic, fixed)
}

fn assert_same_parameters<const I: usize, const H: usize, const O: usize, const R: u32>(
    dynamic: &Network,
    fixed: &FixedNetwork<I, H, O, R>,
) {
    let layers = dynamic.layers();
    let pairs: [(&[handreco::Neuron], Vec<(&[f64], f64)>); 2] = [
        (
            layers[1].neurons(),
            fixed.hidden_layer().neurons().iter().map(|n| (n.weights(), n.bias)).collect(),
        ),
        (
            layers[2].neurons(),
            fixed.output_layer().neurons().iter().map(|n| (n.weights(), n.bias)).collect(),
        ),
    ];
    for (runtime, expected) in pairs {
        assert_eq!(runtime.len(), expected.len());
        for (a, (weights, bias)) in runtime.iter().zip(expected) {
            assert_eq!(a.weights(), weights);
            assert_eq!(a.bias, bias);
        }
    }
}

#[test]
fn same_seed_same_starting_point() {
    let (dynamic, fixed) = pair::<4, 3, 2, 3000>(ActivationFunction::Sigmoid, 1);
    assert_eq!(dynamic.architecture(), fixed.architecture().to_vec());
    assert_same_parameters(&dynamic, &fixed);
}

#[test]
fn trajectories_match_step_for_step() {
    for activation in [
        ActivationFunction::Identity,
        ActivationFunction::Sigmoid,
        ActivationFunction::ReLU,
        ActivationFunction::leaky_relu(),
    ] {
        let (mut dynamic, mut fixed) = pair::<4, 3, 2, 250>(activation, 42);
        let samples = [
            ([0.0, 1.0, 0.0, 1.0], 0),
            ([1.0, 0.0, 1.0, 0.0], 1),
            ([0.5, 0.5, 0.2, 0.9], 1),
        ];

        for step in 0..60 {
            let (input, label) = samples[step % samples.len()];
            let expected = one_hot(label, 2).unwrap();
            dynamic.learn_once(&input, &expected).unwrap();
            fixed.learn_once(&input, &expected).unwrap();

            let a = dynamic.feed_forward(&input).unwrap();
            let b = fixed.feed_forward(&input).unwrap();
            assert_eq!(a, b.to_vec(), "{:?} diverged at step {}", activation, step);
        }
        assert_same_parameters(&dynamic, &fixed);
    }
}

#[test]
fn fixed_network_learns_one_sample() {
    let mut n: FixedNetwork<4, 2, 2, 3000> = FixedNetwork::new(ActivationFunction::Sigmoid);
    let input = [0.0, 1.0, 0.0, 1.0];
    for _ in 0..10 {
        n.learn_once_array(&input, &[1.0, 1.0]);
    }
    let out = n.feed_forward_array(&input);
    assert!(out.iter().all(|o| *o > 0.8), "got {:?}", out);
}

#[test]
fn fixed_network_error_is_rms() {
    let mut n: FixedNetwork<2, 2, 2, 100> = FixedNetwork::new(ActivationFunction::Sigmoid);
    let out = n.feed_forward(&[0.3, 0.6]).unwrap();
    assert_eq!(n.error(&[0.3, 0.6], &out).unwrap(), 0.0);
    assert!(n.error(&[0.3, 0.6], &[0.0]).is_err());
}
