use rand::Rng;

use crate::activation::ActivationFunction;
use crate::error::{check_len, Result};
use crate::layers::FixedLayer;
use crate::math::GaussianInit;
use crate::network::propagation;
use crate::optim::Sgd;

/// Input → hidden → output network with every size known at compile time.
///
/// Parameters live in fixed-size arrays, so nothing is allocated after
/// construction.  Updates are always immediate, with a learning rate of
/// `RATE_PERMILLE / 1000`.  Given the same seed, activation and training
/// sequence it follows the exact trajectory of a runtime
/// [`Network`](crate::network::Network) built as `[INPUTS, HIDDEN, OUTPUTS]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedNetwork<const INPUTS: usize, const HIDDEN: usize, const OUTPUTS: usize, const RATE_PERMILLE: u32> {
    input: FixedLayer<INPUTS, 0>,
    hidden: FixedLayer<HIDDEN, INPUTS>,
    output: FixedLayer<OUTPUTS, HIDDEN>,
    activation: ActivationFunction,
}

impl<const INPUTS: usize, const HIDDEN: usize, const OUTPUTS: usize, const RATE_PERMILLE: u32>
    FixedNetwork<INPUTS, HIDDEN, OUTPUTS, RATE_PERMILLE>
{
    pub const LEARNING_RATE: f64 = RATE_PERMILLE as f64 / 1000.0;

    const SHAPE_OK: () = assert!(
        INPUTS > 0 && HIDDEN > 0 && OUTPUTS > 0 && RATE_PERMILLE > 0,
        "every layer needs a neuron and the learning rate must be positive"
    );

    pub fn new(activation: ActivationFunction) -> Self {
        Self::with_rng(activation, &mut rand::thread_rng())
    }

    /// Draws parameters from `rng` in the same order as `Network::with_rng`.
    pub fn with_rng<R: Rng + ?Sized>(activation: ActivationFunction, rng: &mut R) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::SHAPE_OK;

        let init = GaussianInit::new();
        let input = FixedLayer::random(&init, &mut *rng);
        let hidden = FixedLayer::random(&init, &mut *rng);
        let output = FixedLayer::random(&init, &mut *rng);
        FixedNetwork { input, hidden, output, activation }
    }

    pub fn architecture(&self) -> [usize; 3] {
        [INPUTS, HIDDEN, OUTPUTS]
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    pub fn input_layer(&self) -> &FixedLayer<INPUTS, 0> {
        &self.input
    }

    pub fn hidden_layer(&self) -> &FixedLayer<HIDDEN, INPUTS> {
        &self.hidden
    }

    pub fn hidden_layer_mut(&mut self) -> &mut FixedLayer<HIDDEN, INPUTS> {
        &mut self.hidden
    }

    pub fn output_layer(&self) -> &FixedLayer<OUTPUTS, HIDDEN> {
        &self.output
    }

    pub fn output_layer_mut(&mut self) -> &mut FixedLayer<OUTPUTS, HIDDEN> {
        &mut self.output
    }

    /// Forward pass over a slice; fails unless it holds exactly `INPUTS` values.
    pub fn feed_forward(&mut self, input: &[f64]) -> Result<[f64; OUTPUTS]> {
        check_len("input", INPUTS, input.len())?;
        self.propagate(input);
        Ok(self.output.activation_array())
    }

    /// Forward pass over an array; the length is checked by the compiler.
    pub fn feed_forward_array(&mut self, input: &[f64; INPUTS]) -> [f64; OUTPUTS] {
        self.propagate(input);
        self.output.activation_array()
    }

    pub fn learn_once(&mut self, input: &[f64], expected: &[f64]) -> Result<()> {
        check_len("input", INPUTS, input.len())?;
        check_len("expected output", OUTPUTS, expected.len())?;
        self.learn(input, expected);
        Ok(())
    }

    pub fn learn_once_array(&mut self, input: &[f64; INPUTS], expected: &[f64; OUTPUTS]) {
        self.learn(input, expected);
    }

    /// Root-mean-square error between the output for `input` and `expected`.
    pub fn error(&mut self, input: &[f64], expected: &[f64]) -> Result<f64> {
        check_len("expected output", OUTPUTS, expected.len())?;
        let output = self.feed_forward(input)?;
        Ok(crate::loss::SquaredError::root_mean_square(&output, expected))
    }

    fn propagate(&mut self, input: &[f64]) {
        propagation::load_input(&mut self.input, input);
        propagation::feed_layer(&self.input, &mut self.hidden, self.activation);
        propagation::feed_layer(&self.hidden, &mut self.output, self.activation);
    }

    fn learn(&mut self, input: &[f64], expected: &[f64]) {
        self.propagate(input);

        propagation::clear_errors(&mut self.hidden);
        propagation::clear_errors(&mut self.output);
        propagation::output_errors(&mut self.output, expected, self.activation);
        propagation::hidden_errors(&mut self.hidden, &self.output, self.activation);

        let sgd = Sgd::new(Self::LEARNING_RATE);
        sgd.step(&self.hidden, &mut self.output);
        sgd.step(&self.input, &mut self.hidden);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;
    use crate::layers::NeuronLayer;

    type Tiny = FixedNetwork<2, 3, 1, 500>;

    #[test]
    fn rate_is_permille() {
        assert_eq!(Tiny::LEARNING_RATE, 0.5);
        assert_eq!(FixedNetwork::<1, 1, 1, 3000>::LEARNING_RATE, 3.0);
    }

    #[test]
    fn architecture_is_static() {
        let n = Tiny::new(ActivationFunction::Sigmoid);
        assert_eq!(n.architecture(), [2, 3, 1]);
        assert_eq!(n.hidden_layer().len(), 3);
        assert!(n.output_layer().neurons().iter().all(|neuron| neuron.fan_in() == 3));
    }

    #[test]
    fn slices_are_shape_checked() {
        let mut n = Tiny::new(ActivationFunction::Identity);
        assert_eq!(
            n.feed_forward(&[1.0]),
            Err(NetworkError::ShapeMismatch { what: "input", expected: 2, actual: 1 })
        );
        assert!(n.learn_once(&[1.0, 1.0], &[1.0, 0.0]).is_err());
    }

    #[test]
    fn hand_set_forward_pass() {
        let mut n: FixedNetwork<2, 2, 1, 300> = FixedNetwork::new(ActivationFunction::Identity);
        for (neuron, bias) in n.hidden_layer_mut().neurons_mut().iter_mut().zip([-1.0, 0.0]) {
            neuron.weights_mut().copy_from_slice(&[0.5, 0.5]);
            neuron.bias = bias;
        }
        let out = &mut n.output_layer_mut().neurons_mut()[0];
        out.weights_mut().copy_from_slice(&[0.5, 0.5]);
        out.bias = -0.5;

        assert_eq!(n.feed_forward_array(&[1.0, 1.0]), [0.0]);
    }
}
