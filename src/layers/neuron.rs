use rand::Rng;

use crate::math::init::GaussianInit;

/// Backing store for a neuron's incoming weights.
///
/// `Vec<f64>` backs networks whose shape is chosen at runtime, `[f64; N]`
/// backs networks whose shape is fixed at compile time.
pub trait WeightStorage: AsRef<[f64]> + AsMut<[f64]> {
    /// Storage for `len` weights, all zero.
    fn zeroed(len: usize) -> Self;
}

impl WeightStorage for Vec<f64> {
    fn zeroed(len: usize) -> Self {
        vec![0.0; len]
    }
}

impl<const N: usize> WeightStorage for [f64; N] {
    fn zeroed(len: usize) -> Self {
        debug_assert_eq!(len, N, "fixed weight storage holds exactly {} weights", N);
        [0.0; N]
    }
}

/// A single unit: its incoming weights and bias, plus the training state left
/// behind by the most recent forward pass.
///
/// `weighted_sum` (z) and `activation` are overwritten by every forward pass
/// and read back by backpropagation.  Input-layer neurons have no weights;
/// their activation is the raw feature value.
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron<W = Vec<f64>> {
    pub activation: f64,
    pub weighted_sum: f64,
    pub bias: f64,
    weights: W,
}

impl<W: WeightStorage> Neuron<W> {
    /// Draws `fan_in` weights and then the bias from `init`.
    pub(crate) fn random<R: Rng + ?Sized>(fan_in: usize, init: &GaussianInit, rng: &mut R) -> Neuron<W> {
        let mut weights = W::zeroed(fan_in);
        init.fill(weights.as_mut(), rng);
        let bias = init.sample(rng);
        Neuron {
            activation: 0.0,
            weighted_sum: 0.0,
            bias,
            weights,
        }
    }

    /// Incoming weights, indexed by source-neuron position in the previous layer.
    pub fn weights(&self) -> &[f64] {
        self.weights.as_ref()
    }

    /// Mutable access to the weights; the count itself never changes.
    pub fn weights_mut(&mut self) -> &mut [f64] {
        self.weights.as_mut()
    }

    /// Weights and bias borrowed together for hand-setting.
    pub fn params_mut(&mut self) -> (&mut [f64], &mut f64) {
        (self.weights.as_mut(), &mut self.bias)
    }

    pub fn fan_in(&self) -> usize {
        self.weights.as_ref().len()
    }

    /// Dot product of the weights with `inputs`, plus the bias.
    pub(crate) fn weigh<'a, I>(&self, inputs: I) -> f64
    where
        I: IntoIterator<Item = &'a f64>,
    {
        let mut z = 0.0;
        for (w, a) in self.weights().iter().zip(inputs) {
            z += w * a;
        }
        z + self.bias
    }
}
