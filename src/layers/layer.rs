use rand::Rng;

use crate::layers::neuron::{Neuron, WeightStorage};
use crate::math::init::GaussianInit;

/// Common view over a layer's neurons and its backpropagated error terms.
///
/// The propagation kernels are written against this trait so that the same
/// code drives both growable and fixed-size layers.
pub trait NeuronLayer {
    type Weights: WeightStorage;

    fn neurons(&self) -> &[Neuron<Self::Weights>];

    fn errors(&self) -> &[f64];

    /// Neurons and errors borrowed together.
    fn parts_mut(&mut self) -> (&mut [Neuron<Self::Weights>], &mut [f64]);

    fn len(&self) -> usize {
        self.neurons().len()
    }

    fn is_empty(&self) -> bool {
        self.neurons().is_empty()
    }

    fn activations(&self) -> Vec<f64> {
        self.neurons().iter().map(|n| n.activation).collect()
    }
}

/// A layer whose size is chosen at construction and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    neurons: Vec<Neuron>,
    errors: Vec<f64>,
}

impl Layer {
    /// `size` neurons with `fan_in` incoming weights each, drawn in neuron order.
    pub fn random<R: Rng + ?Sized>(size: usize, fan_in: usize, init: &GaussianInit, rng: &mut R) -> Layer {
        let neurons = (0..size).map(|_| Neuron::random(fan_in, init, &mut *rng)).collect();
        Layer {
            neurons,
            errors: vec![0.0; size],
        }
    }

    pub(crate) fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    /// `(weights, bias)` of every neuron in order.  Values can be overwritten,
    /// the number of weights cannot.
    pub fn params_mut(&mut self) -> impl Iterator<Item = (&mut [f64], &mut f64)> + '_ {
        self.neurons.iter_mut().map(Neuron::params_mut)
    }
}

impl NeuronLayer for Layer {
    type Weights = Vec<f64>;

    fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    fn errors(&self) -> &[f64] {
        &self.errors
    }

    fn parts_mut(&mut self) -> (&mut [Neuron], &mut [f64]) {
        (&mut self.neurons, &mut self.errors)
    }
}

/// A layer of `N` neurons, each fed by `P` neurons of the previous layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedLayer<const N: usize, const P: usize> {
    neurons: [Neuron<[f64; P]>; N],
    errors: [f64; N],
}

impl<const N: usize, const P: usize> FixedLayer<N, P> {
    pub fn random<R: Rng + ?Sized>(init: &GaussianInit, rng: &mut R) -> FixedLayer<N, P> {
        FixedLayer {
            neurons: std::array::from_fn(|_| Neuron::random(P, init, &mut *rng)),
            errors: [0.0; N],
        }
    }

    pub fn neurons_mut(&mut self) -> &mut [Neuron<[f64; P]>; N] {
        &mut self.neurons
    }

    /// Activations as a fixed-size array.
    pub fn activation_array(&self) -> [f64; N] {
        std::array::from_fn(|i| self.neurons[i].activation)
    }
}

impl<const N: usize, const P: usize> NeuronLayer for FixedLayer<N, P> {
    type Weights = [f64; P];

    fn neurons(&self) -> &[Neuron<[f64; P]>] {
        &self.neurons
    }

    fn errors(&self) -> &[f64] {
        &self.errors
    }

    fn parts_mut(&mut self) -> (&mut [Neuron<[f64; P]>], &mut [f64]) {
        (&mut self.neurons, &mut self.errors)
    }
}
