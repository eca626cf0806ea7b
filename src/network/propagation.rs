//! Layer-pair kernels shared by [`Network`](crate::network::Network) and
//! [`FixedNetwork`](crate::network::FixedNetwork).
//!
//! Shapes are assumed to be consistent; callers validate input and target
//! lengths before any kernel runs.

use crate::activation::ActivationFunction;
use crate::layers::NeuronLayer;
use crate::loss::SquaredError;

/// Copies raw features into the input layer's activations.
pub(crate) fn load_input<L: NeuronLayer>(layer: &mut L, input: &[f64]) {
    let (neurons, _) = layer.parts_mut();
    for (neuron, &x) in neurons.iter_mut().zip(input) {
        neuron.activation = x;
    }
}

/// Computes `z = w·a_prev + b` and `a = f(z)` for every neuron of `layer`.
pub(crate) fn feed_layer<P, L>(previous: &P, layer: &mut L, activation: ActivationFunction)
where
    P: NeuronLayer,
    L: NeuronLayer,
{
    let (neurons, _) = layer.parts_mut();
    for neuron in neurons.iter_mut() {
        let z = neuron.weigh(previous.neurons().iter().map(|p| &p.activation));
        neuron.weighted_sum = z;
        neuron.activation = activation.function(z);
    }
}

pub(crate) fn clear_errors<L: NeuronLayer>(layer: &mut L) {
    let (_, errors) = layer.parts_mut();
    errors.iter_mut().for_each(|e| *e = 0.0);
}

/// Output error: `(a − y) · f'(z)`.
pub(crate) fn output_errors<L: NeuronLayer>(layer: &mut L, expected: &[f64], activation: ActivationFunction) {
    let (neurons, errors) = layer.parts_mut();
    for ((error, neuron), &y) in errors.iter_mut().zip(neurons.iter()).zip(expected) {
        *error = SquaredError::derivative(neuron.activation, y) * activation.derivative(neuron.weighted_sum);
    }
}

/// Hidden error: `(Σ_k next.w[k][n] · next.err[k]) · f'(z_n)`.
///
/// Every neuron of `next` stores its incoming weights by source position, so
/// `weights()[n]` is the connection back to neuron `n` of `layer`.
pub(crate) fn hidden_errors<L, N>(layer: &mut L, next: &N, activation: ActivationFunction)
where
    L: NeuronLayer,
    N: NeuronLayer,
{
    let (neurons, errors) = layer.parts_mut();
    for (n, (error, neuron)) in errors.iter_mut().zip(neurons.iter()).enumerate() {
        let mut pulled = 0.0;
        for (next_neuron, next_error) in next.neurons().iter().zip(next.errors()) {
            pulled += next_neuron.weights()[n] * next_error;
        }
        *error = pulled * activation.derivative(neuron.weighted_sum);
    }
}
