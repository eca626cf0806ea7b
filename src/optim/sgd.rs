use crate::layers::NeuronLayer;

/// Plain gradient descent, applied as soon as a sample's errors are known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// `w[pn] -= lr · err[n] · a_prev[pn]` and `b -= lr · err[n]` for every neuron of `layer`.
    pub fn step<P, L>(&self, previous: &P, layer: &mut L)
    where
        P: NeuronLayer,
        L: NeuronLayer,
    {
        let (neurons, errors) = layer.parts_mut();
        for (neuron, &error) in neurons.iter_mut().zip(errors.iter()) {
            for (w, p) in neuron.weights_mut().iter_mut().zip(previous.neurons()) {
                *w -= error * p.activation * self.learning_rate;
            }
            neuron.bias -= error * self.learning_rate;
        }
    }
}
