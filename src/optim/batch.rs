use crate::layers::{Layer, NeuronLayer};

/// Pending corrections for one neuron.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuronCorrection {
    pub weights: Vec<f64>,
    pub bias: f64,
}

/// Mini-batch gradient accumulator.
///
/// Each sample adds `err[n] · a_prev[pn]` per weight and `err[n]` per bias.
/// Once `batch_size` samples have been seen, the sums are averaged, applied
/// with the learning rate and reset, so weights stay frozen inside a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchAccumulator {
    batch_size: usize,
    seen: usize,
    /// One entry per layer; the input layer's entry is empty.
    corrections: Vec<Vec<NeuronCorrection>>,
}

impl BatchAccumulator {
    pub fn new(batch_size: usize, layers: &[Layer]) -> BatchAccumulator {
        let corrections = layers.iter().enumerate()
            .map(|(i, layer)| {
                if i == 0 {
                    return Vec::new();
                }
                layer.neurons().iter()
                    .map(|n| NeuronCorrection { weights: vec![0.0; n.fan_in()], bias: 0.0 })
                    .collect()
            })
            .collect();
        BatchAccumulator { batch_size, seen: 0, corrections }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Samples accumulated since the last applied batch.
    pub fn pending(&self) -> usize {
        self.seen
    }

    pub fn corrections(&self) -> &[Vec<NeuronCorrection>] {
        &self.corrections
    }

    /// Adds the current errors of every layer to the pending corrections.
    pub fn accumulate(&mut self, layers: &[Layer]) {
        for (i, pending) in self.corrections.iter_mut().enumerate().skip(1) {
            let previous = &layers[i - 1];
            let layer = &layers[i];
            for (correction, &error) in pending.iter_mut().zip(layer.errors()) {
                for (acc, p) in correction.weights.iter_mut().zip(previous.neurons()) {
                    *acc += error * p.activation;
                }
                correction.bias += error;
            }
        }
        self.seen += 1;
    }

    /// Applies and clears the averaged corrections if the batch is complete.
    /// Returns whether an update happened.
    pub fn apply_if_full(&mut self, layers: &mut [Layer], learning_rate: f64) -> bool {
        if self.seen < self.batch_size {
            return false;
        }
        let batch = self.batch_size as f64;
        for (layer, pending) in layers.iter_mut().zip(self.corrections.iter_mut()).skip(1) {
            for (neuron, correction) in layer.neurons_mut().iter_mut().zip(pending.iter_mut()) {
                for (w, acc) in neuron.weights_mut().iter_mut().zip(correction.weights.iter_mut()) {
                    *w -= learning_rate * *acc / batch;
                    *acc = 0.0;
                }
                neuron.bias -= learning_rate * correction.bias / batch;
                correction.bias = 0.0;
            }
        }
        self.seen = 0;
        true
    }
}
