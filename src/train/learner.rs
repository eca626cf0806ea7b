use crate::error::Result;
use crate::network::{FixedNetwork, Network};

/// Anything that can be driven through epochs of `(features, target)` pairs.
pub trait Learner {
    /// Forward pass; returns the output activations.
    fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>>;

    /// One training step on a single sample.
    fn learn(&mut self, input: &[f64], expected: &[f64]) -> Result<()>;

    /// Width of the output layer.
    fn output_size(&self) -> usize;
}

impl Learner for Network {
    fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.feed_forward(input)
    }

    fn learn(&mut self, input: &[f64], expected: &[f64]) -> Result<()> {
        self.learn_once(input, expected)
    }

    fn output_size(&self) -> usize {
        Network::output_size(self)
    }
}

impl<const I: usize, const H: usize, const O: usize, const R: u32> Learner for FixedNetwork<I, H, O, R> {
    fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.feed_forward(input).map(Vec::from)
    }

    fn learn(&mut self, input: &[f64], expected: &[f64]) -> Result<()> {
        self.learn_once(input, expected)
    }

    fn output_size(&self) -> usize {
        O
    }
}
