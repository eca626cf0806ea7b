use rand::Rng;
use tracing::debug;

use crate::activation::ActivationFunction;
use crate::error::{check_len, Result};
use crate::layers::{Layer, NeuronLayer};
use crate::loss::SquaredError;
use crate::math::GaussianInit;
use crate::network::config::NetworkConfig;
use crate::network::propagation;
use crate::optim::{BatchAccumulator, Sgd, UpdateDiscipline};

/// Fully-connected feedforward network whose layer sizes are chosen at runtime.
///
/// The shape is fixed once built; only weights, biases and the per-neuron
/// training state change afterwards.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
    activation: ActivationFunction,
    learning_rate: f64,
    update: UpdateDiscipline,
}

impl Network {
    /// Builds a network with weights drawn from the thread-local generator.
    pub fn new(config: &NetworkConfig) -> Result<Network> {
        Network::with_rng(config, &mut rand::thread_rng())
    }

    /// Builds a network drawing every weight and bias from `rng`, layer by
    /// layer and neuron by neuron.  Nothing is drawn if `config` is invalid.
    pub fn with_rng<R: Rng + ?Sized>(config: &NetworkConfig, rng: &mut R) -> Result<Network> {
        config.validate()?;

        let init = GaussianInit::new();
        let mut layers = Vec::with_capacity(config.architecture.len());
        let mut fan_in = 0;
        for &size in &config.architecture {
            layers.push(Layer::random(size, fan_in, &init, &mut *rng));
            fan_in = size;
        }

        let update = if config.batch_size > 1 {
            UpdateDiscipline::Batched(BatchAccumulator::new(config.batch_size, &layers))
        } else {
            UpdateDiscipline::Immediate
        };

        debug!(
            architecture = ?config.architecture,
            activation = ?config.activation,
            learning_rate = config.learning_rate,
            batch_size = config.batch_size,
            "network constructed"
        );

        Ok(Network {
            layers,
            activation: config.activation,
            learning_rate: config.learning_rate,
            update,
        })
    }

    /// Neuron count per layer, input layer first.
    pub fn architecture(&self) -> Vec<usize> {
        self.layers.iter().map(|l| l.len()).collect()
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn batch_size(&self) -> usize {
        match &self.update {
            UpdateDiscipline::Immediate => 1,
            UpdateDiscipline::Batched(acc) => acc.batch_size(),
        }
    }

    /// Samples learned since the last applied mini-batch (always 0 for
    /// immediate updates).
    pub fn pending_samples(&self) -> usize {
        match &self.update {
            UpdateDiscipline::Immediate => 0,
            UpdateDiscipline::Batched(acc) => acc.pending(),
        }
    }

    pub fn update_discipline(&self) -> &UpdateDiscipline {
        &self.update
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// `(weights, bias)` of each neuron in layer `index`, e.g. to hand-set
    /// parameters.  Layer sizes and fan-ins stay as built.
    pub fn layer_params_mut(&mut self, index: usize) -> Option<impl Iterator<Item = (&mut [f64], &mut f64)> + '_> {
        self.layers.get_mut(index).map(Layer::params_mut)
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].len()
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].len()
    }

    /// Forward pass.  Returns the output layer's activations.
    ///
    /// Always overwrites every neuron's `weighted_sum` and `activation`; the
    /// backward pass of [`learn_once`](Self::learn_once) reads them back.
    pub fn feed_forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        check_len("input", self.input_size(), input.len())?;
        self.propagate(input);
        Ok(self.layers[self.layers.len() - 1].activations())
    }

    /// One training step on a single `(input, expected)` pair.
    ///
    /// Runs the forward pass, backpropagates the squared-error gradient and
    /// then either updates immediately or adds to the pending mini-batch.
    pub fn learn_once(&mut self, input: &[f64], expected: &[f64]) -> Result<()> {
        check_len("input", self.input_size(), input.len())?;
        check_len("expected output", self.output_size(), expected.len())?;

        self.propagate(input);
        self.backpropagate(expected);

        match &mut self.update {
            UpdateDiscipline::Immediate => {
                let sgd = Sgd::new(self.learning_rate);
                for i in (1..self.layers.len()).rev() {
                    let (head, tail) = self.layers.split_at_mut(i);
                    sgd.step(&head[i - 1], &mut tail[0]);
                }
            }
            UpdateDiscipline::Batched(acc) => {
                acc.accumulate(&self.layers);
                if acc.apply_if_full(&mut self.layers, self.learning_rate) {
                    debug!(batch_size = acc.batch_size(), "applied mini-batch");
                }
            }
        }
        Ok(())
    }

    /// Root-mean-square error between `feed_forward(input)` and `expected`.
    /// Diagnostic only; no parameters change.
    pub fn error(&mut self, input: &[f64], expected: &[f64]) -> Result<f64> {
        check_len("expected output", self.output_size(), expected.len())?;
        let output = self.feed_forward(input)?;
        Ok(SquaredError::root_mean_square(&output, expected))
    }

    fn propagate(&mut self, input: &[f64]) {
        propagation::load_input(&mut self.layers[0], input);
        for i in 1..self.layers.len() {
            let (head, tail) = self.layers.split_at_mut(i);
            propagation::feed_layer(&head[i - 1], &mut tail[0], self.activation);
        }
    }

    fn backpropagate(&mut self, expected: &[f64]) {
        for layer in &mut self.layers {
            propagation::clear_errors(layer);
        }

        let last = self.layers.len() - 1;
        propagation::output_errors(&mut self.layers[last], expected, self.activation);

        for i in (1..last).rev() {
            let (head, tail) = self.layers.split_at_mut(i + 1);
            propagation::hidden_errors(&mut head[i], &tail[0], self.activation);
        }
    }
}
