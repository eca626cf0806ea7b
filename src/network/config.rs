use serde::{Serialize, Deserialize};

use crate::activation::ActivationFunction;
use crate::error::{NetworkError, Result};

pub const DEFAULT_LEARNING_RATE: f64 = 0.3;

/// Everything needed to build a [`Network`](crate::network::Network).
///
/// `NetworkConfig` can be saved to / loaded from JSON independently of any
/// trained weights, so a run's hyperparameters can be kept next to its logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Neuron count per layer, input layer first.
    pub architecture: Vec<usize>,
    /// Applied to every neuron outside the input layer.
    #[serde(default)]
    pub activation: ActivationFunction,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    /// `1` updates after every sample; larger values average over mini-batches.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

fn default_batch_size() -> usize {
    1
}

impl NetworkConfig {
    /// Identity activation, learning rate 0.3, batch size 1.
    pub fn new(architecture: impl Into<Vec<usize>>) -> NetworkConfig {
        NetworkConfig {
            architecture: architecture.into(),
            activation: ActivationFunction::Identity,
            learning_rate: DEFAULT_LEARNING_RATE,
            batch_size: 1,
        }
    }

    pub fn activation(mut self, activation: ActivationFunction) -> Self {
        self.activation = activation;
        self
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Checks layer count, layer sizes, the activation's parameters, learning
    /// rate and batch size.
    pub fn validate(&self) -> Result<()> {
        if self.architecture.len() <= 1 {
            return Err(NetworkError::InvalidArchitecture { layers: self.architecture.len() });
        }
        if let Some(index) = self.architecture.iter().position(|&size| size == 0) {
            return Err(NetworkError::EmptyLayer { index });
        }
        if let ActivationFunction::LeakyReLU { alpha } = self.activation {
            if !self.activation.is_valid() {
                return Err(NetworkError::InvalidLeakySlope(alpha));
            }
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NetworkError::InvalidLearningRate(self.learning_rate));
        }
        if self.batch_size == 0 {
            return Err(NetworkError::InvalidBatchSize);
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a `NetworkConfig` from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = NetworkConfig::new(vec![2, 3]);
        assert_eq!(config.activation, ActivationFunction::Identity);
        assert_eq!(config.learning_rate, 0.3);
        assert_eq!(config.batch_size, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_short_architectures() {
        assert_eq!(
            NetworkConfig::new(vec![]).validate(),
            Err(NetworkError::InvalidArchitecture { layers: 0 })
        );
        assert_eq!(
            NetworkConfig::new(vec![5]).validate(),
            Err(NetworkError::InvalidArchitecture { layers: 1 })
        );
    }

    #[test]
    fn rejects_bad_hyperparameters() {
        assert_eq!(NetworkConfig::new(vec![2, 0, 1]).validate(), Err(NetworkError::EmptyLayer { index: 1 }));
        assert_eq!(
            NetworkConfig::new(vec![2, 1]).learning_rate(-0.5).validate(),
            Err(NetworkError::InvalidLearningRate(-0.5))
        );
        assert!(NetworkConfig::new(vec![2, 1]).learning_rate(f64::NAN).validate().is_err());
        assert_eq!(NetworkConfig::new(vec![2, 1]).batch_size(0).validate(), Err(NetworkError::InvalidBatchSize));
    }

    #[test]
    fn json_fills_in_defaults() {
        let config: NetworkConfig = serde_json::from_str(r#"{ "architecture": [784, 30, 10] }"#).unwrap();
        assert_eq!(config, NetworkConfig::new(vec![784, 30, 10]));

        let config: NetworkConfig = serde_json::from_str(
            r#"{ "architecture": [4, 2], "activation": { "kind": "leaky_relu", "alpha": 0.02 }, "batch_size": 10 }"#,
        ).unwrap();
        assert_eq!(config.activation, ActivationFunction::LeakyReLU { alpha: 0.02 });
        assert_eq!(config.batch_size, 10);
    }

    #[test]
    fn json_with_out_of_range_leaky_slope_is_rejected() {
        for alpha in ["5.0", "-0.5", "1.0", "0.0"] {
            let json = format!(
                r#"{{ "architecture": [4, 2], "activation": {{ "kind": "leaky_relu", "alpha": {} }} }}"#,
                alpha
            );
            let config: NetworkConfig = serde_json::from_str(&json).unwrap();
            assert!(
                matches!(config.validate(), Err(NetworkError::InvalidLeakySlope(_))),
                "alpha {} accepted",
                alpha
            );
        }
        let nan = NetworkConfig::new(vec![4, 2]).activation(ActivationFunction::LeakyReLU { alpha: f64::NAN });
        assert!(matches!(nan.validate(), Err(NetworkError::InvalidLeakySlope(_))));
        assert!(NetworkConfig::new(vec![4, 2]).activation(ActivationFunction::leaky_relu()).validate().is_ok());
    }

    #[test]
    fn save_and_load() {
        let path = std::env::temp_dir().join(format!("handreco-config-{}.json", std::process::id()));
        let path = path.to_str().unwrap();
        let config = NetworkConfig::new(vec![784, 60, 10])
            .activation(ActivationFunction::Sigmoid)
            .learning_rate(0.06)
            .batch_size(10);

        config.save_json(path).unwrap();
        let loaded = NetworkConfig::load_json(path).unwrap();
        std::fs::remove_file(path).unwrap();
        assert_eq!(loaded, config);
    }
}
