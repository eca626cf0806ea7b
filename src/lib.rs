pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod loss;
pub mod optim;
pub mod network;
pub mod encoding;
pub mod data;
pub mod train;

// Convenience re-exports
pub use error::{DataError, NetworkError, Result};
pub use activation::activation::ActivationFunction;
pub use layers::{FixedLayer, Layer, Neuron, NeuronLayer};
pub use network::{FixedNetwork, Network, NetworkConfig};
pub use encoding::{argmax, one_hot, one_hot_array, Label};
pub use data::Dataset;
pub use train::{train_loop, Learner, TrainConfig};
