pub mod neuron;
pub mod layer;

pub use neuron::{Neuron, WeightStorage};
pub use layer::{FixedLayer, Layer, NeuronLayer};
