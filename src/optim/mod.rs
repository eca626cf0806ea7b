pub mod sgd;
pub mod batch;

pub use sgd::Sgd;
pub use batch::{BatchAccumulator, NeuronCorrection};

/// How a network turns backpropagated errors into parameter changes.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateDiscipline {
    /// Apply every sample's correction before the next sample (batch size 1).
    Immediate,
    /// Average corrections over a mini-batch and apply them at its end.
    Batched(BatchAccumulator),
}
