use serde::{Serialize, Deserialize};

/// Per-epoch results emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the loop
/// sends one `EpochStats` at the end of every completed epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Verification samples classified correctly after this epoch.
    pub correct: usize,
    /// Verification samples evaluated.
    pub total: usize,
    /// `correct / total`, or 0 when there is nothing to verify against.
    pub accuracy: f64,
    /// Wall-clock duration of the learning pass in milliseconds.
    pub elapsed_ms: u64,
}
