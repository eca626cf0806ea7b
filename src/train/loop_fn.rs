use std::sync::atomic::Ordering;
use std::time::Instant;

use tracing::info;

use crate::data::Dataset;
use crate::error::Result;
use crate::train::epoch_stats::EpochStats;
use crate::train::learner::Learner;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::{evaluate, train_epoch};

/// Trains `learner` on `learning` for `config.epochs` epochs, checking
/// accuracy on `verification` after each one.
///
/// Samples are visited in dataset order every epoch.  Returns the stats of
/// every completed epoch.
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
pub fn train_loop<L: Learner + ?Sized>(
    learner: &mut L,
    learning: &Dataset,
    verification: &Dataset,
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            break;
        }

        let t_start = Instant::now();
        train_epoch(learner, learning)?;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        let (correct, total) = evaluate(learner, verification)?;
        let accuracy = if total == 0 { 0.0 } else { correct as f64 / total as f64 };

        info!(epoch, total_epochs = config.epochs, correct, total, elapsed_ms, "epoch done");

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            correct,
            total,
            accuracy,
            elapsed_ms,
        };
        history.push(stats.clone());

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    Ok(history)
}

fn stop_requested(config: &TrainConfig) -> bool {
    config.stop_flag.as_ref().map_or(false, |flag| flag.load(Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationFunction;
    use crate::network::{Network, NetworkConfig};
    use std::sync::atomic::AtomicBool;
    use std::sync::{mpsc, Arc};

    fn corners() -> Dataset {
        let mut d = Dataset::new(2, 1);
        d.push(vec![1.0, 0.0], 0).unwrap();
        d.push(vec![0.0, 1.0], 1).unwrap();
        d
    }

    fn network() -> Network {
        Network::new(
            &NetworkConfig::new(vec![2, 2])
                .activation(ActivationFunction::Sigmoid)
                .learning_rate(3.0),
        )
        .unwrap()
    }

    #[test]
    fn learns_two_separable_points() {
        let mut n = network();
        let data = corners();
        let history = train_loop(&mut n, &data, &data, &TrainConfig::new(50)).unwrap();
        assert_eq!(history.len(), 50);
        let last = history.last().unwrap();
        assert_eq!((last.correct, last.total), (2, 2));
        assert_eq!(last.accuracy, 1.0);
    }

    #[test]
    fn reports_progress_over_the_channel() {
        let (tx, rx) = mpsc::channel();
        let mut config = TrainConfig::new(3);
        config.progress_tx = Some(tx);

        let data = corners();
        train_loop(&mut network(), &data, &data, &config).unwrap();
        drop(config);
        let epochs: Vec<usize> = rx.iter().map(|s| s.epoch).collect();
        assert_eq!(epochs, vec![1, 2, 3]);
    }

    #[test]
    fn stop_flag_prevents_any_epoch() {
        let mut config = TrainConfig::new(5);
        config.stop_flag = Some(Arc::new(AtomicBool::new(true)));

        let data = corners();
        let history = train_loop(&mut network(), &data, &data, &config).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn empty_verification_set_reports_zero_accuracy() {
        let history = train_loop(&mut network(), &corners(), &Dataset::new(2, 1), &TrainConfig::new(1)).unwrap();
        assert_eq!(history[0].total, 0);
        assert_eq!(history[0].accuracy, 0.0);
    }

    #[test]
    fn bad_labels_surface_as_errors() {
        let mut data = Dataset::new(2, 1);
        data.push(vec![0.0, 0.0], 5).unwrap();
        assert!(train_loop(&mut network(), &data, &data, &TrainConfig::new(1)).is_err());
    }
}
