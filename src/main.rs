//! Command-line driver: trains a network on an IDX digit corpus and reports
//! verification accuracy per epoch.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use handreco::data::{self, user_images};
use handreco::train::{evaluate, train_loop, TrainConfig};
use handreco::{argmax, ActivationFunction, Network, NetworkConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "handreco")]
#[command(about = "Train a fully-connected network on handwritten digits", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter, e.g. `info` or `handreco=debug`
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on `train-*` IDX files and verify after every epoch
    Train {
        /// Directory holding the IDX files
        #[arg(short, long)]
        data: PathBuf,

        /// Network config JSON; overrides the hyperparameter flags below
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Hidden layer width
        #[arg(long, default_value = "60")]
        hidden: usize,

        /// identity, sigmoid, relu, leaky-relu or leaky-relu:<alpha>
        #[arg(long, default_value = "leaky-relu")]
        activation: ActivationFunction,

        #[arg(long, default_value = "0.06")]
        learning_rate: f64,

        /// Samples per mini-batch; 1 updates after every sample
        #[arg(long, default_value = "10")]
        batch_size: usize,

        #[arg(short, long, default_value = "30")]
        epochs: usize,

        /// Number of classes in the output layer
        #[arg(long, default_value = "10")]
        classes: usize,

        /// Leading samples used for learning; the rest verify
        #[arg(long, default_value = "50000")]
        learn_samples: usize,

        /// Learn on nine one-pixel shifts of every sample
        #[arg(long)]
        augment: bool,

        /// Also evaluate on the `t10k-*` files after training
        #[arg(long)]
        test: bool,

        /// Directory of `<digit>__*.*` images to evaluate after training
        #[arg(long)]
        own_images: Option<PathBuf>,

        /// Image files to classify after training
        #[arg(long)]
        classify: Vec<PathBuf>,
    },

    /// Write a network config JSON with the default hyperparameters
    Config {
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match cli.command {
        Commands::Train {
            data: data_dir,
            config,
            hidden,
            activation,
            learning_rate,
            batch_size,
            epochs,
            classes,
            learn_samples,
            augment,
            test,
            own_images,
            classify,
        } => {
            let corpus = data::read_training_data(&data_dir)
                .with_context(|| format!("reading training data from {}", data_dir.display()))?;
            let inputs = corpus.pixel_count();
            let (width, height) = (corpus.width() as u32, corpus.height() as u32);

            let network_config = match config {
                Some(path) => NetworkConfig::load_json(&path.to_string_lossy())
                    .with_context(|| format!("reading config {}", path.display()))?,
                None => NetworkConfig::new(vec![inputs, hidden, classes])
                    .activation(activation)
                    .learning_rate(learning_rate)
                    .batch_size(batch_size),
            };
            if network_config.architecture.first() != Some(&inputs) {
                bail!(
                    "config expects {:?} inputs but images have {} pixels",
                    network_config.architecture.first(),
                    inputs
                );
            }

            let mut network = Network::new(&network_config)?;
            let (learning, verification) = corpus.split_at(learn_samples);
            let learning = if augment { learning.augmented() } else { learning };
            info!(
                learning = learning.len(),
                verification = verification.len(),
                architecture = ?network.architecture(),
                "starting training"
            );

            let (before, total) = evaluate(&mut network, &verification)?;
            info!(correct = before, total, "before training");

            train_loop(&mut network, &learning, &verification, &TrainConfig::new(epochs))?;

            if test {
                let test_data = data::read_test_data(&data_dir)?;
                let (correct, total) = evaluate(&mut network, &test_data)?;
                info!(correct, total, "test set");
            }

            if let Some(dir) = own_images {
                let own = data::read_labeled_images(&dir, width, height)?;
                let (correct, total) = evaluate(&mut network, &own)?;
                info!(correct, total, "own images");
            }

            for path in classify {
                let bytes = std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
                let input = user_images::grayscale_input(&bytes, width, height)?;
                let output = network.feed_forward(&input)?;
                info!(image = %path.display(), class = ?argmax(&output), "classified");
            }
        }
        Commands::Config { out } => {
            let config = NetworkConfig::new(vec![784, 60, 10])
                .activation(ActivationFunction::leaky_relu())
                .learning_rate(0.06)
                .batch_size(10);
            config.save_json(&out.to_string_lossy())?;
            info!(path = %out.display(), "wrote config");
        }
    }

    Ok(())
}
