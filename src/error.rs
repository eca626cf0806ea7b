use thiserror::Error;

/// Failures raised by network construction and the learning operations.
///
/// Every variant is detected before any weight, activation or error value is
/// touched, so a failed call leaves the network exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    #[error("architecture needs at least an input and an output layer, got {layers} layer(s)")]
    InvalidArchitecture { layers: usize },

    #[error("layer {index} of the architecture has no neurons")]
    EmptyLayer { index: usize },

    #[error("learning rate must be finite and positive, got {0}")]
    InvalidLearningRate(f64),

    #[error("leaky slope must lie in (0, 1), got {0}")]
    InvalidLeakySlope(f64),

    #[error("batch size must be at least 1")]
    InvalidBatchSize,

    #[error("{what} has length {actual}, expected {expected}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("label {label} is out of range for {classes} classes")]
    LabelOutOfRange { label: usize, classes: usize },
}

/// Failures raised while reading labeled images from disk.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed data: {0}")]
    Format(String),

    #[error("image decoding failed: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, NetworkError>;

/// Returns a `ShapeMismatch` unless `actual == expected`.
pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(NetworkError::ShapeMismatch { what, expected, actual })
    }
}
