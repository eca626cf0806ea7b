//! Conversions between class labels and network output vectors.

use crate::error::{NetworkError, Result};

/// Index of a class, in `[0, classes)`.
pub type Label = usize;

/// Length-`classes` vector that is `1.0` at `label` and `0.0` elsewhere.
pub fn one_hot(label: Label, classes: usize) -> Result<Vec<f64>> {
    if label >= classes {
        return Err(NetworkError::LabelOutOfRange { label, classes });
    }
    let mut v = vec![0.0; classes];
    v[label] = 1.0;
    Ok(v)
}

/// Fixed-size counterpart of [`one_hot`].
pub fn one_hot_array<const N: usize>(label: Label) -> Result<[f64; N]> {
    if label >= N {
        return Err(NetworkError::LabelOutOfRange { label, classes: N });
    }
    let mut v = [0.0; N];
    v[label] = 1.0;
    Ok(v)
}

/// Index of the largest element; ties go to the lowest index.
/// Returns `None` for an empty slice.  NaN entries never win.
pub fn argmax(values: &[f64]) -> Option<usize> {
    if values.is_empty() {
        return None;
    }
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] || (values[best].is_nan() && !v.is_nan()) {
            best = i;
        }
    }
    Some(best)
}
