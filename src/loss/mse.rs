/// Squared-error loss, `½·(a − y)²` per output.
pub struct SquaredError;

impl SquaredError {
    /// Derivative of `½·(a − y)²` with respect to the activation `a`.
    pub fn derivative(predicted: f64, expected: f64) -> f64 {
        predicted - expected
    }

    /// Root-mean-square of the element-wise differences.
    pub fn root_mean_square(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = expected.len() as f64;
        let sum: f64 = predicted.iter().zip(expected.iter())
            .map(|(a, y)| (y - a).powi(2))
            .sum();
        (sum / n).sqrt()
    }
}
