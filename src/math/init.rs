use rand::Rng;
use rand_distr::StandardNormal;

/// Standard deviation every fresh weight and bias is drawn with.
pub const INIT_STD_DEV: f64 = 0.01;

/// Zero-mean Gaussian initializer for weights and biases.
///
/// The random source is always passed in by the caller, so a seeded generator
/// reproduces the exact same parameters on every run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianInit {
    std_dev: f64,
}

impl GaussianInit {
    /// N(0, 0.01), the distribution networks are initialized with.
    pub fn new() -> GaussianInit {
        GaussianInit { std_dev: INIT_STD_DEV }
    }

    /// Returns `None` unless `std_dev` is finite and non-negative.
    pub fn with_std_dev(std_dev: f64) -> Option<GaussianInit> {
        if std_dev.is_finite() && std_dev >= 0.0 {
            Some(GaussianInit { std_dev })
        } else {
            None
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Draws one value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.sample::<f64, _>(StandardNormal) * self.std_dev
    }

    /// Overwrites `values` in index order with independent draws.
    pub fn fill<R: Rng + ?Sized>(&self, values: &mut [f64], rng: &mut R) {
        for v in values.iter_mut() {
            *v = self.sample(rng);
        }
    }
}

impl Default for GaussianInit {
    fn default() -> Self {
        GaussianInit::new()
    }
}
