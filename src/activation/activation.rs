use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// Slope used by [`ActivationFunction::leaky_relu`] for negative inputs.
pub const DEFAULT_LEAKY_SLOPE: f64 = 0.01;

/// Scalar activation strategy shared by every non-input neuron of a network.
///
/// Each variant pairs a value `f(x)` with its derivative `f'(x)`; both are pure
/// and can be evaluated for any neuron in any order.  `Identity` is the
/// default.  Non-finite results (e.g. an exploding `ReLU`) are propagated
/// untouched, keeping those values finite is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivationFunction {
    #[default]
    Identity,
    Sigmoid,
    #[serde(rename = "relu")]
    ReLU,
    #[serde(rename = "leaky_relu")]
    LeakyReLU { alpha: f64 },
}

impl ActivationFunction {
    /// Leaky ReLU with the conventional 0.01 slope.
    pub fn leaky_relu() -> ActivationFunction {
        ActivationFunction::LeakyReLU { alpha: DEFAULT_LEAKY_SLOPE }
    }

    /// False for a leaky slope outside (0, 1); every other variant is valid.
    pub fn is_valid(&self) -> bool {
        match self {
            ActivationFunction::LeakyReLU { alpha } => *alpha > 0.0 && *alpha < 1.0,
            _ => true,
        }
    }

    /// Element-wise activation.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => x,
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
        }
    }

    /// Element-wise derivative, evaluated at the pre-activation value.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => 1.0,
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            },
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { 1.0 } else { *alpha },
        }
    }
}

impl std::str::FromStr for ActivationFunction {
    type Err = String;

    /// Parses `identity`, `sigmoid`, `relu`, `leaky-relu` or `leaky-relu:<alpha>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase().replace('_', "-");
        let (name, arg) = match lower.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (lower.as_str(), None),
        };
        match (name, arg) {
            ("identity", None) => Ok(ActivationFunction::Identity),
            ("sigmoid", None) => Ok(ActivationFunction::Sigmoid),
            ("relu", None) => Ok(ActivationFunction::ReLU),
            ("leaky-relu", None) => Ok(ActivationFunction::leaky_relu()),
            ("leaky-relu", Some(alpha)) => {
                let alpha: f64 = alpha.parse().map_err(|_| format!("invalid leaky slope '{}'", alpha))?;
                let leaky = ActivationFunction::LeakyReLU { alpha };
                if leaky.is_valid() {
                    Ok(leaky)
                } else {
                    Err(format!("leaky slope must lie in (0, 1), got {}", alpha))
                }
            }
            _ => Err(format!("unknown activation '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_shape() {
        let s = ActivationFunction::Sigmoid;
        assert!(s.function(-5.0) < 0.1);
        assert!(s.function(5.0) > 0.9);
        assert_eq!(s.function(0.0), 0.5);
        assert!(s.derivative(0.0) > s.derivative(-1.0));
        assert_eq!(s.derivative(0.0), 0.25);
    }

    #[test]
    fn relu_is_flat_below_zero() {
        let r = ActivationFunction::ReLU;
        assert_eq!(r.function(-3.0), 0.0);
        assert_eq!(r.function(2.5), 2.5);
        assert_eq!(r.derivative(-3.0), 0.0);
        assert_eq!(r.derivative(0.0), 0.0);
        assert_eq!(r.derivative(2.5), 1.0);
    }

    #[test]
    fn leaky_relu_keeps_a_slope() {
        let l = ActivationFunction::LeakyReLU { alpha: 0.02 };
        assert_eq!(l.function(-1.0), -0.02);
        assert_eq!(l.function(4.0), 4.0);
        assert_eq!(l.derivative(-1.0), 0.02);
        assert_eq!(l.derivative(4.0), 1.0);
    }

    #[test]
    fn leaky_slope_must_lie_strictly_between_zero_and_one() {
        assert!(ActivationFunction::leaky_relu().is_valid());
        assert!(ActivationFunction::Sigmoid.is_valid());
        for alpha in [0.0, 1.0, 5.0, -0.1, f64::NAN] {
            assert!(!ActivationFunction::LeakyReLU { alpha }.is_valid(), "alpha {}", alpha);
        }
    }

    #[test]
    fn identity_is_default() {
        let id = ActivationFunction::default();
        assert_eq!(id, ActivationFunction::Identity);
        assert_eq!(id.function(-7.5), -7.5);
        assert_eq!(id.derivative(123.0), 1.0);
    }

    #[test]
    fn parses_names() {
        assert_eq!("sigmoid".parse::<ActivationFunction>(), Ok(ActivationFunction::Sigmoid));
        assert_eq!("ReLU".parse::<ActivationFunction>(), Ok(ActivationFunction::ReLU));
        assert_eq!("leaky_relu".parse::<ActivationFunction>(), Ok(ActivationFunction::leaky_relu()));
        assert_eq!(
            "leaky-relu:0.02".parse::<ActivationFunction>(),
            Ok(ActivationFunction::LeakyReLU { alpha: 0.02 })
        );
        assert!("leaky-relu:2".parse::<ActivationFunction>().is_err());
        assert!("softmax".parse::<ActivationFunction>().is_err());
    }
}
