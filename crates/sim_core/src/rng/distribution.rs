//! Distribution specifications and validated samplers.
//!
//! A [`DistributionSpec`] names a family and its parameters. It is plain data
//! (serialisable, comparable) and may be out of domain. Calling
//! [`DistributionSpec::validate`] checks the parameters and produces a
//! [`Sampler`], which is the only thing a [`SeededSource`](super::SeededSource)
//! draws from. Validation therefore always happens before any draw.

use rand::Rng;
use rand_distr::{Bernoulli, Distribution, Exp, Normal, Poisson, Uniform};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Distribution family with parameters.
///
/// # Examples
///
/// ```rust
/// use sim_core::rng::DistributionSpec;
///
/// let spec = DistributionSpec::normal(0.0, 2.0);
/// assert_eq!(spec.variance(), 4.0);
/// assert!(spec.validate().is_ok());
///
/// let bad = DistributionSpec::normal(0.0, -1.0);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum DistributionSpec {
    /// Continuous uniform on `[low, high)`.
    Uniform {
        /// Lower bound (inclusive).
        low: f64,
        /// Upper bound (exclusive).
        high: f64,
    },
    /// Normal with the given mean and standard deviation.
    Normal {
        /// Location.
        mean: f64,
        /// Scale; zero gives a point mass at `mean`.
        std_dev: f64,
    },
    /// Exponential with the given rate.
    Exponential {
        /// Rate λ (mean is 1/λ).
        rate: f64,
    },
    /// Poisson counts, returned as `f64`.
    Poisson {
        /// Mean number of events.
        lambda: f64,
    },
    /// Bernoulli indicator, returned as `0.0` or `1.0`.
    Bernoulli {
        /// Success probability.
        p: f64,
    },
}

impl DistributionSpec {
    /// Uniform on `[low, high)`.
    #[inline]
    pub fn uniform(low: f64, high: f64) -> Self {
        Self::Uniform { low, high }
    }

    /// Uniform on `[0, 1)`.
    #[inline]
    pub fn standard_uniform() -> Self {
        Self::Uniform {
            low: 0.0,
            high: 1.0,
        }
    }

    /// Normal with mean and standard deviation.
    #[inline]
    pub fn normal(mean: f64, std_dev: f64) -> Self {
        Self::Normal { mean, std_dev }
    }

    /// Exponential with rate λ.
    #[inline]
    pub fn exponential(rate: f64) -> Self {
        Self::Exponential { rate }
    }

    /// Poisson with mean λ.
    #[inline]
    pub fn poisson(lambda: f64) -> Self {
        Self::Poisson { lambda }
    }

    /// Bernoulli with success probability `p`.
    #[inline]
    pub fn bernoulli(p: f64) -> Self {
        Self::Bernoulli { p }
    }

    /// Family name as used in configuration files and on the command line.
    pub fn family(&self) -> &'static str {
        match self {
            Self::Uniform { .. } => "uniform",
            Self::Normal { .. } => "normal",
            Self::Exponential { .. } => "exponential",
            Self::Poisson { .. } => "poisson",
            Self::Bernoulli { .. } => "bernoulli",
        }
    }

    /// Theoretical mean of the distribution.
    pub fn mean(&self) -> f64 {
        match *self {
            Self::Uniform { low, high } => 0.5 * (low + high),
            Self::Normal { mean, .. } => mean,
            Self::Exponential { rate } => 1.0 / rate,
            Self::Poisson { lambda } => lambda,
            Self::Bernoulli { p } => p,
        }
    }

    /// Theoretical variance of the distribution.
    pub fn variance(&self) -> f64 {
        match *self {
            Self::Uniform { low, high } => (high - low).powi(2) / 12.0,
            Self::Normal { std_dev, .. } => std_dev * std_dev,
            Self::Exponential { rate } => 1.0 / (rate * rate),
            Self::Poisson { lambda } => lambda,
            Self::Bernoulli { p } => p * (1.0 - p),
        }
    }

    /// Checks the parameters and builds a sampler.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] when:
    /// - uniform bounds are non-finite or `low >= high`
    /// - normal mean is non-finite, or `std_dev` is negative or non-finite
    /// - exponential rate or Poisson λ is not finite and positive
    /// - Bernoulli `p` lies outside `[0, 1]`
    pub fn validate(&self) -> Result<Sampler> {
        match *self {
            Self::Uniform { low, high } => {
                if !low.is_finite() || !high.is_finite() || !(high - low).is_finite() {
                    return Err(SimError::invalid_parameter(
                        "bounds",
                        format!("must be finite, got [{}, {})", low, high),
                    ));
                }
                if low >= high {
                    return Err(SimError::invalid_parameter(
                        "bounds",
                        format!("low must be below high, got [{}, {})", low, high),
                    ));
                }
                Ok(Sampler::Uniform(Uniform::new(low, high)))
            }
            Self::Normal { mean, std_dev } => {
                if !mean.is_finite() {
                    return Err(SimError::invalid_parameter(
                        "mean",
                        format!("must be finite, got {}", mean),
                    ));
                }
                if !std_dev.is_finite() || std_dev < 0.0 {
                    return Err(SimError::invalid_parameter(
                        "std_dev",
                        format!("must be finite and non-negative, got {}", std_dev),
                    ));
                }
                Normal::new(mean, std_dev)
                    .map(Sampler::Normal)
                    .map_err(|e| SimError::invalid_parameter("std_dev", e.to_string()))
            }
            Self::Exponential { rate } => {
                if !rate.is_finite() || rate <= 0.0 {
                    return Err(SimError::invalid_parameter(
                        "rate",
                        format!("must be finite and positive, got {}", rate),
                    ));
                }
                Exp::new(rate)
                    .map(Sampler::Exponential)
                    .map_err(|e| SimError::invalid_parameter("rate", e.to_string()))
            }
            Self::Poisson { lambda } => {
                if !lambda.is_finite() || lambda <= 0.0 {
                    return Err(SimError::invalid_parameter(
                        "lambda",
                        format!("must be finite and positive, got {}", lambda),
                    ));
                }
                Poisson::new(lambda)
                    .map(Sampler::Poisson)
                    .map_err(|e| SimError::invalid_parameter("lambda", e.to_string()))
            }
            Self::Bernoulli { p } => Bernoulli::new(p)
                .map(Sampler::Bernoulli)
                .map_err(|_| {
                    SimError::invalid_parameter("p", format!("must lie in [0, 1], got {}", p))
                }),
        }
    }
}

/// Validated sampler for one [`DistributionSpec`].
///
/// Produced by [`DistributionSpec::validate`]. All families yield `f64`.
#[derive(Clone, Debug)]
pub enum Sampler {
    /// Continuous uniform.
    Uniform(Uniform<f64>),
    /// Normal (Ziggurat via `rand_distr`).
    Normal(Normal<f64>),
    /// Exponential.
    Exponential(Exp<f64>),
    /// Poisson.
    Poisson(Poisson<f64>),
    /// Bernoulli mapped to `0.0`/`1.0`.
    Bernoulli(Bernoulli),
}

impl Distribution<f64> for Sampler {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Uniform(d) => d.sample(rng),
            Self::Normal(d) => d.sample(rng),
            Self::Exponential(d) => d.sample(rng),
            Self::Poisson(d) => d.sample(rng),
            Self::Bernoulli(d) => {
                if d.sample(rng) {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_requires_ordered_bounds() {
        assert!(DistributionSpec::uniform(0.0, 1.0).validate().is_ok());
        assert!(DistributionSpec::uniform(1.0, 1.0).validate().is_err());
        assert!(DistributionSpec::uniform(2.0, 1.0).validate().is_err());
        assert!(DistributionSpec::uniform(0.0, f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_normal_rejects_negative_scale() {
        let err = DistributionSpec::normal(0.0, -0.5).validate().unwrap_err();
        match err {
            SimError::InvalidParameter { name, .. } => assert_eq!(name, "std_dev"),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
        assert!(DistributionSpec::normal(f64::NAN, 1.0).validate().is_err());
        assert!(DistributionSpec::normal(3.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_positive_rate_families() {
        assert!(DistributionSpec::exponential(0.0).validate().is_err());
        assert!(DistributionSpec::exponential(-1.0).validate().is_err());
        assert!(DistributionSpec::exponential(2.0).validate().is_ok());
        assert!(DistributionSpec::poisson(0.0).validate().is_err());
        assert!(DistributionSpec::poisson(4.5).validate().is_ok());
    }

    #[test]
    fn test_bernoulli_probability_range() {
        assert!(DistributionSpec::bernoulli(0.0).validate().is_ok());
        assert!(DistributionSpec::bernoulli(1.0).validate().is_ok());
        assert!(DistributionSpec::bernoulli(1.5).validate().is_err());
        assert!(DistributionSpec::bernoulli(-0.1).validate().is_err());
    }

    #[test]
    fn test_theoretical_moments() {
        let u = DistributionSpec::uniform(2.0, 8.0);
        assert_relative_eq!(u.mean(), 5.0);
        assert_relative_eq!(u.variance(), 3.0);

        let e = DistributionSpec::exponential(4.0);
        assert_relative_eq!(e.mean(), 0.25);
        assert_relative_eq!(e.variance(), 0.0625);

        let b = DistributionSpec::bernoulli(0.3);
        assert_relative_eq!(b.variance(), 0.21, epsilon = 1e-12);
    }

    #[test]
    fn test_serde_tagged_by_family() {
        let spec = DistributionSpec::normal(1.0, 2.0);
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"family\":\"normal\""));

        let parsed: DistributionSpec =
            serde_json::from_str(r#"{"family":"poisson","lambda":3.0}"#).unwrap();
        assert_eq!(parsed, DistributionSpec::poisson(3.0));
        assert_eq!(parsed.family(), "poisson");
    }
}
