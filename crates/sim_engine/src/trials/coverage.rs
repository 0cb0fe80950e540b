//! Confidence-interval coverage probability.
//!
//! Each trial simulates a normal sample, builds the known-σ interval
//! x̄ ± z·σ/√n and checks whether it contains the true mean. The fraction of
//! trials that do is the empirical coverage, which should match the nominal
//! confidence level.

use sim_core::stats::two_sided_critical_value;
use sim_core::{Result, SeededSource, SimError};

use crate::estimator::Trial;

/// Coverage indicator for one simulated confidence interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverageTrial {
    mean: f64,
    std_dev: f64,
    sample_size: usize,
    level: f64,
    half_width: f64,
}

impl CoverageTrial {
    /// Intervals at `level` for samples of `sample_size` from N(mean, std_dev²).
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] for a non-finite mean, a
    /// non-positive standard deviation, an empty sample or a level outside
    /// `(0, 1)`.
    pub fn new(mean: f64, std_dev: f64, sample_size: usize, level: f64) -> Result<Self> {
        if !mean.is_finite() {
            return Err(SimError::invalid_parameter(
                "mean",
                format!("must be finite, got {}", mean),
            ));
        }
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(SimError::invalid_parameter(
                "std_dev",
                format!("must be finite and positive, got {}", std_dev),
            ));
        }
        if sample_size == 0 {
            return Err(SimError::invalid_parameter(
                "sample_size",
                "must be at least 1",
            ));
        }
        let z = two_sided_critical_value(level)?;
        let half_width = z * std_dev / (sample_size as f64).sqrt();
        Ok(Self {
            mean,
            std_dev,
            sample_size,
            level,
            half_width,
        })
    }

    /// Nominal confidence level.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Half-width of every simulated interval.
    pub fn half_width(&self) -> f64 {
        self.half_width
    }
}

impl Trial for CoverageTrial {
    fn run(&mut self, source: &mut SeededSource) -> f64 {
        let mut sum = 0.0;
        for _ in 0..self.sample_size {
            sum += self.mean + self.std_dev * source.gen_normal();
        }
        let sample_mean = sum / self.sample_size as f64;
        if (sample_mean - self.mean).abs() <= self.half_width {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_half_width() {
        let trial = CoverageTrial::new(10.0, 2.0, 25, 0.95).unwrap();
        assert_abs_diff_eq!(trial.half_width(), 1.959964 * 2.0 / 5.0, epsilon = 1e-6);
        assert_eq!(trial.level(), 0.95);
    }

    #[test]
    fn test_validation() {
        assert!(CoverageTrial::new(0.0, 0.0, 10, 0.95).is_err());
        assert!(CoverageTrial::new(0.0, 1.0, 0, 0.95).is_err());
        assert!(CoverageTrial::new(0.0, 1.0, 10, 1.0).is_err());
        assert!(CoverageTrial::new(f64::INFINITY, 1.0, 10, 0.9).is_err());
    }

    #[test]
    fn test_indicator_values() {
        let mut trial = CoverageTrial::new(0.0, 1.0, 5, 0.5).unwrap();
        let mut source = SeededSource::from_seed(2);
        let hits: f64 = (0..200).map(|_| trial.run(&mut source)).sum();
        assert!(hits > 0.0 && hits < 200.0);
    }
}
