//! Estimation results.

use serde::{Deserialize, Serialize};
use sim_core::stats::{two_sided_critical_value, RunningStats};
use sim_core::{Result, SimError};

/// Sample mean of trial results with its sampling error.
///
/// `std_dev` and `std_error` are NaN when only one trial ran.
///
/// # Examples
///
/// ```rust
/// use sim_engine::estimator::Estimate;
///
/// let estimate = Estimate {
///     mean: 2.718,
///     std_dev: 0.875,
///     std_error: 0.00175,
///     n_trials: 250_000,
/// };
///
/// println!("e ≈ {} +/- {}", estimate.mean, estimate.confidence_95());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Sample mean of the trial results.
    pub mean: f64,
    /// Sample standard deviation of the trial results.
    pub std_dev: f64,
    /// Standard error of the mean.
    pub std_error: f64,
    /// Number of trials aggregated.
    pub n_trials: u64,
}

impl Estimate {
    /// Builds an estimate from accumulated statistics.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UndefinedResult`] when no trial was aggregated.
    pub fn from_stats(stats: &RunningStats) -> Result<Self> {
        let mean = stats
            .mean()
            .ok_or_else(|| SimError::undefined("mean over zero trials"))?;
        Ok(Self {
            mean,
            std_dev: stats.std_dev().unwrap_or(f64::NAN),
            std_error: stats.std_error().unwrap_or(f64::NAN),
            n_trials: stats.count(),
        })
    }

    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }

    /// Normal-approximation confidence interval at `level`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] unless `0 < level < 1`.
    pub fn confidence_interval(&self, level: f64) -> Result<(f64, f64)> {
        let half_width = two_sided_critical_value(level)? * self.std_error;
        Ok((self.mean - half_width, self.mean + half_width))
    }
}
