//! Monte Carlo estimator configuration.
//!
//! This module provides the stopping rule and the validated configuration
//! consumed by [`MonteCarloEstimator`](super::MonteCarloEstimator).

use sim_core::stats::RunningStats;
use sim_core::{Result, SimError};

/// Maximum number of trials a single estimation may run.
pub const MAX_TRIALS: u64 = 100_000_000;

/// When an estimation stops drawing trials.
///
/// - `FixedTrials`: exactly `n` trials
/// - `TargetStdError`: until the standard error of the running mean reaches
///   `tolerance` (checked once `min_trials` have run), or `max_trials`
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StoppingRule {
    /// Run exactly this many trials.
    FixedTrials(u64),
    /// Run until the standard error is at or below `tolerance`.
    TargetStdError {
        /// Target standard error of the mean.
        tolerance: f64,
        /// Trials always run before the tolerance is checked.
        min_trials: u64,
        /// Hard upper bound on the number of trials.
        max_trials: u64,
    },
}

impl StoppingRule {
    /// Upper bound on the number of trials this rule can run.
    #[inline]
    pub fn max_trials(&self) -> u64 {
        match *self {
            Self::FixedTrials(n) => n,
            Self::TargetStdError { max_trials, .. } => max_trials,
        }
    }

    /// Returns true once no further trial should be drawn.
    #[inline]
    pub fn is_satisfied(&self, stats: &RunningStats) -> bool {
        match *self {
            Self::FixedTrials(n) => stats.count() >= n,
            Self::TargetStdError {
                tolerance,
                min_trials,
                max_trials,
            } => {
                if stats.count() >= max_trials {
                    return true;
                }
                stats.count() >= min_trials
                    && stats.std_error().is_some_and(|se| se <= tolerance)
            }
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            Self::FixedTrials(n) => {
                if n > MAX_TRIALS {
                    return Err(SimError::invalid_parameter(
                        "trials",
                        format!("{} exceeds the maximum of {}", n, MAX_TRIALS),
                    ));
                }
            }
            Self::TargetStdError {
                tolerance,
                min_trials,
                max_trials,
            } => {
                if !tolerance.is_finite() || tolerance <= 0.0 {
                    return Err(SimError::invalid_parameter(
                        "tolerance",
                        format!("must be finite and positive, got {}", tolerance),
                    ));
                }
                if min_trials < 2 {
                    return Err(SimError::invalid_parameter(
                        "min_trials",
                        format!("a standard error needs at least 2 trials, got {}", min_trials),
                    ));
                }
                if min_trials > max_trials {
                    return Err(SimError::invalid_parameter(
                        "min_trials",
                        format!("{} exceeds max_trials {}", min_trials, max_trials),
                    ));
                }
                if max_trials > MAX_TRIALS {
                    return Err(SimError::invalid_parameter(
                        "max_trials",
                        format!("{} exceeds the maximum of {}", max_trials, MAX_TRIALS),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Estimator configuration.
///
/// Immutable configuration specifying the stopping rule, the trace stride and
/// an optional seed. Use [`EstimatorConfigBuilder`] to construct instances.
///
/// A fixed trial count of zero is accepted here; the estimator reports it as
/// an undefined result when asked to run.
///
/// # Examples
///
/// ```rust
/// use sim_engine::estimator::EstimatorConfig;
///
/// let config = EstimatorConfig::builder()
///     .trials(100_000)
///     .record_every(1_000)
///     .seed(20491720)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.rule().max_trials(), 100_000);
/// assert_eq!(config.seed(), Some(20491720));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EstimatorConfig {
    rule: StoppingRule,
    record_every: u64,
    seed: Option<u64>,
}

impl EstimatorConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> EstimatorConfigBuilder {
        EstimatorConfigBuilder::default()
    }

    /// Returns the stopping rule.
    #[inline]
    pub fn rule(&self) -> StoppingRule {
        self.rule
    }

    /// Returns the convergence trace stride.
    #[inline]
    pub fn record_every(&self) -> u64 {
        self.record_every
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] if:
    /// - the trial count exceeds [`MAX_TRIALS`]
    /// - a convergence target has a non-positive tolerance or inconsistent bounds
    /// - `record_every` is 0
    pub fn validate(&self) -> Result<()> {
        self.rule.validate()?;
        if self.record_every == 0 {
            return Err(SimError::invalid_parameter(
                "record_every",
                "trace stride must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Builder for [`EstimatorConfig`].
///
/// # Examples
///
/// ```rust
/// use sim_engine::estimator::{EstimatorConfig, StoppingRule};
///
/// let config = EstimatorConfig::builder()
///     .target_std_error(1e-3, 1_000, 1_000_000)
///     .build()
///     .expect("valid config");
///
/// assert!(matches!(config.rule(), StoppingRule::TargetStdError { .. }));
/// ```
#[derive(Clone, Debug)]
pub struct EstimatorConfigBuilder {
    rule: Option<StoppingRule>,
    record_every: u64,
    seed: Option<u64>,
}

impl Default for EstimatorConfigBuilder {
    fn default() -> Self {
        Self {
            rule: None,
            record_every: 1,
            seed: None,
        }
    }
}

impl EstimatorConfigBuilder {
    /// Runs exactly `n` trials.
    #[inline]
    pub fn trials(mut self, n: u64) -> Self {
        self.rule = Some(StoppingRule::FixedTrials(n));
        self
    }

    /// Runs until the standard error reaches `tolerance`.
    #[inline]
    pub fn target_std_error(mut self, tolerance: f64, min_trials: u64, max_trials: u64) -> Self {
        self.rule = Some(StoppingRule::TargetStdError {
            tolerance,
            min_trials,
            max_trials,
        });
        self
    }

    /// Sets the stopping rule directly.
    #[inline]
    pub fn rule(mut self, rule: StoppingRule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Records a trace point every `stride` trials.
    #[inline]
    pub fn record_every(mut self, stride: u64) -> Self {
        self.record_every = stride;
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] if no stopping rule was set or
    /// the configuration fails [`EstimatorConfig::validate`].
    pub fn build(self) -> Result<EstimatorConfig> {
        let rule = self
            .rule
            .ok_or_else(|| SimError::invalid_parameter("trials", "must be specified"))?;

        let config = EstimatorConfig {
            rule,
            record_every: self.record_every,
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}
