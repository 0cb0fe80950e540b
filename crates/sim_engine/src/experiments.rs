//! Named experiments built on the generic estimator.
//!
//! Each [`Experiment`] pairs a concrete trial with the quantity derived from
//! its mean (e, an integral, π or a coverage rate) and the known value that
//! quantity should converge to.

use std::f64::consts::{E, PI};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use sim_core::{Result, SeededSource};
use tracing::{debug, warn};

use crate::estimator::{Estimate, MonteCarloEstimator, Trial};
use crate::trace::ConvergenceTrace;
use crate::trials::{
    x2_sin_inv_x, BuffonNeedleTrial, CoverageTrial, IntegralTrial, StoppingTimeTrial,
    DEFAULT_DRAW_CAP, X2_SIN_INV_X_INTEGRAL,
};

/// An experiment with its parameters.
///
/// # Examples
///
/// ```rust
/// use sim_engine::estimator::{EstimatorConfig, MonteCarloEstimator};
/// use sim_engine::experiments::Experiment;
///
/// let estimator = MonteCarloEstimator::new(
///     EstimatorConfig::builder().trials(100_000).seed(20491720).build().unwrap(),
/// )
/// .unwrap();
///
/// let report = Experiment::buffon().run(&estimator).unwrap();
/// assert!((report.derived - std::f64::consts::PI).abs() < 0.05);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Experiment {
    /// Mean stopping time of a sum of uniforms, which estimates e.
    Euler {
        /// Draw cap per trial.
        cap: u32,
    },
    /// ∫ x²·sin(1/x) dx over `[lower, upper)`.
    Integral {
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },
    /// Buffon's needle estimate of π.
    Buffon {
        /// Needle length.
        length: f64,
        /// Gridline spacing.
        spacing: f64,
    },
    /// Empirical coverage of a known-σ normal confidence interval.
    Coverage {
        /// True mean of the sampled population.
        mean: f64,
        /// True standard deviation of the sampled population.
        std_dev: f64,
        /// Observations per simulated sample.
        sample_size: usize,
        /// Nominal confidence level.
        level: f64,
    },
}

impl Experiment {
    /// Stopping-time experiment with the default cap.
    pub fn euler() -> Self {
        Self::Euler {
            cap: DEFAULT_DRAW_CAP,
        }
    }

    /// Integral over the unit interval.
    pub fn integral() -> Self {
        Self::Integral {
            lower: 0.0,
            upper: 1.0,
        }
    }

    /// Unit needle on unit-spaced lines.
    pub fn buffon() -> Self {
        Self::Buffon {
            length: 1.0,
            spacing: 1.0,
        }
    }

    /// 95% intervals for samples of 30 standard normals.
    pub fn coverage() -> Self {
        Self::Coverage {
            mean: 0.0,
            std_dev: 1.0,
            sample_size: 30,
            level: 0.95,
        }
    }

    /// Short name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Euler { .. } => "euler",
            Self::Integral { .. } => "integral",
            Self::Buffon { .. } => "buffon",
            Self::Coverage { .. } => "coverage",
        }
    }

    /// Runs sequentially on a source seeded from the estimator configuration.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidParameter`](sim_core::SimError::InvalidParameter)
    ///   for out-of-domain experiment parameters, before any draw
    /// - [`SimError::UndefinedResult`](sim_core::SimError::UndefinedResult)
    ///   for zero trials or a Buffon run without crossings
    pub fn run(&self, estimator: &MonteCarloEstimator) -> Result<ExperimentReport> {
        self.execute(estimator, Mode::Sequential)
            .map(|(report, _)| report)
    }

    /// Like [`run`](Self::run), also returning the convergence trace of the
    /// derived quantity.
    pub fn run_with_trace(
        &self,
        estimator: &MonteCarloEstimator,
    ) -> Result<(ExperimentReport, ConvergenceTrace)> {
        let (report, trace) = self.execute(estimator, Mode::Traced)?;
        Ok((report, trace.unwrap_or_default()))
    }

    /// Runs in `batches` parallel batches via
    /// [`MonteCarloEstimator::estimate_parallel`].
    pub fn run_parallel(
        &self,
        estimator: &MonteCarloEstimator,
        batches: usize,
    ) -> Result<ExperimentReport> {
        self.execute(estimator, Mode::Parallel(batches))
            .map(|(report, _)| report)
    }

    fn execute(
        &self,
        estimator: &MonteCarloEstimator,
        mode: Mode,
    ) -> Result<(ExperimentReport, Option<ConvergenceTrace>)> {
        debug!(experiment = self.name(), ?mode, "running experiment");

        match *self {
            Self::Euler { cap } => {
                let prototype = StoppingTimeTrial::with_cap(cap)?;
                let capped_count = AtomicU64::new(0);
                let capped = &capped_count;
                let (estimate, trace) = drive(estimator, mode, move || {
                    let mut trial = prototype.clone();
                    move |source: &mut SeededSource| {
                        let before = trial.capped_trials();
                        let k = trial.run(source);
                        if trial.capped_trials() > before {
                            capped.fetch_add(1, Ordering::Relaxed);
                        }
                        k
                    }
                })?;
                let capped_trials = capped_count.load(Ordering::Relaxed);
                if capped_trials > 0 {
                    warn!(cap, capped_trials, "stopping-time trials hit their draw cap");
                }
                let report = ExperimentReport {
                    experiment: *self,
                    estimate,
                    derived: estimate.mean,
                    derived_std_error: estimate.std_error,
                    reference: Some(E),
                    capped_trials: Some(capped_trials),
                };
                Ok((report, trace))
            }
            Self::Integral { lower, upper } => {
                let trial = IntegralTrial::over(lower, upper, x2_sin_inv_x as fn(f64) -> f64)?;
                let (estimate, trace) = drive(estimator, mode, || trial.clone())?;
                let reference = (lower == 0.0 && upper == 1.0).then_some(X2_SIN_INV_X_INTEGRAL);
                let report = ExperimentReport {
                    experiment: *self,
                    estimate,
                    derived: estimate.mean,
                    derived_std_error: estimate.std_error,
                    reference,
                    capped_trials: None,
                };
                Ok((report, trace))
            }
            Self::Buffon { length, spacing } => {
                let trial = BuffonNeedleTrial::new(length, spacing)?;
                let (estimate, trace) = drive(estimator, mode, || trial)?;
                let pi = trial.pi_from_rate(estimate.mean)?;
                // Delta method: |d(2L/(d·r))/dr| = π̂ / r
                let derived_std_error = pi * estimate.std_error / estimate.mean;
                // π is undefined until the first crossing
                let trace =
                    trace.map(|t| t.filter_map_means(|rate| trial.pi_from_rate(rate).ok()));
                let report = ExperimentReport {
                    experiment: *self,
                    estimate,
                    derived: pi,
                    derived_std_error,
                    reference: Some(PI),
                    capped_trials: None,
                };
                Ok((report, trace))
            }
            Self::Coverage {
                mean,
                std_dev,
                sample_size,
                level,
            } => {
                let trial = CoverageTrial::new(mean, std_dev, sample_size, level)?;
                let (estimate, trace) = drive(estimator, mode, || trial)?;
                let report = ExperimentReport {
                    experiment: *self,
                    estimate,
                    derived: estimate.mean,
                    derived_std_error: estimate.std_error,
                    reference: Some(level),
                    capped_trials: None,
                };
                Ok((report, trace))
            }
        }
    }
}

/// Outcome of an [`Experiment`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ExperimentReport {
    /// The experiment that produced this report.
    pub experiment: Experiment,
    /// Raw estimate of the mean trial result.
    pub estimate: Estimate,
    /// Quantity derived from the mean (equal to it except for Buffon's π).
    pub derived: f64,
    /// Standard error of `derived`.
    pub derived_std_error: f64,
    /// Known value `derived` converges to, when there is one.
    pub reference: Option<f64>,
    /// Stopping-time trials that hit the draw cap.
    pub capped_trials: Option<u64>,
}

impl ExperimentReport {
    /// Signed distance from the reference value.
    pub fn error(&self) -> Option<f64> {
        self.reference.map(|r| self.derived - r)
    }
}

#[derive(Clone, Copy, Debug)]
enum Mode {
    Sequential,
    Traced,
    Parallel(usize),
}

fn drive<F, T>(
    estimator: &MonteCarloEstimator,
    mode: Mode,
    make_trial: F,
) -> Result<(Estimate, Option<ConvergenceTrace>)>
where
    F: Fn() -> T + Sync,
    T: Trial,
{
    match mode {
        Mode::Sequential => {
            let mut trial = make_trial();
            Ok((estimator.run(&mut trial)?, None))
        }
        Mode::Traced => {
            let mut trial = make_trial();
            let mut source = estimator.seeded_source();
            let (estimate, trace) = estimator.estimate_with_trace(&mut trial, &mut source)?;
            Ok((estimate, Some(trace)))
        }
        Mode::Parallel(batches) => Ok((estimator.estimate_parallel(make_trial, batches)?, None)),
    }
}
