//! Monte Carlo estimation engine.
//!
//! This module provides the orchestration layer shared by every trial:
//! 1. Draw a trial result from the caller's [`SeededSource`]
//! 2. Fold it into a [`RunningStats`] accumulator
//! 3. Optionally record the running mean into a [`ConvergenceTrace`]
//! 4. Stop according to the configured [`StoppingRule`](super::StoppingRule)

use rayon::prelude::*;
use sim_core::stats::RunningStats;
use sim_core::{Result, SeededSource, SimError};
use tracing::debug;

use super::config::{EstimatorConfig, StoppingRule};
use super::result::Estimate;
use super::trial::Trial;
use crate::trace::ConvergenceTrace;

/// Generic Monte Carlo estimator.
///
/// Runs independent trials against a seeded source and returns the sample
/// mean of their results. The trial is the only thing that differs between
/// the stopping-time, integral, Buffon and coverage experiments.
///
/// # Examples
///
/// ```rust
/// use sim_core::SeededSource;
/// use sim_engine::estimator::{EstimatorConfig, MonteCarloEstimator};
///
/// let config = EstimatorConfig::builder().trials(50_000).build().unwrap();
/// let estimator = MonteCarloEstimator::new(config).unwrap();
///
/// // ∫₀¹ x² dx = 1/3
/// let mut trial = |source: &mut SeededSource| {
///     let x = source.gen_uniform();
///     x * x
/// };
/// let mut source = SeededSource::from_seed(42);
/// let estimate = estimator.estimate(&mut trial, &mut source).unwrap();
/// assert!((estimate.mean - 1.0 / 3.0).abs() < 0.01);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloEstimator {
    config: EstimatorConfig,
}

impl MonteCarloEstimator {
    /// Creates a new estimator with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] if the configuration is invalid.
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns a reference to the configuration.
    #[inline]
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Source seeded from the configuration (seed 0 when unset).
    pub fn seeded_source(&self) -> SeededSource {
        SeededSource::from_seed(self.config.seed().unwrap_or(0))
    }

    /// Runs trials against `source` until the stopping rule is met.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UndefinedResult`] when the rule allows zero trials.
    pub fn estimate<T>(&self, trial: &mut T, source: &mut SeededSource) -> Result<Estimate>
    where
        T: Trial + ?Sized,
    {
        self.drive(trial, source, None)
    }

    /// Like [`estimate`](Self::estimate), also recording running means every
    /// `record_every` trials. The final trial count is always recorded.
    pub fn estimate_with_trace<T>(
        &self,
        trial: &mut T,
        source: &mut SeededSource,
    ) -> Result<(Estimate, ConvergenceTrace)>
    where
        T: Trial + ?Sized,
    {
        let mut trace = ConvergenceTrace::new();
        let estimate = self.drive(trial, source, Some(&mut trace))?;
        Ok((estimate, trace))
    }

    /// Runs the estimation on a fresh source seeded from the configuration.
    pub fn run<T>(&self, trial: &mut T) -> Result<Estimate>
    where
        T: Trial + ?Sized,
    {
        let mut source = self.seeded_source();
        self.estimate(trial, &mut source)
    }

    /// Splits a fixed trial count over `batches` and runs them in parallel.
    ///
    /// Batch `i` draws from `substream(i)` of the configured seed and builds
    /// its own trial with `make_trial`. Batch statistics are merged in batch
    /// order, so the result depends only on the seed and batch count, never
    /// on thread scheduling.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidParameter`] if `batches` is 0 or the stopping rule
    ///   is not a fixed trial count
    /// - [`SimError::UndefinedResult`] if the trial count is 0
    pub fn estimate_parallel<F, T>(&self, make_trial: F, batches: usize) -> Result<Estimate>
    where
        F: Fn() -> T + Sync,
        T: Trial,
    {
        let n_trials = match self.config.rule() {
            StoppingRule::FixedTrials(n) => n,
            StoppingRule::TargetStdError { .. } => {
                return Err(SimError::invalid_parameter(
                    "rule",
                    "parallel estimation requires a fixed trial count",
                ))
            }
        };
        if batches == 0 {
            return Err(SimError::invalid_parameter("batches", "must be at least 1"));
        }
        if n_trials == 0 {
            return Err(SimError::undefined("zero trials requested"));
        }

        let batches = batches.min(usize::try_from(n_trials).unwrap_or(usize::MAX));
        let per_batch = n_trials / batches as u64;
        let remainder = n_trials % batches as u64;
        let root = self.seeded_source();

        debug!(seed = root.seed(), n_trials, batches, "starting parallel Monte Carlo estimation");

        let partials: Vec<RunningStats> = (0..batches)
            .into_par_iter()
            .map(|batch| {
                let count = per_batch + u64::from((batch as u64) < remainder);
                let mut source = root.substream(batch as u64);
                let mut trial = make_trial();
                let mut stats = RunningStats::new();
                for _ in 0..count {
                    stats.push(trial.run(&mut source));
                }
                stats
            })
            .collect();

        let mut total = RunningStats::new();
        for partial in &partials {
            total.merge(partial);
        }

        let estimate = Estimate::from_stats(&total)?;
        debug!(
            n_trials = estimate.n_trials,
            mean = estimate.mean,
            std_error = estimate.std_error,
            "parallel estimation complete"
        );
        Ok(estimate)
    }

    fn drive<T>(
        &self,
        trial: &mut T,
        source: &mut SeededSource,
        mut trace: Option<&mut ConvergenceTrace>,
    ) -> Result<Estimate>
    where
        T: Trial + ?Sized,
    {
        let rule = self.config.rule();
        if rule.max_trials() == 0 {
            return Err(SimError::undefined("zero trials requested"));
        }

        debug!(seed = source.seed(), ?rule, "starting Monte Carlo estimation");

        let stride = self.config.record_every();
        let mut stats = RunningStats::new();
        while !rule.is_satisfied(&stats) {
            stats.push(trial.run(source));
            if let Some(trace) = trace.as_deref_mut() {
                if stats.count() % stride == 0 {
                    if let Some(mean) = stats.mean() {
                        trace.record(stats.count(), mean);
                    }
                }
            }
        }

        if let (Some(trace), Some(mean)) = (trace, stats.mean()) {
            if trace.last().map(|p| p.trials) != Some(stats.count()) {
                trace.record(stats.count(), mean);
            }
        }

        let estimate = Estimate::from_stats(&stats)?;
        debug!(
            n_trials = estimate.n_trials,
            mean = estimate.mean,
            std_error = estimate.std_error,
            "estimation complete"
        );
        Ok(estimate)
    }
}

/// Lazy, infinite sequence of running means.
///
/// Each call to `next` runs one more trial and yields the mean over all trials
/// so far, so `partial_means(..).nth(n - 1)` equals the `n`-trial estimate.
///
/// # Examples
///
/// ```rust
/// use sim_core::SeededSource;
/// use sim_engine::estimator::partial_means;
///
/// let mut source = SeededSource::from_seed(3);
/// let means: Vec<f64> = partial_means(|s: &mut SeededSource| s.gen_uniform(), &mut source)
///     .take(100)
///     .collect();
/// assert_eq!(means.len(), 100);
/// ```
pub fn partial_means<T: Trial>(trial: T, source: &mut SeededSource) -> PartialMeans<'_, T> {
    PartialMeans {
        trial,
        source,
        stats: RunningStats::new(),
    }
}

/// Iterator returned by [`partial_means`].
pub struct PartialMeans<'a, T> {
    trial: T,
    source: &'a mut SeededSource,
    stats: RunningStats,
}

impl<T> PartialMeans<'_, T> {
    /// Statistics over the trials run so far.
    pub fn stats(&self) -> &RunningStats {
        &self.stats
    }

    /// The trial driving the sequence.
    pub fn trial(&self) -> &T {
        &self.trial
    }
}

impl<T: Trial> Iterator for PartialMeans<'_, T> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.stats.push(self.trial.run(self.source));
        self.stats.mean()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
