//! Streaming mean and variance.
//!
//! [`RunningStats`] folds one observation at a time using Welford's update,
//! so the current mean can be read after every trial without storing the
//! observations. Two accumulators can be merged (Chan et al.), which is how
//! independently simulated batches are combined.

use serde::{Deserialize, Serialize};

/// Welford accumulator for count, mean and sum of squared deviations.
///
/// # Examples
///
/// ```rust
/// use sim_core::stats::RunningStats;
///
/// let mut stats = RunningStats::new();
/// for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     stats.push(x);
/// }
/// assert_eq!(stats.count(), 8);
/// assert_eq!(stats.mean(), Some(5.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    /// Empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one observation.
    #[inline]
    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Number of observations so far.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean of the observations, or `None` before the first one.
    #[inline]
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Unbiased sample variance; `None` with fewer than two observations.
    #[inline]
    pub fn variance(&self) -> Option<f64> {
        (self.count > 1).then(|| self.m2 / (self.count - 1) as f64)
    }

    /// Sample standard deviation.
    #[inline]
    pub fn std_dev(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }

    /// Standard error of the mean, `s / sqrt(n)`.
    #[inline]
    pub fn std_error(&self) -> Option<f64> {
        self.std_dev().map(|s| s / (self.count as f64).sqrt())
    }

    /// Combines another accumulator into this one.
    ///
    /// The result equals pushing both observation streams into one
    /// accumulator, up to floating-point rounding.
    pub fn merge(&mut self, other: &Self) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let total = n_a + n_b;
        let delta = other.mean - self.mean;

        self.mean += delta * n_b / total;
        self.m2 += other.m2 + delta * delta * n_a * n_b / total;
        self.count += other.count;
    }
}

impl Extend<f64> for RunningStats {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.push(x);
        }
    }
}

impl FromIterator<f64> for RunningStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::new();
        stats.extend(iter);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_has_no_moments() {
        let stats = RunningStats::new();
        assert_eq!(stats.count(), 0);
        assert!(stats.mean().is_none());
        assert!(stats.variance().is_none());
        assert!(stats.std_error().is_none());
    }

    #[test]
    fn test_single_observation() {
        let stats: RunningStats = [3.5].into_iter().collect();
        assert_eq!(stats.mean(), Some(3.5));
        assert!(stats.variance().is_none());
    }

    #[test]
    fn test_matches_two_pass_formulas() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats: RunningStats = data.iter().copied().collect();

        let mean = data.iter().sum::<f64>() / data.len() as f64;
        let var = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (data.len() - 1) as f64;

        assert_relative_eq!(stats.mean().unwrap(), mean, epsilon = 1e-12);
        assert_relative_eq!(stats.variance().unwrap(), var, epsilon = 1e-12);
        assert_relative_eq!(
            stats.std_error().unwrap(),
            var.sqrt() / (data.len() as f64).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_merge_equals_single_stream() {
        let left = [1.0, 2.0, 3.0, 10.0];
        let right = [-4.0, 0.5, 8.25];

        let mut merged: RunningStats = left.iter().copied().collect();
        let other: RunningStats = right.iter().copied().collect();
        merged.merge(&other);

        let whole: RunningStats = left.iter().chain(right.iter()).copied().collect();

        assert_eq!(merged.count(), whole.count());
        assert_relative_eq!(merged.mean().unwrap(), whole.mean().unwrap(), epsilon = 1e-12);
        assert_relative_eq!(
            merged.variance().unwrap(),
            whole.variance().unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_merge_with_empty_sides() {
        let filled: RunningStats = [1.0, 2.0].into_iter().collect();

        let mut a = RunningStats::new();
        a.merge(&filled);
        assert_eq!(a, filled);

        let mut b = filled;
        b.merge(&RunningStats::new());
        assert_eq!(b, filled);
    }
}
