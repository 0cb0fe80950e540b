//! The per-trial procedure consumed by the estimator.

use sim_core::SeededSource;

/// One independent random experiment producing a scalar result.
///
/// A trial may draw any number of values from the source. It must not keep
/// state that changes the distribution of later results; bookkeeping such as
/// counters is fine.
///
/// Any `FnMut(&mut SeededSource) -> f64` closure is a trial:
///
/// ```rust
/// use sim_core::SeededSource;
/// use sim_engine::estimator::Trial;
///
/// let mut square = |source: &mut SeededSource| {
///     let x = source.gen_uniform();
///     x * x
/// };
/// let mut source = SeededSource::from_seed(1);
/// let value = square.run(&mut source);
/// assert!((0.0..1.0).contains(&value));
/// ```
pub trait Trial {
    /// Runs the trial once, consuming draws from `source`.
    fn run(&mut self, source: &mut SeededSource) -> f64;
}

impl<F> Trial for F
where
    F: FnMut(&mut SeededSource) -> f64,
{
    #[inline]
    fn run(&mut self, source: &mut SeededSource) -> f64 {
        self(source)
    }
}
