//! Lazy draw sequences.

use super::distribution::Sampler;
use super::source::SeededSource;

/// Infinite iterator over draws from one distribution.
///
/// Borrows the source mutably, so draws interleave with no other consumer and
/// are produced strictly in request order. Use `take(n)` to bound it.
#[derive(Debug)]
pub struct Draws<'a> {
    source: &'a mut SeededSource,
    sampler: Sampler,
}

impl<'a> Draws<'a> {
    pub(crate) fn new(source: &'a mut SeededSource, sampler: Sampler) -> Self {
        Self { source, sampler }
    }

    /// The sampler driving this sequence.
    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }
}

impl Iterator for Draws<'_> {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        Some(self.source.sample(&self.sampler))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
