//! # Seeded Sequence Source
//!
//! This module provides the random number generation facilities consumed by
//! the Monte Carlo estimator: a seeded source, distribution specifications,
//! and lazy draw sequences.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: Same seed, same generator, same request order gives
//!   a bit-for-bit identical sequence
//! - **Explicit ownership**: No global generator; callers own and pass a
//!   [`SeededSource`], and re-seeding yields a new instance
//! - **Validate first**: A [`DistributionSpec`] is checked before the first
//!   draw, so invalid parameters never advance the generator
//! - **Efficiency**: Zero-allocation batch operations via `&mut [f64]` slices
//!
//! ## Module Structure
//!
//! - [`SeededSource`]: generator wrapper with seed management and substreams
//! - [`DistributionSpec`] / [`Sampler`]: family + parameters, and the validated sampler
//! - [`Draws`]: lazy, infinite iterator of draws
//!
//! ## Usage Example
//!
//! ```rust
//! use sim_core::rng::{DistributionSpec, SeededSource};
//!
//! // Create a seeded source for reproducible simulations
//! let mut source = SeededSource::from_seed(12345);
//!
//! // Generate uniform random values in [0, 1)
//! let u = source.gen_uniform();
//!
//! // Lazy draws from a declared distribution
//! let sum: f64 = source
//!     .draws(&DistributionSpec::exponential(2.0))
//!     .expect("valid rate")
//!     .take(1_000)
//!     .sum();
//!
//! // Out-of-domain parameters are rejected before any draw
//! assert!(source.draws(&DistributionSpec::normal(0.0, -1.0)).is_err());
//! ```

mod distribution;
mod draws;
mod source;

// Public re-exports
pub use distribution::{DistributionSpec, Sampler};
pub use draws::Draws;
pub use source::SeededSource;
