//! Generic Monte Carlo estimator.
//!
//! Every experiment in this crate is the same loop: draw from a seeded
//! source, compute a trial result, aggregate to a running mean. This module
//! holds that loop once, parameterised by a [`Trial`].
//!
//! # Architecture
//!
//! ```text
//! MonteCarloEstimator
//! ├── EstimatorConfig   (stopping rule, trace stride, seed)
//! ├── Trial             (closure or trial type; consumes draws)
//! ├── SeededSource      (owned by the caller, passed in)
//! └── Aggregation
//!     ├── RunningStats      (Welford mean/variance)
//!     ├── ConvergenceTrace  (running means at a stride)
//!     └── Estimate          (mean, std error, trial count)
//! ```
//!
//! # Examples
//!
//! ## Fixed trial count
//!
//! ```rust
//! use sim_core::SeededSource;
//! use sim_engine::estimator::{EstimatorConfig, MonteCarloEstimator};
//!
//! let config = EstimatorConfig::builder()
//!     .trials(10_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let estimator = MonteCarloEstimator::new(config).unwrap();
//!
//! let mut coin = |source: &mut SeededSource| {
//!     if source.gen_uniform() < 0.5 { 1.0 } else { 0.0 }
//! };
//! let estimate = estimator.run(&mut coin).unwrap();
//! println!("P(heads) ≈ {:.4} +/- {:.4}", estimate.mean, estimate.confidence_95());
//! ```
//!
//! ## Convergence criterion
//!
//! ```rust
//! use sim_core::SeededSource;
//! use sim_engine::estimator::{EstimatorConfig, MonteCarloEstimator};
//!
//! let config = EstimatorConfig::builder()
//!     .target_std_error(0.005, 100, 1_000_000)
//!     .build()
//!     .unwrap();
//! let estimator = MonteCarloEstimator::new(config).unwrap();
//!
//! let mut source = SeededSource::from_seed(7);
//! let mut trial = |s: &mut SeededSource| s.gen_normal();
//! let estimate = estimator.estimate(&mut trial, &mut source).unwrap();
//! assert!(estimate.std_error <= 0.005);
//! ```

pub mod config;
pub mod engine;
pub mod result;
pub mod trial;

// Re-exports for convenient access
pub use config::{EstimatorConfig, EstimatorConfigBuilder, StoppingRule, MAX_TRIALS};
pub use engine::{partial_means, MonteCarloEstimator, PartialMeans};
pub use result::Estimate;
pub use trial::Trial;
