//! # Simulation Engine (Engine Layer)
//!
//! ## Engine Layer Role
//!
//! sim_engine turns the draw sources of `sim_core` into estimates:
//! - One generic estimator parameterised by a trial ([`estimator`])
//! - Concrete trials: stopping time, integral, Buffon's needle, coverage
//!   ([`trials`])
//! - Named experiments pairing a trial with its derived quantity
//!   ([`experiments`])
//! - Convergence traces for charting ([`trace`])
//!
//! ## Usage Example
//!
//! ```rust
//! use sim_core::SeededSource;
//! use sim_engine::estimator::{EstimatorConfig, MonteCarloEstimator};
//! use sim_engine::trials::StoppingTimeTrial;
//!
//! let estimator = MonteCarloEstimator::new(
//!     EstimatorConfig::builder().trials(100_000).build().unwrap(),
//! )
//! .unwrap();
//!
//! let mut source = SeededSource::from_seed(20491720);
//! let mut trial = StoppingTimeTrial::new();
//! let estimate = estimator.estimate(&mut trial, &mut source).unwrap();
//! assert!((estimate.mean - std::f64::consts::E).abs() < 0.02);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod estimator;
pub mod experiments;
pub mod trace;
pub mod trials;

pub use estimator::{Estimate, EstimatorConfig, MonteCarloEstimator, Trial};
pub use experiments::{Experiment, ExperimentReport};
pub use trace::{ConvergenceTrace, TracePoint};
