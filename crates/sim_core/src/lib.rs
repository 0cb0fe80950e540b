//! # Simulation Core (Core Layer)
//!
//! ## Core Layer Role
//!
//! sim_core is the foundation of the Monte Carlo workspace:
//! - Seeded, explicitly owned draw sources ([`rng::SeededSource`])
//! - Validated distribution specifications ([`rng::DistributionSpec`])
//! - Streaming aggregation statistics ([`stats::RunningStats`])
//! - The shared error taxonomy ([`SimError`])
//!
//! It has no knowledge of trials or estimators; those live in `sim_engine`.
//!
//! ## Usage Example
//!
//! ```rust
//! use sim_core::rng::{DistributionSpec, SeededSource};
//! use sim_core::stats::RunningStats;
//!
//! let mut source = SeededSource::from_seed(20491720);
//! let stats: RunningStats = source
//!     .draws(&DistributionSpec::standard_uniform())
//!     .unwrap()
//!     .take(10_000)
//!     .collect();
//!
//! assert!((stats.mean().unwrap() - 0.5).abs() < 0.02);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod rng;
pub mod stats;

pub use error::{Result, SimError};
pub use rng::{DistributionSpec, SeededSource};
