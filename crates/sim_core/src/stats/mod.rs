//! Aggregation statistics for trial results.
//!
//! - [`RunningStats`]: streaming mean/variance with parallel merge
//! - [`inverse_normal_cdf`] / [`two_sided_critical_value`]: normal quantiles
//!   for confidence intervals

mod normal;
mod running;

pub use normal::{inverse_normal_cdf, two_sided_critical_value};
pub use running::RunningStats;
