//! Concrete trials for the generic estimator.
//!
//! - [`StoppingTimeTrial`]: draws until a sum of uniforms exceeds 1 (mean e)
//! - [`IntegralTrial`]: one uniform evaluation of an integrand
//! - [`BuffonNeedleTrial`]: gridline-crossing indicator (rate 2L/(πd))
//! - [`CoverageTrial`]: interval-contains-mean indicator
//!
//! Any `FnMut(&mut SeededSource) -> f64` is also a trial, so these types only
//! exist where a trial carries parameters or state worth naming.

mod buffon;
mod coverage;
mod integral;
mod stopping_time;

pub use buffon::BuffonNeedleTrial;
pub use coverage::CoverageTrial;
pub use integral::{x2_sin_inv_x, IntegralTrial, X2_SIN_INV_X_INTEGRAL};
pub use stopping_time::{StoppingTimeTrial, DEFAULT_DRAW_CAP};
