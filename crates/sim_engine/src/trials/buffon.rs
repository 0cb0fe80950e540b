//! Buffon's needle.
//!
//! A needle of length L is dropped on a floor ruled with horizontal lines a
//! distance d apart. For L <= d it crosses a line with probability
//! 2L / (π d), so π ≈ 2L / (d · crossing rate).

use std::f64::consts::TAU;

use sim_core::{Result, SeededSource, SimError};

use crate::estimator::Trial;

/// Drops one needle and reports whether it crosses a gridline.
///
/// The start height is uniform in `[0, spacing)` and the angle uniform in
/// `[0, 2π)`. The result is `1.0` for a crossing and `0.0` otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuffonNeedleTrial {
    length: f64,
    spacing: f64,
}

impl Default for BuffonNeedleTrial {
    fn default() -> Self {
        Self {
            length: 1.0,
            spacing: 1.0,
        }
    }
}

impl BuffonNeedleTrial {
    /// Needle of `length` on lines `spacing` apart.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] unless both values are finite
    /// and positive and `length <= spacing`.
    pub fn new(length: f64, spacing: f64) -> Result<Self> {
        if !length.is_finite() || length <= 0.0 {
            return Err(SimError::invalid_parameter(
                "length",
                format!("must be finite and positive, got {}", length),
            ));
        }
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(SimError::invalid_parameter(
                "spacing",
                format!("must be finite and positive, got {}", spacing),
            ));
        }
        if length > spacing {
            return Err(SimError::invalid_parameter(
                "length",
                format!(
                    "needle length {} exceeds line spacing {}; the 2L/(πd) model needs L <= d",
                    length, spacing
                ),
            ));
        }
        Ok(Self { length, spacing })
    }

    /// Needle length.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Distance between gridlines.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Crossing probability implied by the geometry, 2L / (π d).
    pub fn crossing_probability(&self) -> f64 {
        2.0 * self.length / (std::f64::consts::PI * self.spacing)
    }

    /// Turns an observed crossing rate into an estimate of π.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UndefinedResult`] when no needle crossed.
    pub fn pi_from_rate(&self, rate: f64) -> Result<f64> {
        if rate <= 0.0 || rate.is_nan() {
            return Err(SimError::undefined(format!(
                "π needs at least one crossing, observed rate {}",
                rate
            )));
        }
        Ok(2.0 * self.length / (self.spacing * rate))
    }
}

impl Trial for BuffonNeedleTrial {
    fn run(&mut self, source: &mut SeededSource) -> f64 {
        let y0 = self.spacing * source.gen_uniform();
        let angle = TAU * source.gen_uniform();
        let y1 = y0 + self.length * angle.sin();

        let band0 = (y0 / self.spacing).floor();
        let band1 = (y1 / self.spacing).floor();
        if band0 != band1 {
            1.0
        } else {
            0.0
        }
    }
}
