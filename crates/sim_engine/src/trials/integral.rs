//! Definite-integral estimation.
//!
//! For X ~ U(a, b), E[(b − a)·f(X)] = ∫ₐᵇ f(x) dx, so the mean of
//! `(b − a)·f(X)` over many draws estimates the integral.

use sim_core::{Result, SeededSource, SimError};

use crate::estimator::Trial;

/// ∫₀¹ x²·sin(1/x) dx to 16 significant digits.
pub const X2_SIN_INV_X_INTEGRAL: f64 = 0.286_529_536_419_421_7;

/// x²·sin(1/x), extended continuously with f(0) = 0.
///
/// # Examples
/// ```
/// use sim_engine::trials::x2_sin_inv_x;
///
/// assert_eq!(x2_sin_inv_x(0.0), 0.0);
/// assert!((x2_sin_inv_x(1.0) - 1.0_f64.sin()).abs() < 1e-15);
/// ```
#[inline]
pub fn x2_sin_inv_x(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x * x * x.recip().sin()
    }
}

/// Evaluates `f` at one uniform point of `[lower, upper)`, scaled by the width.
///
/// # Examples
///
/// ```rust
/// use sim_core::SeededSource;
/// use sim_engine::estimator::{EstimatorConfig, MonteCarloEstimator};
/// use sim_engine::trials::IntegralTrial;
///
/// let estimator = MonteCarloEstimator::new(
///     EstimatorConfig::builder().trials(100_000).seed(1).build().unwrap(),
/// )
/// .unwrap();
///
/// // ∫₀² x dx = 2
/// let mut trial = IntegralTrial::over(0.0, 2.0, |x| x).unwrap();
/// let estimate = estimator.run(&mut trial).unwrap();
/// assert!((estimate.mean - 2.0).abs() < 0.02);
/// ```
#[derive(Clone, Debug)]
pub struct IntegralTrial<F> {
    lower: f64,
    upper: f64,
    f: F,
}

impl<F> IntegralTrial<F>
where
    F: Fn(f64) -> f64,
{
    /// Integral of `f` over the unit interval.
    pub fn new(f: F) -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
            f,
        }
    }

    /// Integral of `f` over `[lower, upper)`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] unless both bounds are finite
    /// and `lower < upper`.
    pub fn over(lower: f64, upper: f64, f: F) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() || !(upper - lower).is_finite() {
            return Err(SimError::invalid_parameter(
                "bounds",
                format!("must be finite, got [{}, {})", lower, upper),
            ));
        }
        if lower >= upper {
            return Err(SimError::invalid_parameter(
                "bounds",
                format!("lower must be below upper, got [{}, {})", lower, upper),
            ));
        }
        Ok(Self { lower, upper, f })
    }

    /// Integration bounds.
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }
}

impl<F> Trial for IntegralTrial<F>
where
    F: Fn(f64) -> f64,
{
    #[inline]
    fn run(&mut self, source: &mut SeededSource) -> f64 {
        let width = self.upper - self.lower;
        let x = self.lower + width * source.gen_uniform();
        width * (self.f)(x)
    }
}
