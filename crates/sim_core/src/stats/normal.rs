//! Standard normal quantiles.

use num_traits::Float;

use crate::error::{Result, SimError};

/// Lower/upper region boundary for the rational approximation.
const P_LOW: f64 = 0.02425;

const A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_690e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];
const C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];

#[inline]
fn lit<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

/// Horner evaluation of `coeffs[0] x^(n-1) + ... + coeffs[n-1]`.
#[inline]
fn horner<T: Float>(coeffs: &[f64], x: T) -> T {
    coeffs
        .iter()
        .fold(T::zero(), |acc, &c| acc * x + lit::<T>(c))
}

/// Tail branch for `p` in `(0, P_LOW)`.
#[inline]
fn lower_tail<T: Float>(p: T) -> T {
    let q = (lit::<T>(-2.0) * p.ln()).sqrt();
    horner(&C, q) / (horner(&D, q) * q + T::one())
}

/// Inverse of the standard normal CDF, Φ⁻¹(p).
///
/// Acklam's rational approximation, relative error below 1.2e-9 on (0, 1).
/// Returns `-∞` for `p <= 0`, `+∞` for `p >= 1` and NaN for NaN.
///
/// # Examples
/// ```
/// use sim_core::stats::inverse_normal_cdf;
///
/// assert_eq!(inverse_normal_cdf(0.5_f64), 0.0);
/// assert!((inverse_normal_cdf(0.975_f64) - 1.959964).abs() < 1e-6);
/// ```
pub fn inverse_normal_cdf<T: Float>(p: T) -> T {
    if p.is_nan() {
        return T::nan();
    }
    if p <= T::zero() {
        return T::neg_infinity();
    }
    if p >= T::one() {
        return T::infinity();
    }

    let p_low = lit::<T>(P_LOW);
    let p_high = T::one() - p_low;

    if p < p_low {
        lower_tail(p)
    } else if p > p_high {
        -lower_tail(T::one() - p)
    } else {
        let q = p - lit::<T>(0.5);
        let r = q * q;
        horner(&A, r) * q / (horner(&B, r) * r + T::one())
    }
}

/// Two-sided critical value `z` such that `P(|Z| <= z) = level`.
///
/// # Errors
///
/// Returns [`SimError::InvalidParameter`] unless `0 < level < 1`.
pub fn two_sided_critical_value(level: f64) -> Result<f64> {
    if !(level > 0.0 && level < 1.0) {
        return Err(SimError::invalid_parameter(
            "level",
            format!("confidence level must lie in (0, 1), got {}", level),
        ));
    }
    Ok(inverse_normal_cdf(0.5 + 0.5 * level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_known_quantiles() {
        assert_abs_diff_eq!(inverse_normal_cdf(0.5_f64), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(inverse_normal_cdf(0.8413447460685429_f64), 1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(inverse_normal_cdf(0.975_f64), 1.959963984540054, epsilon = 1e-8);
        assert_abs_diff_eq!(inverse_normal_cdf(0.995_f64), 2.5758293035489004, epsilon = 1e-8);
        assert_abs_diff_eq!(inverse_normal_cdf(0.001_f64), -3.090232306167813, epsilon = 1e-8);
    }

    #[test]
    fn test_symmetry() {
        for &p in &[0.01_f64, 0.02, 0.1, 0.3, 0.45] {
            assert_abs_diff_eq!(
                inverse_normal_cdf(p),
                -inverse_normal_cdf(1.0 - p),
                epsilon = 1e-8
            );
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(inverse_normal_cdf(0.0_f64), f64::NEG_INFINITY);
        assert_eq!(inverse_normal_cdf(1.0_f64), f64::INFINITY);
        assert!(inverse_normal_cdf(f64::NAN).is_nan());
    }

    #[test]
    fn test_f32_support() {
        assert!((inverse_normal_cdf(0.975_f32) - 1.959_964).abs() < 1e-4);
    }

    #[test]
    fn test_critical_values() {
        let z95 = two_sided_critical_value(0.95).unwrap();
        let z99 = two_sided_critical_value(0.99).unwrap();
        assert_abs_diff_eq!(z95, 1.959963984540054, epsilon = 1e-8);
        assert_abs_diff_eq!(z99, 2.5758293035489004, epsilon = 1e-8);
        assert!(two_sided_critical_value(1.0).is_err());
        assert!(two_sided_critical_value(0.0).is_err());
        assert!(two_sided_critical_value(f64::NAN).is_err());
    }
}
