//! Convergence tests for the estimator and its trials.
//!
//! Each experiment is checked against its closed-form value at a trial count
//! where the tolerance is several standard errors wide.
//!
//! # Test Categories
//!
//! 1. **Known constants**: e, π and ∫₀¹ x²·sin(1/x) dx
//! 2. **Reproducibility**: fixed seeds give bit-identical estimates
//! 3. **Edge policy**: zero trials and zero crossings are undefined

use std::f64::consts::{E, PI};

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use sim_core::SeededSource;
use sim_engine::estimator::{partial_means, EstimatorConfig, MonteCarloEstimator};
use sim_engine::experiments::Experiment;
use sim_engine::trials::{
    x2_sin_inv_x, BuffonNeedleTrial, CoverageTrial, IntegralTrial, StoppingTimeTrial,
    X2_SIN_INV_X_INTEGRAL,
};

const SEED: u64 = 20491720;

fn fixed(n: u64, seed: u64) -> MonteCarloEstimator {
    MonteCarloEstimator::new(EstimatorConfig::builder().trials(n).seed(seed).build().unwrap())
        .unwrap()
}

// ============================================================================
// Known constants
// ============================================================================

#[test]
fn test_stopping_time_converges_to_e() {
    let estimator = fixed(250_000, SEED);
    let mut trial = StoppingTimeTrial::new();
    let estimate = estimator.run(&mut trial).unwrap();

    assert!(
        (estimate.mean - E).abs() < 0.01,
        "e: MC={:.5}, SE={:.5}",
        estimate.mean,
        estimate.std_error
    );
    assert_eq!(trial.capped_trials(), 0);
}

#[test]
fn test_integral_converges_to_closed_form() {
    let estimator = fixed(100_000, SEED);
    let mut trial = IntegralTrial::new(x2_sin_inv_x);
    let estimate = estimator.run(&mut trial).unwrap();

    assert_abs_diff_eq!(estimate.mean, X2_SIN_INV_X_INTEGRAL, epsilon = 0.01);
    // Within 4 standard errors as well
    assert!((estimate.mean - X2_SIN_INV_X_INTEGRAL).abs() < 4.0 * estimate.std_error);
}

#[test]
fn test_buffon_converges_to_pi() {
    let estimator = fixed(100_000, SEED);
    let mut trial = BuffonNeedleTrial::default();
    let estimate = estimator.run(&mut trial).unwrap();
    let pi = trial.pi_from_rate(estimate.mean).unwrap();

    assert!((pi - PI).abs() < 0.05, "π: MC={:.5}", pi);
}

#[test]
fn test_short_needle_still_estimates_pi() {
    let report = Experiment::Buffon {
        length: 0.5,
        spacing: 1.0,
    }
    .run(&fixed(200_000, SEED))
    .unwrap();

    assert!(
        report.error().unwrap().abs() < 5.0 * report.derived_std_error,
        "π: MC={:.5}, SE={:.5}",
        report.derived,
        report.derived_std_error
    );
}

#[test]
fn test_coverage_matches_nominal_level() {
    let estimator = fixed(20_000, SEED);
    let mut trial = CoverageTrial::new(5.0, 2.0, 20, 0.95).unwrap();
    let estimate = estimator.run(&mut trial).unwrap();

    assert_abs_diff_eq!(estimate.mean, 0.95, epsilon = 0.01);
}

// ============================================================================
// Reproducibility
// ============================================================================

#[test]
fn test_integral_scenario_is_bit_reproducible() {
    let estimator = fixed(100_000, SEED);
    let first = Experiment::integral().run(&estimator).unwrap();
    let second = Experiment::integral().run(&estimator).unwrap();

    assert_eq!(first.estimate.mean.to_bits(), second.estimate.mean.to_bits());
    assert_eq!(first, second);
}

#[test]
fn test_reseed_makes_estimates_independent_of_history() {
    let estimator = fixed(10_000, 0);
    let mut trial = IntegralTrial::new(x2_sin_inv_x);

    let mut fresh = SeededSource::from_seed(SEED);
    let a = estimator.estimate(&mut trial, &mut fresh).unwrap();

    let mut used = SeededSource::from_seed(1);
    let _ = estimator.estimate(&mut trial, &mut used).unwrap();
    let mut reseeded = used.reseed(SEED);
    let b = estimator.estimate(&mut trial, &mut reseeded).unwrap();

    assert_eq!(a, b);
}

#[test]
fn test_parallel_experiment_is_deterministic() {
    let estimator = fixed(60_000, SEED);
    let a = Experiment::euler().run_parallel(&estimator, 6).unwrap();
    let b = Experiment::euler().run_parallel(&estimator, 6).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.estimate.n_trials, 60_000);
    assert!((a.derived - E).abs() < 0.03);
}

#[test]
fn test_partial_means_trace_the_estimate() {
    let mut source = SeededSource::from_seed(SEED);
    let means: Vec<f64> = partial_means(StoppingTimeTrial::new(), &mut source)
        .take(50_000)
        .collect();

    let estimate = fixed(50_000, SEED)
        .run(&mut StoppingTimeTrial::new())
        .unwrap();
    assert_eq!(means.last().copied(), Some(estimate.mean));
}

// ============================================================================
// Edge policy
// ============================================================================

#[test]
fn test_zero_trials_is_undefined_for_every_experiment() {
    let estimator = fixed(0, SEED);
    for experiment in [
        Experiment::euler(),
        Experiment::integral(),
        Experiment::buffon(),
        Experiment::coverage(),
    ] {
        let err = experiment.run(&estimator).unwrap_err();
        assert!(err.is_undefined(), "{}: {:?}", experiment.name(), err);
    }
}

#[test]
fn test_no_crossings_is_undefined() {
    // A single trial with a tiny needle almost surely misses every line
    let estimator = fixed(1, SEED);
    let result = Experiment::Buffon {
        length: 1e-12,
        spacing: 1.0,
    }
    .run(&estimator);

    assert!(result.unwrap_err().is_undefined());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Parallel estimates depend only on seed and batch count.
    #[test]
    fn prop_parallel_depends_only_on_seed(seed in any::<u64>(), batches in 1usize..16) {
        let estimator = fixed(2_000, seed);
        let trial = || |s: &mut SeededSource| s.gen_uniform();
        let a = estimator.estimate_parallel(trial, batches).unwrap();
        let b = estimator.estimate_parallel(trial, batches).unwrap();
        prop_assert_eq!(a, b);
        prop_assert_eq!(a.n_trials, 2_000);
        prop_assert!((0.0..1.0).contains(&a.mean));
    }

    /// Stopping-time results are whole draw counts of at least two.
    #[test]
    fn prop_stopping_time_is_integral(seed in any::<u64>()) {
        let mut source = SeededSource::from_seed(seed);
        let means: Vec<f64> = partial_means(StoppingTimeTrial::new(), &mut source)
            .take(1)
            .collect();
        prop_assert!(means[0] >= 2.0);
        prop_assert_eq!(means[0].fract(), 0.0);
    }
}
