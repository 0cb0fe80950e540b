//! Criterion benchmarks for the estimator and its trials.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sim_engine::estimator::{EstimatorConfig, MonteCarloEstimator};
use sim_engine::experiments::Experiment;
use sim_engine::trials::{x2_sin_inv_x, IntegralTrial, StoppingTimeTrial};

const TRIALS: u64 = 100_000;

fn estimator(n: u64) -> MonteCarloEstimator {
    let config = EstimatorConfig::builder()
        .trials(n)
        .seed(20491720)
        .build()
        .expect("valid config");
    MonteCarloEstimator::new(config).expect("valid estimator")
}

fn bench_trials(c: &mut Criterion) {
    let estimator = estimator(TRIALS);
    let mut group = c.benchmark_group("trials");
    group.throughput(Throughput::Elements(TRIALS));

    group.bench_function("stopping_time", |b| {
        b.iter(|| {
            let mut trial = StoppingTimeTrial::new();
            black_box(estimator.run(&mut trial).expect("estimate"))
        });
    });
    group.bench_function("integral", |b| {
        b.iter(|| {
            let mut trial = IntegralTrial::new(x2_sin_inv_x);
            black_box(estimator.run(&mut trial).expect("estimate"))
        });
    });
    for experiment in [Experiment::buffon(), Experiment::coverage()] {
        group.bench_function(experiment.name(), |b| {
            b.iter(|| black_box(experiment.run(&estimator).expect("report")));
        });
    }
    group.finish();
}

fn bench_parallel(c: &mut Criterion) {
    let estimator = estimator(TRIALS * 10);
    let mut group = c.benchmark_group("parallel_euler");
    group.throughput(Throughput::Elements(TRIALS * 10));
    for &batches in &[1usize, 4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(batches), &batches, |b, &batches| {
            b.iter(|| {
                black_box(
                    Experiment::euler()
                        .run_parallel(&estimator, batches)
                        .expect("report"),
                )
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_trials, bench_parallel);
criterion_main!(benches);
