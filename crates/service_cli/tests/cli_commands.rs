//! Integration tests for the CLI commands.
//!
//! Drive the command layer the way the binary does, with output captured in
//! memory and configuration and trace files in temporary directories.

use std::io::Write;

use service_cli::commands::{draws, estimate};
use service_cli::{OutputFormat, SimulationConfig};
use sim_engine::experiments::Experiment;

fn options(config: &SimulationConfig, format: OutputFormat) -> estimate::EstimateOptions {
    estimate::EstimateOptions {
        trials: config.trials,
        record_every: config.record_every,
        seed: config.seed,
        trace: None,
        parallel: None,
        format,
    }
}

fn run_json(experiment: Experiment, options: &estimate::EstimateOptions) -> serde_json::Value {
    let mut buffer = Vec::new();
    estimate::run(&mut buffer, experiment, options).unwrap();
    serde_json::from_slice(&buffer).unwrap()
}

#[test]
fn test_config_file_drives_buffon() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("montecarlo.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        "seed = 7\ntrials = 50000\nneedle_length = 0.8\nline_spacing = 1.0"
    )
    .unwrap();

    let config = SimulationConfig::load_and_validate(&path).unwrap();
    let experiment = Experiment::Buffon {
        length: config.needle_length,
        spacing: config.line_spacing,
    };
    let value = run_json(experiment, &options(&config, OutputFormat::Json));

    assert_eq!(value["estimate"]["n_trials"], 50_000);
    let pi = value["derived"].as_f64().unwrap();
    assert!((pi - std::f64::consts::PI).abs() < 0.1, "π = {}", pi);
}

#[test]
fn test_default_integral_run_is_reproducible() {
    let config = SimulationConfig::default();
    let opts = options(&config, OutputFormat::Json);

    let first = run_json(Experiment::integral(), &opts);
    let second = run_json(Experiment::integral(), &opts);

    assert_eq!(first, second);
    let mean = first["estimate"]["mean"].as_f64().unwrap();
    assert!((mean - 0.286_529_536_419_421_7).abs() < 0.01);
}

#[test]
fn test_trace_file_written_as_csv() {
    let dir = tempfile::tempdir().unwrap();
    let trace_path = dir.path().join("euler.csv");
    let opts = estimate::EstimateOptions {
        trials: 5_000,
        record_every: 1_000,
        trace: Some(trace_path.clone()),
        ..options(&SimulationConfig::default(), OutputFormat::Table)
    };

    let mut buffer = Vec::new();
    estimate::run(&mut buffer, Experiment::euler(), &opts).unwrap();

    let csv = std::fs::read_to_string(&trace_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "trials,mean");
    assert_eq!(lines.len(), 6);
    assert!(lines[5].starts_with("5000,"));
    assert!(String::from_utf8(buffer).unwrap().contains("experiment   euler"));
}

#[test]
fn test_trace_file_written_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let trace_path = dir.path().join("buffon.json");
    let opts = estimate::EstimateOptions {
        trials: 2_000,
        record_every: 500,
        trace: Some(trace_path.clone()),
        ..options(&SimulationConfig::default(), OutputFormat::Json)
    };

    let mut buffer = Vec::new();
    estimate::run(&mut buffer, Experiment::buffon(), &opts).unwrap();

    let trace: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&trace_path).unwrap()).unwrap();
    let points = trace.as_array().unwrap();
    assert_eq!(points.len(), 4);
    // Buffon traces are in π units
    let last = points[3]["mean"].as_f64().unwrap();
    assert!(last > 2.0 && last < 4.5);
}

#[test]
fn test_zero_trials_prints_undefined_table() {
    let opts = estimate::EstimateOptions {
        trials: 0,
        ..options(&SimulationConfig::default(), OutputFormat::Table)
    };
    let mut buffer = Vec::new();
    estimate::run(&mut buffer, Experiment::euler(), &opts).unwrap();
    assert!(String::from_utf8(buffer).unwrap().contains("undefined"));
}

#[test]
fn test_draws_from_config_seed() {
    let config = SimulationConfig::default();
    let mut a = Vec::new();
    let mut b = Vec::new();
    draws::run(&mut a, draws::Family::Uniform, &[-1.0, 1.0], 20, config.seed, OutputFormat::Json)
        .unwrap();
    draws::run(&mut b, draws::Family::Uniform, &[-1.0, 1.0], 20, config.seed, OutputFormat::Json)
        .unwrap();
    assert_eq!(a, b);

    let values: Vec<f64> = serde_json::from_slice(&a).unwrap();
    assert_eq!(values.len(), 20);
    assert!(values.iter().all(|v| (-1.0..1.0).contains(v)));
}
