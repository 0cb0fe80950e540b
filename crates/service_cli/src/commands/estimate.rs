//! Estimate command implementation
//!
//! Runs one experiment (euler, integral, buffon or coverage) through the
//! generic estimator and prints its report.

use std::io::Write;
use std::path::PathBuf;

use sim_core::SimError;
use sim_engine::estimator::{EstimatorConfig, MonteCarloEstimator};
use sim_engine::experiments::Experiment;
use tracing::info;

use crate::output::{write_report, write_undefined, OutputFormat};
use crate::{CliError, Result};

/// Settings shared by every estimation subcommand
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateOptions {
    /// Trials per estimate
    pub trials: u64,
    /// Convergence trace stride
    pub record_every: u64,
    /// Source seed
    pub seed: u64,
    /// Write the convergence trace here (`.json` or CSV)
    pub trace: Option<PathBuf>,
    /// Run in this many parallel batches
    pub parallel: Option<usize>,
    /// Output format
    pub format: OutputFormat,
}

/// Run an experiment
pub fn run<W: Write>(out: &mut W, experiment: Experiment, options: &EstimateOptions) -> Result<()> {
    info!("Starting {} estimation...", experiment.name());
    info!("  Trials: {}", options.trials);
    info!("  Seed: {}", options.seed);

    let config = EstimatorConfig::builder()
        .trials(options.trials)
        .record_every(options.record_every)
        .seed(options.seed)
        .build()?;
    let estimator = MonteCarloEstimator::new(config)?;

    let outcome = match (&options.trace, options.parallel) {
        (Some(_), Some(_)) => {
            return Err(CliError::invalid_argument(
                "--trace and --parallel cannot be combined",
            ))
        }
        (Some(path), None) => experiment.run_with_trace(&estimator).and_then(|(report, trace)| {
            trace.save(path)?;
            info!("Convergence trace written to {}", path.display());
            Ok(report)
        }),
        (None, Some(batches)) => {
            info!("  Parallel batches: {}", batches);
            experiment.run_parallel(&estimator, batches)
        }
        (None, None) => experiment.run(&estimator),
    };

    match outcome {
        Ok(report) => write_report(out, &report, options.format)?,
        Err(SimError::UndefinedResult { reason }) => {
            info!("Result undefined: {}", reason);
            write_undefined(out, &experiment, &reason, options.format)?;
        }
        Err(err) => return Err(err.into()),
    }

    info!("Estimation complete");
    Ok(())
}
