//! Report rendering for the terminal and for machine consumption.

use std::io::Write;

use clap::ValueEnum;
use serde_json::json;
use sim_engine::experiments::{Experiment, ExperimentReport};

use crate::Result;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned key/value table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Writes an experiment report.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &ExperimentReport,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            let estimate = &report.estimate;
            writeln!(out, "{:<12} {}", "experiment", report.experiment.name())?;
            writeln!(out, "{:<12} {}", "trials", estimate.n_trials)?;
            writeln!(out, "{:<12} {:.6}", "mean", estimate.mean)?;
            writeln!(out, "{:<12} {:.6}", "std error", estimate.std_error)?;
            writeln!(
                out,
                "{:<12} {:.6} +/- {:.6}",
                "derived",
                report.derived,
                1.96 * report.derived_std_error
            )?;
            if let Some(reference) = report.reference {
                writeln!(out, "{:<12} {:.6}", "reference", reference)?;
            }
            if let Some(error) = report.error() {
                writeln!(out, "{:<12} {:+.6}", "error", error)?;
            }
            if let Some(capped) = report.capped_trials {
                writeln!(out, "{:<12} {}", "capped", capped)?;
            }
        }
    }
    Ok(())
}

/// Writes the outcome of an experiment whose result is undefined.
pub fn write_undefined<W: Write>(
    out: &mut W,
    experiment: &Experiment,
    reason: &str,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let value = json!({
                "experiment": experiment,
                "result": "undefined",
                "reason": reason,
            });
            serde_json::to_writer_pretty(&mut *out, &value)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            writeln!(out, "{:<12} {}", "experiment", experiment.name())?;
            writeln!(out, "{:<12} undefined ({})", "result", reason)?;
        }
    }
    Ok(())
}

/// Writes raw draws, one per line or as a JSON array.
pub fn write_draws<W: Write>(out: &mut W, draws: &[f64], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, draws)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            for draw in draws {
                writeln!(out, "{}", draw)?;
            }
        }
    }
    Ok(())
}
