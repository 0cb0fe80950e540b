//! montecarlo - Command Line Monte Carlo Estimation
//!
//! This is the operational entry point for the simulation workspace.
//!
//! # Commands
//!
//! - `montecarlo draws --family normal --params 0,1` - Print seeded draws
//! - `montecarlo euler` - Estimate e from a sum-of-uniforms stopping time
//! - `montecarlo integral` - Estimate ∫ x²·sin(1/x) dx
//! - `montecarlo buffon` - Estimate π with Buffon's needle
//! - `montecarlo coverage` - Empirical coverage of a normal confidence interval
//!
//! Settings come from `montecarlo.toml` (or `--config`), then `MONTECARLO_*`
//! environment variables, then command-line flags.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use service_cli::commands::{self, draws::Family, estimate::EstimateOptions};
use service_cli::{CliOverrides, OutputFormat, SimulationConfig};
use sim_engine::experiments::Experiment;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Seeded Monte Carlo estimation CLI
#[derive(Parser)]
#[command(name = "montecarlo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (default: montecarlo.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed of the draw source
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Write the convergence trace to this file (.json or CSV)
    #[arg(long, global = true)]
    trace: Option<PathBuf>,

    /// Split the trials over this many parallel batches
    #[arg(long, global = true)]
    parallel: Option<usize>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print draws from a distribution
    Draws {
        /// Distribution family
        #[arg(long, value_enum)]
        family: Family,

        /// Family parameters, comma separated (standard member when omitted)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        params: Vec<f64>,

        /// Number of draws
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },

    /// Estimate e as the mean number of uniforms whose sum exceeds 1
    Euler {
        /// Number of trials
        #[arg(short = 'n', long)]
        trials: Option<u64>,

        /// Draw cap per trial
        #[arg(long)]
        cap: Option<u32>,
    },

    /// Estimate ∫ x²·sin(1/x) dx over [lower, upper)
    Integral {
        /// Number of trials
        #[arg(short = 'n', long)]
        trials: Option<u64>,

        /// Lower bound
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        lower: f64,

        /// Upper bound
        #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
        upper: f64,
    },

    /// Estimate π with Buffon's needle
    Buffon {
        /// Number of trials
        #[arg(short = 'n', long)]
        trials: Option<u64>,

        /// Needle length
        #[arg(long)]
        length: Option<f64>,

        /// Gridline spacing
        #[arg(long)]
        spacing: Option<f64>,
    },

    /// Estimate the coverage probability of a known-σ confidence interval
    Coverage {
        /// Number of trials
        #[arg(short = 'n', long)]
        trials: Option<u64>,

        /// Population mean
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        mean: f64,

        /// Population standard deviation
        #[arg(long, default_value_t = 1.0)]
        std_dev: f64,

        /// Observations per simulated sample
        #[arg(long, default_value_t = 30)]
        sample_size: usize,

        /// Confidence level
        #[arg(long, default_value_t = 0.95)]
        level: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = SimulationConfig::resolve(cli.config.as_deref(), &flag_overrides(&cli))?;
    config.validate()?;
    if matches!(cli.command, Commands::Buffon { .. }) {
        config.validate_buffon()?;
    }

    // Initialise tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str())),
        )
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let experiment = match cli.command {
        Commands::Draws {
            family,
            params,
            count,
        } => {
            commands::draws::reject_estimation_flags(cli.trace.as_deref(), cli.parallel)?;
            commands::draws::run(&mut out, family, &params, count, config.seed, cli.format)?;
            return Ok(());
        }
        Commands::Euler { .. } => Experiment::Euler {
            cap: config.stopping_cap,
        },
        Commands::Integral { lower, upper, .. } => Experiment::Integral { lower, upper },
        Commands::Buffon { .. } => Experiment::Buffon {
            length: config.needle_length,
            spacing: config.line_spacing,
        },
        Commands::Coverage {
            mean,
            std_dev,
            sample_size,
            level,
            ..
        } => Experiment::Coverage {
            mean,
            std_dev,
            sample_size,
            level,
        },
    };

    let options = EstimateOptions {
        trials: config.trials,
        record_every: config.record_every,
        seed: config.seed,
        trace: cli.trace,
        parallel: cli.parallel,
        format: cli.format,
    };
    commands::estimate::run(&mut out, experiment, &options)?;
    Ok(())
}

/// Settings the parsed flags override.
fn flag_overrides(cli: &Cli) -> CliOverrides {
    let mut flags = CliOverrides {
        seed: cli.seed,
        verbose: cli.verbose,
        ..CliOverrides::default()
    };
    match &cli.command {
        Commands::Draws { .. } => {}
        Commands::Euler { trials, cap } => {
            flags.trials = *trials;
            flags.stopping_cap = *cap;
        }
        Commands::Buffon {
            trials,
            length,
            spacing,
        } => {
            flags.trials = *trials;
            flags.needle_length = *length;
            flags.line_spacing = *spacing;
        }
        Commands::Integral { trials, .. } | Commands::Coverage { trials, .. } => {
            flags.trials = *trials;
        }
    }
    flags
}
