//! Monte Carlo CLI library.
//!
//! Configuration, commands and output rendering behind the `montecarlo`
//! binary, exposed as a library so they can be tested without a process.
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate orchestrates `sim_core` and
//! `sim_engine` to provide a unified command-line interface.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use config::{CliOverrides, ConfigError, SimulationConfig};
pub use error::{CliError, Result};
pub use output::OutputFormat;
