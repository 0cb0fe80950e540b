//! Draws command implementation
//!
//! Prints raw draws from a seeded source for one distribution family.

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use sim_core::{DistributionSpec, SeededSource};
use tracing::info;

use crate::output::{write_draws, OutputFormat};
use crate::{CliError, Result};

/// Distribution family selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Family {
    /// Uniform on [low, high): `--params low,high`
    Uniform,
    /// Normal: `--params mean,std_dev`
    Normal,
    /// Exponential: `--params rate`
    Exponential,
    /// Poisson: `--params lambda`
    Poisson,
    /// Bernoulli: `--params p`
    Bernoulli,
}

impl Family {
    fn arity(self) -> usize {
        match self {
            Self::Uniform | Self::Normal => 2,
            Self::Exponential | Self::Poisson | Self::Bernoulli => 1,
        }
    }
}

/// Builds a distribution specification from positional parameters.
///
/// An empty parameter list selects the standard member of the family.
pub fn spec_from_params(family: Family, params: &[f64]) -> Result<DistributionSpec> {
    if params.is_empty() {
        return Ok(match family {
            Family::Uniform => DistributionSpec::standard_uniform(),
            Family::Normal => DistributionSpec::normal(0.0, 1.0),
            Family::Exponential => DistributionSpec::exponential(1.0),
            Family::Poisson => DistributionSpec::poisson(1.0),
            Family::Bernoulli => DistributionSpec::bernoulli(0.5),
        });
    }
    if params.len() != family.arity() {
        return Err(CliError::invalid_argument(format!(
            "{:?} takes {} parameter(s), got {}",
            family,
            family.arity(),
            params.len()
        )));
    }
    Ok(match family {
        Family::Uniform => DistributionSpec::uniform(params[0], params[1]),
        Family::Normal => DistributionSpec::normal(params[0], params[1]),
        Family::Exponential => DistributionSpec::exponential(params[0]),
        Family::Poisson => DistributionSpec::poisson(params[0]),
        Family::Bernoulli => DistributionSpec::bernoulli(params[0]),
    })
}

/// Rejects the estimation-only global flags, which have no meaning for raw
/// draws. `--format` applies to draws as well.
pub fn reject_estimation_flags(trace: Option<&Path>, parallel: Option<usize>) -> Result<()> {
    if trace.is_some() {
        return Err(CliError::invalid_argument("--trace does not apply to draws"));
    }
    if parallel.is_some() {
        return Err(CliError::invalid_argument("--parallel does not apply to draws"));
    }
    Ok(())
}

/// Run the draws command
pub fn run<W: Write>(
    out: &mut W,
    family: Family,
    params: &[f64],
    count: usize,
    seed: u64,
    format: OutputFormat,
) -> Result<()> {
    let spec = spec_from_params(family, params)?;
    info!("Drawing {} values from {:?} with seed {}", count, spec, seed);

    let mut source = SeededSource::from_seed(seed);
    let draws: Vec<f64> = source.draws(&spec)?.take(count).collect();
    write_draws(out, &draws, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        assert_eq!(
            spec_from_params(Family::Normal, &[]).unwrap(),
            DistributionSpec::normal(0.0, 1.0)
        );
    }

    #[test]
    fn test_wrong_arity() {
        assert!(matches!(
            spec_from_params(Family::Uniform, &[1.0]),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_estimation_flags_rejected() {
        assert!(reject_estimation_flags(None, None).is_ok());

        let err = reject_estimation_flags(Some(Path::new("draws.csv")), None).unwrap_err();
        assert!(err.to_string().contains("--trace"));
        let err = reject_estimation_flags(None, Some(4)).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(ref m) if m.contains("--parallel")));
    }

    #[test]
    fn test_draws_are_reproducible() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        run(&mut a, Family::Exponential, &[2.0], 5, 42, OutputFormat::Table).unwrap();
        run(&mut b, Family::Exponential, &[2.0], 5, 42, OutputFormat::Table).unwrap();
        assert_eq!(a, b);
        assert_eq!(String::from_utf8(a).unwrap().lines().count(), 5);
    }

    #[test]
    fn test_invalid_parameters_print_nothing() {
        let mut out = Vec::new();
        let err = run(&mut out, Family::Poisson, &[-1.0], 5, 42, OutputFormat::Table).unwrap_err();
        assert!(matches!(err, CliError::Simulation(_)));
        assert!(out.is_empty());
    }
}
