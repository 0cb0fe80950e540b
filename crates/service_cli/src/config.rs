//! Simulation configuration management.
//!
//! Handles loading of `montecarlo.toml` with environment variable override
//! support. Command-line flags are applied last, through [`CliOverrides`].

use serde::{Deserialize, Serialize};
use sim_engine::estimator::MAX_TRIALS;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "montecarlo.toml";

/// Prefix of the environment overrides, e.g. `MONTECARLO_SEED`.
pub const ENV_PREFIX: &str = "MONTECARLO_";

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Seed of the draw source
    pub seed: u64,

    /// Trials per estimate
    pub trials: u64,

    /// Convergence trace stride
    pub record_every: u64,

    /// Draw cap of the stopping-time trial
    pub stopping_cap: u32,

    /// Buffon needle length
    pub needle_length: f64,

    /// Buffon gridline spacing
    pub line_spacing: f64,

    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 20491720,
            trials: 100_000,
            record_every: 1_000,
            stopping_cap: sim_engine::trials::DEFAULT_DRAW_CAP,
            needle_length: 1.0,
            line_spacing: 1.0,
            log_level: "info".to_string(),
        }
    }
}

/// Settings given as command-line flags; `None` keeps the configured value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    /// `--seed`
    pub seed: Option<u64>,
    /// `--trials` of an estimation command
    pub trials: Option<u64>,
    /// `euler --cap`
    pub stopping_cap: Option<u32>,
    /// `buffon --length`
    pub needle_length: Option<f64>,
    /// `buffon --spacing`
    pub line_spacing: Option<f64>,
    /// `--verbose` forces the debug log level
    pub verbose: bool,
}

impl SimulationConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load `path` if given, else [`DEFAULT_CONFIG_FILE`] when it exists,
    /// else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// [`load_or_default`](Self::load_or_default), then environment
    /// overrides, then command-line flags.
    pub fn resolve(path: Option<&Path>, flags: &CliOverrides) -> Result<Self, ConfigError> {
        Ok(Self::load_or_default(path)?
            .with_env_override()?
            .with_cli_overrides(flags))
    }

    /// Apply `MONTECARLO_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(format!("{}{}", ENV_PREFIX, key)).ok())
    }

    /// Apply overrides from `lookup`, keyed by upper-case field name.
    ///
    /// Every unparsable value is reported in one [`ConfigError::Validation`].
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();

        override_field(&lookup, "SEED", &mut self.seed, &mut errors);
        override_field(&lookup, "TRIALS", &mut self.trials, &mut errors);
        override_field(&lookup, "RECORD_EVERY", &mut self.record_every, &mut errors);
        override_field(&lookup, "STOPPING_CAP", &mut self.stopping_cap, &mut errors);
        override_field(&lookup, "NEEDLE_LENGTH", &mut self.needle_length, &mut errors);
        override_field(&lookup, "LINE_SPACING", &mut self.line_spacing, &mut errors);

        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.log_level = log_level;
        }

        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Apply command-line flags, which take precedence over the file and
    /// the environment.
    #[must_use]
    pub fn with_cli_overrides(mut self, flags: &CliOverrides) -> Self {
        if let Some(seed) = flags.seed {
            self.seed = seed;
        }
        if let Some(trials) = flags.trials {
            self.trials = trials;
        }
        if let Some(cap) = flags.stopping_cap {
            self.stopping_cap = cap;
        }
        if let Some(length) = flags.needle_length {
            self.needle_length = length;
        }
        if let Some(spacing) = flags.line_spacing {
            self.line_spacing = spacing;
        }
        if flags.verbose {
            self.log_level = "debug".to_string();
        }
        self
    }

    /// Validate the settings shared by every command
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        // Zero trials is allowed and reported as undefined
        if self.trials > MAX_TRIALS {
            errors.push(format!(
                "trials {} exceeds maximum allowed ({})",
                self.trials, MAX_TRIALS
            ));
        }

        if self.record_every == 0 {
            errors.push("record_every must be greater than 0".to_string());
        }

        if self.stopping_cap == 0 {
            errors.push("stopping_cap must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Validate the needle geometry, which only the Buffon experiment uses
    pub fn validate_buffon(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !self.needle_length.is_finite() || self.needle_length <= 0.0 {
            errors.push(format!(
                "needle_length must be finite and positive, got {}",
                self.needle_length
            ));
        }

        if !self.line_spacing.is_finite() || self.line_spacing <= 0.0 {
            errors.push(format!(
                "line_spacing must be finite and positive, got {}",
                self.line_spacing
            ));
        }

        if self.needle_length > self.line_spacing {
            errors.push(format!(
                "needle_length {} exceeds line_spacing {}",
                self.needle_length, self.line_spacing
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load configuration from file and validate
    pub fn load_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }
}

fn override_field<T, F>(lookup: &F, key: &str, field: &mut T, errors: &mut Vec<String>)
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(key) {
        match raw.trim().parse() {
            Ok(value) => *field = value,
            Err(_) => errors.push(format!("{}{}='{}' cannot be parsed", ENV_PREFIX, key, raw)),
        }
    }
}

/// Configuration error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error reading {}: {reason}", .path.display())]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying error message
        reason: String,
    },

    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),

    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
