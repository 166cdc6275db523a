use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Upper bound on the number of decimals rendered in console tables.
const MAX_PRECISION: usize = 12;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

/// Contains parameters for the evaluation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Evaluate the objectives matrix and the per-objective solutions matrices
    /// concurrently on the rayon thread pool.
    pub parallel: bool,
    /// Consistency ratios above this value are reported as unacceptable.
    /// The engine never rejects a matrix because of it.
    pub consistency_threshold: f64,
}

/// Contains parameters for rendering evaluation results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    /// Number of decimals shown in console tables.
    pub precision: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
    pub filter: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            parallel: true,
            consistency_threshold: 0.1,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            precision: 4,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Rejects settings the engine or the report layer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.engine.consistency_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "engine.consistency_threshold must be a non-negative number, got {}",
                threshold
            )));
        }
        if self.output.precision > MAX_PRECISION {
            return Err(ConfigError::ValidationError(format!(
                "output.precision must be at most {}, got {}",
                MAX_PRECISION, self.output.precision
            )));
        }
        Ok(())
    }
}
