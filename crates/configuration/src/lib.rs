use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, EngineSettings, LoggingSettings, OutputFormat, OutputSettings};

/// Base name of the optional configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "ahp";

/// Prefix of the environment variables that override file settings,
/// e.g. `AHP__ENGINE__PARALLEL=false`.
pub const ENV_PREFIX: &str = "AHP";

/// Loads the application configuration.
///
/// Built-in defaults are overridden by the configuration file (the given
/// `path`, or an optional `ahp.toml` in the working directory), which in turn
/// is overridden by `AHP__`-prefixed environment variables. The result is
/// validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let builder = config::Config::builder();

    let builder = match path {
        // An explicitly requested file must exist.
        Some(path) => builder.add_source(config::File::from(path)),
        None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
    };

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = settings.try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.engine.parallel);
        assert_eq!(config.engine.consistency_threshold, 0.1);
        assert_eq!(config.output.format, OutputFormat::Table);
        assert_eq!(config.output.precision, 4);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_validation_rejects_bad_threshold() {
        let mut config = Config::default();
        config.engine.consistency_threshold = -0.5;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        config.engine.consistency_threshold = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_excessive_precision() {
        let mut config = Config::default();
        config.output.precision = 20;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[engine]\nparallel = false\n\n[output]\nformat = \"json\""
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert!(!config.engine.parallel);
        assert_eq!(config.engine.consistency_threshold, 0.1);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.precision, 4);
    }

    #[test]
    fn test_invalid_file_values_fail_validation() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[output]\nprecision = 40").unwrap();

        assert!(matches!(
            load_config(Some(file.path())),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = load_config(Some(Path::new("/nonexistent/ahp-settings.toml")));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
