use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unsupported document format for {0:?}: expected a .toml or .json file")]
    UnsupportedFormat(PathBuf),

    #[error("Failed to parse document {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },

    #[error("Invalid labels in {path:?}: {message}")]
    Labels { path: PathBuf, message: String },

    #[error("An I/O error occurred for {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("An error occurred during JSON serialization/deserialization: {0}")]
    JsonError(#[from] serde_json::Error),
}
