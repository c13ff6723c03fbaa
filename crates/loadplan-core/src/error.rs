//! Error types for reading planner configuration and reference data.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for reference-data readers.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while reading the aircraft database, the ULD
/// catalog or a unit manifest.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("expected a JSON array in {0}")]
    NotAnArray(PathBuf),

    #[error("invalid unit #{index}: {reason}")]
    InvalidUnit { index: usize, reason: String },
}

/// Result type alias for planner configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading or writing `loadplan.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
