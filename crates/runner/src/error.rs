//! Error types for the runner crate

use atoll_conversion::ConversionError;
use atoll_strategy::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Trader state could not be encoded or decoded
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Deserialization failed: {0}")]
    Deserialization(String),
}

pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;

/// Runner-level errors (files, configuration, wiring)
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid trader config: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid rate table: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Invalid runner setting: {0}")]
    InvalidSetting(String),
}

pub type RunnerResult<T> = std::result::Result<T, RunnerError>;
