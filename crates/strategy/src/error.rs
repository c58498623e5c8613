//! Error types for the strategy crate

use atoll_core::{Quantity, Symbol};
use thiserror::Error;

/// Rejected trader configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Default fair value for {symbol} must be finite and positive, got {value}")]
    InvalidFairValue { symbol: Symbol, value: f64 },

    #[error("Threshold for {symbol} must be within [0, 1), got {value}")]
    InvalidThreshold { symbol: Symbol, value: f64 },

    #[error("Position limit for {symbol} must not be negative, got {limit}")]
    InvalidPositionLimit { symbol: Symbol, limit: Quantity },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
