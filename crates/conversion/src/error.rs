use thiserror::Error;

/// Errors raised while building an optimizer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Rate {from} -> {to} must be finite and positive, got {rate}")]
    InvalidRate { from: String, to: String, rate: f64 },

    #[error("Starting amount must be finite, got {0}")]
    InvalidAmount(f64),
}

pub type ConversionResult<T> = std::result::Result<T, ConversionError>;
