//! Atoll Core Domain
//!
//! Pure domain types shared by the trading engine and the runner.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{Order, OrderDepth, Side, TradingState};
pub use values::{Price, Quantity, Symbol, Timestamp};
