//! Atoll Strategy Framework
//!
//! Provides the per-tick trading engine:
//! - Strategy trait: one call per tick, memory passed in and returned
//! - Product configuration table with a global fallback
//! - Running fair-value estimates carried between ticks
//! - The fair-value taker
//!
//! ## Architecture
//!
//! ```text
//!   TradingState (tick) ──┐
//!                         ▼
//!   TraderState (prev) ─► FairValueTaker ─► orders per product
//!                         │
//!                         └──────────────► TraderState (next)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use atoll_core::{OrderDepth, TradingState};
//! use atoll_strategy::{FairValueTaker, Strategy, TraderConfig, TraderState};
//!
//! let strategy = FairValueTaker::new(TraderConfig::default());
//! let tick = TradingState::new(0)
//!     .with_depth("KELP", OrderDepth::new().with_bid(99, 5).with_ask(101, 5));
//! let output = strategy.run(&tick, TraderState::default());
//! assert_eq!(output.memory.fair_value("KELP"), Some(100.0));
//! ```

pub mod config;
pub mod error;
pub mod fair_value;
pub mod fair_value_taker;
pub mod strategy;

// Re-export main types
pub use config::{ProductParams, TraderConfig};
pub use error::{ConfigError, ConfigResult};
pub use fair_value::{FairValueEstimate, TraderState};
pub use fair_value_taker::FairValueTaker;
pub use strategy::{Strategy, TraderOutput};
