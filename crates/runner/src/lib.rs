//! Atoll Runner - hosts the trader outside the exchange
//!
//! Provides the collaborators the trading engine deliberately leaves out:
//!
//! - **Persistence**: JSON trader data, decoded forgivingly each tick
//! - **Session**: runs a strategy tick by tick, carrying trader data
//! - **Feed**: replays recorded ticks over a channel
//! - **Config**: JSON configs for the trader and the rate table
//!
//! ## Architecture
//!
//! ```text
//!   ticks.json ─► TickFeed ──mpsc──► replay ─► TraderSession ─► Strategy
//!                                      │            ▲  │
//!                                      │            │  ▼
//!                                      │       trader data (JSON)
//!                                      ▼
//!                                 order sink (mpsc)
//! ```

pub mod config;
pub mod error;
pub mod feed;
pub mod persistence;
pub mod session;

// Re-export main types
pub use config::{RunnerConfig, load_rate_table};
pub use error::{PersistenceError, PersistenceResult, RunnerError, RunnerResult};
pub use feed::{ReplayReport, TickFeed, replay};
pub use persistence::StateCodec;
pub use session::{TickOutcome, TraderSession, run_tick};
