//! Trader Session - hosts a strategy across ticks
//!
//! The session is the strategy's persistence collaborator: it decodes the
//! stored trader data before each tick, runs the strategy, and stores the
//! re-encoded memory for the next one.

use crate::persistence::StateCodec;
use atoll_core::{Order, Symbol, Timestamp, TradingState};
use atoll_strategy::Strategy;
use std::collections::BTreeMap;

/// What the host receives back for one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub timestamp: Timestamp,
    /// Orders per product, in emission order
    pub orders: BTreeMap<Symbol, Vec<Order>>,
    pub conversions: i64,
    /// Serialized memory to persist and replay next tick
    pub trader_data: String,
}

impl TickOutcome {
    /// All orders across products
    pub fn all_orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values().flatten()
    }
}

/// Run one tick from serialized trader data to serialized trader data.
///
/// If the new memory cannot be encoded the incoming trader data is passed
/// through unchanged.
pub fn run_tick<S: Strategy>(
    strategy: &S,
    state: &TradingState,
    trader_data: Option<&str>,
) -> TickOutcome {
    let memory: S::Memory = StateCodec::decode_or_default(trader_data);
    let output = strategy.run(state, memory);

    let trader_data = match StateCodec::encode(&output.memory) {
        Ok(blob) => blob,
        Err(e) => {
            log::error!(
                "[{}] keeping previous trader data at t={}: {}",
                strategy.name(),
                state.timestamp,
                e
            );
            trader_data.unwrap_or_default().to_string()
        }
    };

    TickOutcome {
        timestamp: state.timestamp,
        orders: output.orders,
        conversions: output.conversions,
        trader_data,
    }
}

/// Session holding a strategy and its persisted trader data
pub struct TraderSession<S: Strategy> {
    strategy: S,
    trader_data: Option<String>,
    ticks: u64,
}

impl<S: Strategy> TraderSession<S> {
    /// Create a session with no prior trader data
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            trader_data: None,
            ticks: 0,
        }
    }

    /// Resume from previously persisted trader data
    pub fn with_trader_data(mut self, trader_data: impl Into<String>) -> Self {
        self.trader_data = Some(trader_data.into());
        self
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Trader data that will be fed into the next tick
    pub fn trader_data(&self) -> Option<&str> {
        self.trader_data.as_deref()
    }

    /// Number of ticks processed
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Process one tick and persist the resulting memory
    pub fn on_tick(&mut self, state: &TradingState) -> TickOutcome {
        let outcome = run_tick(&self.strategy, state, self.trader_data.as_deref());
        self.trader_data = Some(outcome.trader_data.clone());
        self.ticks += 1;

        log::debug!(
            "[{}] t={} orders={} trader_data={}",
            self.strategy.name(),
            state.timestamp,
            outcome.all_orders().count(),
            outcome.trader_data
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atoll_core::OrderDepth;
    use atoll_strategy::{FairValueTaker, TraderConfig};

    fn kelp_tick(timestamp: i64, bid: i64, ask: i64) -> TradingState {
        TradingState::new(timestamp)
            .with_depth("KELP", OrderDepth::new().with_bid(bid, 10).with_ask(ask, 10))
    }

    #[test]
    fn test_session_persists_between_ticks() {
        let mut session = TraderSession::new(FairValueTaker::new(TraderConfig::default()));
        assert!(session.trader_data().is_none());

        session.on_tick(&kelp_tick(0, 99, 101));
        session.on_tick(&kelp_tick(100, 101, 103));

        assert_eq!(session.ticks(), 2);
        assert_eq!(
            session.trader_data(),
            Some(r#"{"averages":{"KELP":{"avg":101.0,"count":2}}}"#)
        );
    }

    #[test]
    fn test_run_tick_is_idempotent() {
        let strategy = FairValueTaker::new(TraderConfig::default());
        let prior = r#"{"averages":{"KELP":{"avg":110.0,"count":20}}}"#;
        let state = kelp_tick(300, 99, 101);

        let first = run_tick(&strategy, &state, Some(prior));
        let second = run_tick(&strategy, &state, Some(prior));
        assert_eq!(first, second);
        assert_eq!(first.conversions, 0);
        // Ask 101 < ~109.5 * 0.99
        assert_eq!(first.orders["KELP"], vec![Order::buy("KELP", 101, 10)]);
    }

    #[test]
    fn test_corrupt_trader_data_starts_fresh() {
        let strategy = FairValueTaker::new(TraderConfig::default());
        let outcome = run_tick(&strategy, &kelp_tick(0, 99, 101), Some("{{garbage"));
        assert_eq!(
            outcome.trader_data,
            r#"{"averages":{"KELP":{"avg":100.0,"count":1}}}"#
        );
        assert_eq!(outcome.all_orders().count(), 0);
    }
}
