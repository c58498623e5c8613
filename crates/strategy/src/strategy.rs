//! Strategy Trait
//!
//! A strategy sees one tick of exchange data plus the memory it returned on
//! the previous tick, and answers with orders and its next memory. It never
//! serializes anything itself: persistence belongs to whoever hosts it.

use atoll_core::{Order, Symbol, TradingState};
use serde::{Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;

/// Everything a strategy produces for one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TraderOutput<M> {
    /// Orders per product, in emission order
    pub orders: BTreeMap<Symbol, Vec<Order>>,
    /// Conversion requests (unused by the taker, always 0)
    pub conversions: i64,
    /// Memory to hand back on the next tick
    pub memory: M,
}

impl<M> TraderOutput<M> {
    /// Orders for a product (empty slice if none)
    pub fn orders_for(&self, symbol: &str) -> &[Order] {
        self.orders.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of orders across products
    pub fn order_count(&self) -> usize {
        self.orders.values().map(Vec::len).sum()
    }
}

/// Strategy trait - implement this for your trading strategy
pub trait Strategy {
    /// State carried between ticks. `Default` is what a strategy starts
    /// from when nothing usable was persisted.
    type Memory: Default + Clone + Serialize + DeserializeOwned;

    /// Strategy name for logging
    fn name(&self) -> &str;

    /// Decide this tick's orders
    fn run(&self, state: &TradingState, memory: Self::Memory) -> TraderOutput<Self::Memory>;
}
