use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::OrderDepth;
use crate::values::{Quantity, Symbol, Timestamp};

/// Everything the exchange tells a trader on one tick
///
/// Products appear in `order_depths` only when the exchange published a
/// snapshot for them this tick. Positions for products never traded are
/// absent and read as flat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingState {
    #[serde(default)]
    pub timestamp: Timestamp,
    #[serde(default)]
    pub order_depths: BTreeMap<Symbol, OrderDepth>,
    #[serde(default)]
    pub position: BTreeMap<Symbol, Quantity>,
}

impl TradingState {
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            ..Default::default()
        }
    }

    /// Builder: attach a product snapshot
    pub fn with_depth(mut self, symbol: impl Into<Symbol>, depth: OrderDepth) -> Self {
        self.order_depths.insert(symbol.into(), depth);
        self
    }

    /// Builder: set the current position for a product
    pub fn with_position(mut self, symbol: impl Into<Symbol>, quantity: Quantity) -> Self {
        self.position.insert(symbol.into(), quantity);
        self
    }

    /// Current position for a product (flat if unknown)
    pub fn position_of(&self, symbol: &str) -> Quantity {
        self.position.get(symbol).copied().unwrap_or(0)
    }
}
