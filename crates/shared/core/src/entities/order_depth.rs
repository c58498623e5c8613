//! Order depth snapshot for a single product
//!
//! The exchange publishes one snapshot per product per tick. Bid depth is
//! stored with positive quantities, ask depth with negative quantities.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::values::{Price, Quantity};

/// Outstanding depth for one product at one tick
///
/// BTreeMap keeps price levels sorted: the best bid is the last bid key,
/// the best ask is the first ask key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDepth {
    /// Bid levels: price -> quantity (positive)
    #[serde(default)]
    pub buy_orders: BTreeMap<Price, Quantity>,
    /// Ask levels: price -> quantity (negative)
    #[serde(default)]
    pub sell_orders: BTreeMap<Price, Quantity>,
}

impl OrderDepth {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bid level (quantity stored as positive)
    pub fn with_bid(mut self, price: Price, size: Quantity) -> Self {
        self.buy_orders.insert(price, size.saturating_abs());
        self
    }

    /// Add an ask level (quantity stored as negative)
    pub fn with_ask(mut self, price: Price, size: Quantity) -> Self {
        self.sell_orders.insert(price, -size.saturating_abs());
        self
    }

    // === Price Queries ===

    /// Best (highest) bid price and its quantity
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.buy_orders.iter().next_back().map(|(p, q)| (*p, *q))
    }

    /// Best (lowest) ask price and its quantity, as stored (negative)
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.sell_orders.iter().next().map(|(p, q)| (*p, *q))
    }

    /// Reference price for the book.
    ///
    /// Two-sided: midpoint of best bid and best ask. One-sided: the best
    /// price of the side that exists. Empty: `None`.
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid, _)), Some((ask, _))) => Some((bid as f64 + ask as f64) / 2.0),
            (Some((bid, _)), None) => Some(bid as f64),
            (None, Some((ask, _))) => Some(ask as f64),
            (None, None) => None,
        }
    }

    /// Spread (ask - bid); negative for a crossed book
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid, _)), Some((ask, _))) => Some(ask - bid),
            _ => None,
        }
    }

    /// Check if book is empty
    pub fn is_empty(&self) -> bool {
        self.buy_orders.is_empty() && self.sell_orders.is_empty()
    }
}
