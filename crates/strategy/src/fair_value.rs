//! Running fair-value estimates
//!
//! Each product keeps the arithmetic mean of every reference price seen so
//! far. The estimates live in [`TraderState`], which the caller carries from
//! one tick to the next.

use atoll_core::Symbol;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Running arithmetic mean of observed prices for one product
///
/// `count == 0` means nothing has been observed and `avg` is meaningless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FairValueEstimate {
    pub avg: f64,
    pub count: u64,
}

impl FairValueEstimate {
    /// Estimate seeded with a single observation
    pub fn from_price(price: f64) -> Self {
        Self {
            avg: price,
            count: 1,
        }
    }

    /// Fold one more price into the mean
    pub fn observe(&mut self, price: f64) {
        if self.count == 0 {
            *self = Self::from_price(price);
            return;
        }
        let count = self.count as f64;
        self.avg = (self.avg * count + price) / (count + 1.0);
        self.count += 1;
    }

    /// Current mean, if anything has been observed
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.avg)
    }
}

/// State carried between ticks by the fair-value taker
///
/// `averages` is required when decoding: a blob without it is treated as
/// foreign and replaced by an empty state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraderState {
    pub averages: BTreeMap<Symbol, FairValueEstimate>,
}

impl TraderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimate for a product, if one was ever created
    pub fn estimate(&self, symbol: &str) -> Option<&FairValueEstimate> {
        self.averages.get(symbol)
    }

    /// Record a reference price, creating the estimate on first sight
    pub fn observe(&mut self, symbol: &str, price: f64) -> FairValueEstimate {
        let estimate = self.averages.entry(symbol.to_string()).or_default();
        estimate.observe(price);
        *estimate
    }

    /// Running mean for a product
    pub fn fair_value(&self, symbol: &str) -> Option<f64> {
        self.estimate(symbol).and_then(FairValueEstimate::mean)
    }

    pub fn is_empty(&self) -> bool {
        self.averages.is_empty()
    }
}
