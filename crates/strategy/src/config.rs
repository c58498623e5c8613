//! Product configuration table
//!
//! Maps each known product to its default fair value and deviation
//! threshold, with a global fallback pair for anything unlisted.

use crate::error::{ConfigError, ConfigResult};
use atoll_core::{Quantity, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_POSITION_LIMIT: Quantity = 50;
pub const DEFAULT_FAIR_VALUE: f64 = 100.0;
pub const DEFAULT_THRESHOLD: f64 = 0.01;

/// Name used for the fallback entry in validation errors
const FALLBACK_SYMBOL: &str = "<fallback>";

/// Per-product trading parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductParams {
    /// Fair value used until the first mid price is observed
    pub default_fair_value: f64,
    /// Minimum relative deviation from fair value to trade (0.01 = 1%)
    pub threshold: f64,
    /// Overrides the global position limit for this product
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_limit: Option<Quantity>,
}

impl ProductParams {
    pub fn new(default_fair_value: f64, threshold: f64) -> Self {
        Self {
            default_fair_value,
            threshold,
            position_limit: None,
        }
    }

    pub fn with_position_limit(mut self, limit: Quantity) -> Self {
        self.position_limit = Some(limit);
        self
    }

    fn validate(&self, symbol: &str) -> ConfigResult<()> {
        if !self.default_fair_value.is_finite() || self.default_fair_value <= 0.0 {
            return Err(ConfigError::InvalidFairValue {
                symbol: symbol.to_string(),
                value: self.default_fair_value,
            });
        }
        if !(0.0..1.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidThreshold {
                symbol: symbol.to_string(),
                value: self.threshold,
            });
        }
        if let Some(limit) = self.position_limit
            && limit < 0
        {
            return Err(ConfigError::InvalidPositionLimit {
                symbol: symbol.to_string(),
                limit,
            });
        }
        Ok(())
    }
}

impl Default for ProductParams {
    fn default() -> Self {
        Self::new(DEFAULT_FAIR_VALUE, DEFAULT_THRESHOLD)
    }
}

/// Configuration for the fair-value taker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraderConfig {
    /// Symmetric position limit applied to every product without an override
    pub position_limit: Quantity,
    /// Parameters for products missing from `products`
    pub fallback: ProductParams,
    /// Known products
    pub products: BTreeMap<Symbol, ProductParams>,
}

impl Default for TraderConfig {
    fn default() -> Self {
        let mut products = BTreeMap::new();
        products.insert(
            "RAINFOREST_RESIN".to_string(),
            ProductParams::new(DEFAULT_FAIR_VALUE, 0.005), // stable
        );
        products.insert(
            "KELP".to_string(),
            ProductParams::new(DEFAULT_FAIR_VALUE, 0.01), // moderate
        );
        products.insert(
            "SQUID_INK".to_string(),
            ProductParams::new(DEFAULT_FAIR_VALUE, 0.02), // volatile
        );

        Self {
            position_limit: DEFAULT_POSITION_LIMIT,
            fallback: ProductParams::default(),
            products,
        }
    }
}

impl TraderConfig {
    /// Config with no known products: everything uses the fallback pair
    pub fn empty() -> Self {
        Self {
            products: BTreeMap::new(),
            ..Default::default()
        }
    }

    /// Builder: add or replace a product entry
    pub fn with_product(mut self, symbol: impl Into<Symbol>, params: ProductParams) -> Self {
        self.products.insert(symbol.into(), params);
        self
    }

    /// Parameters for a product (fallback if unconfigured)
    pub fn params_for(&self, symbol: &str) -> &ProductParams {
        self.products.get(symbol).unwrap_or(&self.fallback)
    }

    pub fn threshold_for(&self, symbol: &str) -> f64 {
        self.params_for(symbol).threshold
    }

    pub fn default_fair_value_for(&self, symbol: &str) -> f64 {
        self.params_for(symbol).default_fair_value
    }

    pub fn position_limit_for(&self, symbol: &str) -> Quantity {
        self.params_for(symbol)
            .position_limit
            .unwrap_or(self.position_limit)
    }

    /// Check every entry, the fallback and the global limit
    pub fn validate(&self) -> ConfigResult<()> {
        if self.position_limit < 0 {
            return Err(ConfigError::InvalidPositionLimit {
                symbol: FALLBACK_SYMBOL.to_string(),
                limit: self.position_limit,
            });
        }
        self.fallback.validate(FALLBACK_SYMBOL)?;
        for (symbol, params) in &self.products {
            params.validate(symbol)?;
        }
        Ok(())
    }
}
