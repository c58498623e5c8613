//! Fair Value Taker Strategy
//!
//! A taker that learns its own fair value:
//! - Folds each tick's mid price into a running mean per product
//! - Buys the best ask when it sits far enough below fair value
//! - Sells into the best bid when it sits far enough above fair value
//! - Never lets a fill push the position past the product's limit

use crate::{
    config::TraderConfig,
    fair_value::TraderState,
    strategy::{Strategy, TraderOutput},
};
use atoll_core::{Order, OrderDepth, Quantity, TradingState};
use std::collections::BTreeMap;

/// Fair value taker strategy
///
/// Stateless between calls: everything it remembers travels in
/// [`TraderState`].
#[derive(Debug, Clone, Default)]
pub struct FairValueTaker {
    config: TraderConfig,
}

impl FairValueTaker {
    /// Create a new fair value taker
    pub fn new(config: TraderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TraderConfig {
        &self.config
    }

    /// Run the per-product pipeline for one snapshot
    fn trade_product(
        &self,
        symbol: &str,
        depth: &OrderDepth,
        position: Quantity,
        memory: &mut TraderState,
    ) -> Vec<Order> {
        let mut orders = Vec::new();

        match depth.mid_price().filter(|mid| mid.is_finite()) {
            Some(mid) => {
                let estimate = memory.observe(symbol, mid);
                log::debug!(
                    "[FairValue] {} mid={} spread={:?} avg={:.4} count={}",
                    symbol,
                    mid,
                    depth.spread(),
                    estimate.avg,
                    estimate.count
                );
            }
            None => {
                log::debug!("[FairValue] {} has no usable depth, skipping", symbol);
                return orders;
            }
        }

        let params = self.config.params_for(symbol);
        let fair_value = memory
            .fair_value(symbol)
            .unwrap_or(params.default_fair_value);
        let threshold = params.threshold;
        let limit = self.config.position_limit_for(symbol);

        // Market sell price well below fair value -> lift the ask
        if let Some((best_ask, ask_volume)) = depth.best_ask() {
            let trigger = fair_value * (1.0 - threshold);
            if (best_ask as f64) < trigger {
                let max_buy = limit.saturating_sub(position);
                let volume = ask_volume.saturating_abs().min(max_buy);
                if volume > 0 {
                    log::info!(
                        "[FairValue] {} BUY {} @ {} since {} < {:.4} * (1 - {})",
                        symbol,
                        volume,
                        best_ask,
                        best_ask,
                        fair_value,
                        threshold
                    );
                    orders.push(Order::buy(symbol, best_ask, volume));
                }
            }
        }

        // Market buy price well above fair value -> hit the bid
        if let Some((best_bid, bid_volume)) = depth.best_bid() {
            let trigger = fair_value * (1.0 + threshold);
            if (best_bid as f64) > trigger {
                let max_sell = limit.saturating_add(position);
                let volume = bid_volume.min(max_sell);
                if volume > 0 {
                    log::info!(
                        "[FairValue] {} SELL {} @ {} since {} > {:.4} * (1 + {})",
                        symbol,
                        volume,
                        best_bid,
                        best_bid,
                        fair_value,
                        threshold
                    );
                    orders.push(Order::sell(symbol, best_bid, volume));
                }
            }
        }

        orders
    }
}

impl Strategy for FairValueTaker {
    type Memory = TraderState;

    fn name(&self) -> &str {
        "FairValueTaker"
    }

    fn run(&self, state: &TradingState, memory: TraderState) -> TraderOutput<TraderState> {
        let mut memory = memory;
        let mut orders = BTreeMap::new();

        for (symbol, depth) in &state.order_depths {
            let position = state.position_of(symbol);
            let product_orders = self.trade_product(symbol, depth, position, &mut memory);
            orders.insert(symbol.clone(), product_orders);
        }

        TraderOutput {
            orders,
            conversions: 0,
            memory,
        }
    }
}
