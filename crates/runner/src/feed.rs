//! Tick Feed - replays recorded exchange ticks into a trader session
//!
//! The feed task pushes ticks over an mpsc channel; the replay loop pulls
//! them one at a time, so a tick is always finished before the next one
//! is processed.

use crate::config::read_json;
use crate::error::RunnerResult;
use crate::session::TraderSession;
use atoll_core::{Order, Side, Symbol, TradingState};
use atoll_strategy::Strategy;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Recorded ticks waiting to be replayed
#[derive(Debug, Clone, Default)]
pub struct TickFeed {
    ticks: Vec<TradingState>,
    interval: Duration,
}

impl TickFeed {
    pub fn new(ticks: Vec<TradingState>) -> Self {
        Self {
            ticks,
            interval: Duration::ZERO,
        }
    }

    /// Load a JSON array of ticks
    pub fn from_file(path: impl AsRef<Path>) -> RunnerResult<Self> {
        let ticks: Vec<TradingState> = read_json(path)?;
        Ok(Self::new(ticks))
    }

    /// Pause between ticks
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Spawn the feed task. The handle resolves to the number of ticks sent;
    /// the feed stops early if the receiver is dropped.
    pub fn spawn(self, capacity: usize) -> (mpsc::Receiver<TradingState>, JoinHandle<usize>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let interval = self.interval;
        let ticks = self.ticks;

        let handle = tokio::spawn(async move {
            let mut sent = 0;
            for tick in ticks {
                if tx.send(tick).await.is_err() {
                    log::warn!("[TickFeed] receiver dropped after {} ticks", sent);
                    break;
                }
                sent += 1;
                if !interval.is_zero() {
                    tokio::time::sleep(interval).await;
                }
            }
            log::info!("[TickFeed] finished, {} ticks sent", sent);
            sent
        });

        (rx, handle)
    }
}

/// Summary of a replay run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayReport {
    pub ticks: u64,
    pub orders_by_product: BTreeMap<Symbol, usize>,
    pub buy_orders: usize,
    pub sell_orders: usize,
    pub buy_volume: i64,
    pub sell_volume: i64,
    /// Trader data after the last tick
    pub final_trader_data: Option<String>,
}

impl ReplayReport {
    pub fn total_orders(&self) -> usize {
        self.buy_orders + self.sell_orders
    }

    fn record(&mut self, order: &Order) {
        *self.orders_by_product.entry(order.symbol.clone()).or_insert(0) += 1;
        match order.side() {
            Some(Side::Buy) => {
                self.buy_orders += 1;
                self.buy_volume = self.buy_volume.saturating_add(order.size());
            }
            Some(Side::Sell) => {
                self.sell_orders += 1;
                self.sell_volume = self.sell_volume.saturating_add(order.size());
            }
            None => {}
        }
    }
}

/// Drive a session until the tick channel closes.
///
/// Emitted orders are forwarded to `order_tx` when given; forwarding stops
/// (but trading continues) once that receiver is gone.
pub async fn replay<S: Strategy>(
    session: &mut TraderSession<S>,
    mut ticks: mpsc::Receiver<TradingState>,
    order_tx: Option<mpsc::Sender<Order>>,
) -> ReplayReport {
    log::info!("[Replay] started with {}", session.strategy().name());

    let mut report = ReplayReport::default();
    let mut order_tx = order_tx;

    while let Some(state) = ticks.recv().await {
        let outcome = session.on_tick(&state);
        report.ticks += 1;

        for order in outcome.all_orders() {
            report.record(order);
            if let Some(tx) = &order_tx
                && tx.send(order.clone()).await.is_err()
            {
                log::warn!("[Replay] order sink closed, no longer forwarding");
                order_tx = None;
            }
        }
    }

    report.final_trader_data = session.trader_data().map(str::to_string);
    log::info!(
        "[Replay] complete: {} ticks, {} orders ({} buys, {} sells)",
        report.ticks,
        report.total_orders(),
        report.buy_orders,
        report.sell_orders
    );
    report
}
