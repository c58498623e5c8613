//! Integration test: replaying recorded ticks through a trader session
//!
//! Tests the complete flow:
//! 1. Ticks are loaded from a JSON file and fed over a channel
//! 2. The session decodes/encodes trader data around every tick
//! 3. Orders reach the order sink
//! 4. Final trader data resumes a later session

use atoll_core::{Order, OrderDepth, TradingState};
use atoll_runner::{StateCodec, TickFeed, TraderSession, replay, run_tick};
use atoll_strategy::{FairValueTaker, TraderConfig, TraderState};
use std::io::Write;
use tokio::sync::mpsc;

const TICKS_JSON: &str = r#"[
    {"timestamp": 0,
     "order_depths": {
        "RAINFOREST_RESIN": {"buy_orders": {"9998": 10}, "sell_orders": {"10002": -10}},
        "KELP": {"buy_orders": {"2020": 8}, "sell_orders": {"2022": -8}}
     },
     "position": {}},
    {"timestamp": 100,
     "order_depths": {
        "RAINFOREST_RESIN": {"buy_orders": {"9999": 5}, "sell_orders": {"10001": -5}},
        "KELP": {"buy_orders": {"2021": 6}, "sell_orders": {"2023": -6}}
     },
     "position": {}},
    {"timestamp": 200,
     "order_depths": {
        "RAINFOREST_RESIN": {"buy_orders": {"9990": 4}, "sell_orders": {"9900": -12}},
        "KELP": {"buy_orders": {}, "sell_orders": {}}
     },
     "position": {"RAINFOREST_RESIN": 45}}
]"#;

fn taker() -> FairValueTaker {
    FairValueTaker::new(TraderConfig::default())
}

#[tokio::test]
async fn test_replay_from_file_forwards_orders() {
    let _ = env_logger::try_init();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TICKS_JSON.as_bytes()).unwrap();

    let feed = TickFeed::from_file(file.path()).unwrap();
    assert_eq!(feed.len(), 3);

    let (tick_rx, feed_handle) = feed.spawn(8);
    let (order_tx, mut order_rx) = mpsc::channel(8);
    let mut session = TraderSession::new(taker());

    let report = replay(&mut session, tick_rx, Some(order_tx)).await;
    assert_eq!(feed_handle.await.unwrap(), 3);

    let mut forwarded = Vec::new();
    while let Some(order) = order_rx.recv().await {
        forwarded.push(order);
    }

    // Tick 200: RESIN mean drifts to ~9980, ask 9900 is well below it,
    // headroom 50 - 45 = 5 caps the buy
    assert_eq!(forwarded, vec![Order::buy("RAINFOREST_RESIN", 9900, 5)]);
    assert_eq!(report.ticks, 3);
    assert_eq!(report.buy_volume, 5);
    assert_eq!(report.sell_orders, 0);

    let blob = report.final_trader_data.as_deref().unwrap();
    let memory: TraderState = StateCodec::decode(blob).unwrap();
    assert_eq!(memory.estimate("RAINFOREST_RESIN").unwrap().count, 3);
    assert_eq!(memory.estimate("KELP").unwrap().count, 2);
}

#[tokio::test]
async fn test_session_resumes_from_trader_data() {
    let ticks: Vec<TradingState> = serde_json::from_str(TICKS_JSON).unwrap();

    // One session over all ticks
    let mut whole = TraderSession::new(taker());
    for tick in &ticks {
        whole.on_tick(tick);
    }

    // Two sessions, handing trader data over in between
    let mut first = TraderSession::new(taker());
    first.on_tick(&ticks[0]);
    let handoff = first.trader_data().unwrap().to_string();

    let mut second = TraderSession::new(taker()).with_trader_data(handoff);
    second.on_tick(&ticks[1]);
    second.on_tick(&ticks[2]);

    assert_eq!(whole.trader_data(), second.trader_data());
}

#[tokio::test]
async fn test_corrupt_state_behaves_like_fresh_start() {
    let ticks: Vec<TradingState> = serde_json::from_str(TICKS_JSON).unwrap();
    let strategy = taker();

    for garbage in [None, Some(""), Some("][}{"), Some(r#"{"averages": 7}"#)] {
        let outcome = run_tick(&strategy, &ticks[0], garbage);
        let fresh = run_tick(&strategy, &ticks[0], None);
        assert_eq!(outcome, fresh, "trader data {:?}", garbage);
    }
}

#[tokio::test]
async fn test_replay_continues_after_sink_closes() {
    let ticks: Vec<TradingState> = (0..4)
        .map(|t| {
            TradingState::new(t).with_depth(
                "SQUID_INK",
                OrderDepth::new().with_bid(130, 1).with_ask(70, 1),
            )
        })
        .collect();

    let (tick_rx, _handle) = TickFeed::new(ticks).spawn(4);
    let (order_tx, order_rx) = mpsc::channel(1);
    drop(order_rx);

    let mut session = TraderSession::new(taker());
    let report = replay(&mut session, tick_rx, Some(order_tx)).await;

    // Mid 100 every tick; both sides fire each time
    assert_eq!(report.ticks, 4);
    assert_eq!(report.buy_orders, 4);
    assert_eq!(report.sell_orders, 4);
}
