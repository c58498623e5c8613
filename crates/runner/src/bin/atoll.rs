//! atoll - replay recorded ticks through the fair value taker, or search
//! the currency table for the best conversion walk.

use anyhow::Context;
use atoll_conversion::{PathOptimizer, PathQuery, RateTable};
use atoll_runner::{RunnerConfig, TickFeed, TraderSession, load_rate_table, replay};
use atoll_strategy::FairValueTaker;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(name = "atoll", version, about = "Fair value trading and conversion search")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON array of ticks through the fair value taker
    Replay {
        /// Recorded ticks
        #[arg(long)]
        ticks: PathBuf,
        /// Runner config (defaults apply if omitted)
        #[arg(long, env = "ATOLL_CONFIG")]
        config: Option<PathBuf>,
        /// Trader data to resume from
        #[arg(long)]
        state_in: Option<PathBuf>,
        /// Where to write trader data after the last tick
        #[arg(long)]
        state_out: Option<PathBuf>,
    },
    /// Find the most profitable conversion walk of a fixed length
    Optimize {
        /// Rate table JSON (reference table if omitted)
        #[arg(long)]
        rates: Option<PathBuf>,
        #[arg(long, default_value = "Seashells")]
        start: String,
        #[arg(long, default_value = "Seashells")]
        end: String,
        #[arg(long, default_value_t = 500_000.0)]
        amount: f64,
        #[arg(long, default_value_t = 5)]
        hops: usize,
        /// Use the tabulated search instead of full enumeration
        #[arg(long)]
        tabulated: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Replay {
            ticks,
            config,
            state_in,
            state_out,
        } => run_replay(ticks, config, state_in, state_out).await,
        Command::Optimize {
            rates,
            start,
            end,
            amount,
            hops,
            tabulated,
        } => run_optimize(rates, PathQuery::new(start, end, amount, hops), tabulated),
    }
}

async fn run_replay(
    ticks: PathBuf,
    config: Option<PathBuf>,
    state_in: Option<PathBuf>,
    state_out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => RunnerConfig::from_file(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RunnerConfig::default(),
    };

    let feed = TickFeed::from_file(&ticks)?
        .with_interval(Duration::from_millis(config.tick_interval_ms));
    log::info!("Loaded {} ticks from {}", feed.len(), ticks.display());

    let mut session = TraderSession::new(FairValueTaker::new(config.trader.clone()));
    if let Some(path) = state_in {
        let blob = std::fs::read_to_string(&path)
            .with_context(|| format!("reading trader data {}", path.display()))?;
        session = session.with_trader_data(blob);
    }

    let (tick_rx, feed_handle) = feed.spawn(config.channel_capacity);
    let (order_tx, mut order_rx) = mpsc::channel(config.channel_capacity);
    let printer = tokio::spawn(async move {
        while let Some(order) = order_rx.recv().await {
            println!("{}", order);
        }
    });

    let report = replay(&mut session, tick_rx, Some(order_tx)).await;
    feed_handle.await?;
    printer.await?;

    println!(
        "ticks: {}  orders: {}  bought: {}  sold: {}",
        report.ticks,
        report.total_orders(),
        report.buy_volume,
        report.sell_volume
    );
    for (symbol, count) in &report.orders_by_product {
        println!("  {:<20} {}", symbol, count);
    }

    if let (Some(path), Some(blob)) = (state_out, report.final_trader_data) {
        std::fs::write(&path, blob)
            .with_context(|| format!("writing trader data {}", path.display()))?;
        log::info!("Trader data written to {}", path.display());
    }
    Ok(())
}

fn run_optimize(rates: Option<PathBuf>, query: PathQuery, tabulated: bool) -> anyhow::Result<()> {
    let table = match rates {
        Some(path) => load_rate_table(&path)?,
        None => RateTable::reference(),
    };
    let optimizer = PathOptimizer::new(table)?;

    let result = if tabulated {
        optimizer.best_walk_tabulated(&query)?
    } else {
        optimizer.best_walk(&query)?
    };

    println!("--- Results for {} hops ---", query.hops);
    match result {
        Some(walk) => {
            println!("Starting amount: {:.2} {}", query.amount, query.start);
            println!("Best path:       {}", walk);
            println!("Final amount:    {:.2} {}", walk.amount, query.end);
            println!("Profit:          {:.2} {}", walk.profit(query.amount), query.end);
        }
        None => println!(
            "No walk from {} ends in {} after exactly {} hops",
            query.start, query.end, query.hops
        ),
    }
    Ok(())
}
