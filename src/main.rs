//! Demo driver for the paper trading engine
//!
//! Owns the single ledger instance and interleaves simulated price ticks
//! with console commands in one task, so every operation runs to completion
//! within one turn and the single-writer assumption holds by construction.

use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use paper_trader::{
    Config, LedgerState, LogNotifier, Notification, Notifier, OrderSide, RandomWalkFeed,
    TradingEngine,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    config.validate().context("invalid configuration")?;

    info!(
        environment = %config.environment,
        symbol = %config.symbol,
        balance = config.starting_balance,
        "starting paper trading session"
    );

    let mut feed = RandomWalkFeed::new(config.max_step_percent);
    let tick_interval = Duration::from_secs(config.tick_interval_seconds);
    let engine = TradingEngine::new(config);
    let mut state = engine.init_state()?;
    let notifier = LogNotifier;

    print_help();

    let mut ticker = tokio::time::interval(tick_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                engine.apply_tick(&mut state, &mut feed);
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if !handle_command(&engine, &mut state, &notifier, line.trim())? {
                            break;
                        }
                    }
                    // stdin closed
                    None => break,
                }
            }
        }
    }

    info!(
        equity = state.equity(),
        orders = state.orders.len(),
        open_positions = state.positions.len(),
        "session ended"
    );
    Ok(())
}

/// Dispatch one console command; returns `false` when the session should end
fn handle_command(
    engine: &TradingEngine,
    state: &mut LedgerState,
    notifier: &dyn Notifier,
    input: &str,
) -> anyhow::Result<bool> {
    let mut parts = input.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(true);
    };

    match command.to_ascii_lowercase().as_str() {
        "buy" | "sell" => {
            let side: OrderSide = command.parse()?;
            let Some(raw_amount) = parts.next() else {
                println!("usage: {} <amount>", command.to_ascii_lowercase());
                return Ok(true);
            };
            // Unparseable input becomes NaN and is rejected by the engine
            let amount = raw_amount.parse::<f64>().unwrap_or(f64::NAN);

            match engine.place_market_order(state, amount, side) {
                Ok(order) => notifier.notify(&Notification::order_filled(&order)),
                Err(err) if err.is_rejection() => {
                    notifier.notify(&Notification::rejection(&err));
                }
                Err(err) => return Err(err.into()),
            }
        }
        "close" => {
            let Some(id) = parts.next() else {
                println!("usage: close <position-id>");
                return Ok(true);
            };
            // Unknown ids are a silent no-op
            if let Some(closed) = engine.close_position(state, id) {
                notifier.notify(&Notification::position_closed(&closed));
            }
        }
        "status" => {
            let snapshot = engine.snapshot(state);
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        "help" => print_help(),
        "quit" | "exit" => return Ok(false),
        other => println!("unknown command: {other} (try 'help')"),
    }

    Ok(true)
}

fn print_help() {
    println!("commands:");
    println!("  buy <amount>         place a market buy");
    println!("  sell <amount>        place a market sell");
    println!("  close <position-id>  close an open position at the current mark");
    println!("  status               print the ledger snapshot as JSON");
    println!("  help                 show this help");
    println!("  quit                 end the session");
}
