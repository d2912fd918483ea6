//! Paper Trader - Simulated Crypto Trading Engine
//!
//! An in-memory trading ledger for one simulated account, driven
//! synchronously by its caller. No exchange connectivity, no persistence,
//! no authentication - the whole market is a bounded random walk.
//!
//! # Architecture
//! - [`TradingEngine`] performs the bookkeeping as pure state transitions
//!   over a caller-owned [`LedgerState`]
//! - [`PriceFeed`] is the seam between the ledger and whatever produces
//!   prices; the demo wires a random walk, tests wire a scripted sequence
//! - Display surfaces consume [`LedgerSnapshot`] data; notification sinks
//!   implement [`Notifier`]. The core never renders markup.
//!
//! # Features
//! - Market orders with a linear, capped slippage model
//! - Volume-weighted position averaging per (symbol, side)
//! - Equity and per-position unrealized P&L at the current mark
//! - Env-driven configuration with validated defaults

// Clippy configuration for trading code patterns
#![allow(clippy::similar_names)] // state/stats are common trading names
#![allow(clippy::cast_precision_loss)] // Float casts OK for display
#![allow(clippy::if_not_else)] // Readability preference

mod assets;
mod config;
mod error;
mod feed;
mod notify;
mod trading;
mod types;

pub use assets::{Asset, ASSETS, base_price, is_listed};
pub use config::Config;
pub use error::{Result, TradingError};
pub use feed::{PriceFeed, RandomWalkFeed, ScriptedFeed};
pub use notify::{LogNotifier, MemoryNotifier, Notification, Notifier, Severity};
pub use trading::{ClosedPosition, TradingEngine};
pub use types::*;
