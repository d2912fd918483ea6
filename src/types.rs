//! Common types for the trading simulation
//!
//! All shared data structures used across modules.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::TradingError;

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for OrderSide {
    type Err = TradingError;

    /// Case-insensitive parse; input validation happens at the caller boundary
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(OrderSide::Buy),
            "sell" => Ok(OrderSide::Sell),
            other => Err(TradingError::UnknownSide(other.to_string())),
        }
    }
}

/// Order lifecycle status
///
/// Fills are always immediate and complete in the simulation, so every
/// recorded order is `Filled`. There is no pending or partial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Filled,
}

/// An executed market order
///
/// Immutable once recorded; kept in the append-only order history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub symbol: String,
    pub side: OrderSide,
    /// Requested size in base units
    pub amount: f64,
    /// Execution price after slippage
    pub price: f64,
    pub slippage_percent: f64,
    /// Notional debited from the cash balance (amount * price)
    pub total: f64,
    pub timestamp: String,
    pub status: OrderStatus,
}

/// An open position, aggregated per (symbol, side)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub symbol: String,
    pub side: OrderSide,
    pub size: f64,
    /// Volume-weighted average fill price
    pub entry_price: f64,
    pub opened_at: String,
}

impl Position {
    /// Calculate unrealized P&L at the given mark price
    ///
    /// The long formula applies to both sides: sell positions are tracked
    /// independently, not inverted or netted against buys.
    pub fn unrealized_pnl(&self, current_price: f64) -> f64 {
        (current_price - self.entry_price) * self.size
    }

    /// Calculate unrealized P&L as percentage of the entry notional
    pub fn unrealized_pnl_percent(&self, current_price: f64) -> f64 {
        (current_price - self.entry_price) / self.entry_price * 100.0
    }

    /// Fold another same-side fill into this position
    ///
    /// The entry price becomes the volume-weighted average of the existing
    /// position and the new fill; the size grows by the fill amount.
    pub fn apply_fill(&mut self, fill_price: f64, fill_amount: f64) {
        self.entry_price = (self.entry_price * self.size + fill_price * fill_amount)
            / (self.size + fill_amount);
        self.size += fill_amount;
    }

    /// Whether this position aggregates fills for the given (symbol, side)
    pub fn matches(&self, symbol: &str, side: OrderSide) -> bool {
        self.symbol == symbol && self.side == side
    }
}

/// In-memory ledger for one simulated account
///
/// Single mutable instance, exclusively owned by the caller. All mutation
/// goes through [`crate::TradingEngine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerState {
    /// Available cash balance
    pub cash_balance: f64,
    /// Current simulated mark price
    pub current_price: f64,
    /// Mark price before the latest tick (for up/down display)
    pub previous_price: f64,
    /// Open positions, at most one per (symbol, side)
    pub positions: Vec<Position>,
    /// Append-only order history
    pub orders: Vec<Order>,
    /// Monotonic order sequence number
    pub order_sequence: u64,
}

impl LedgerState {
    /// Create a fresh ledger at the given starting balance and mark price
    pub fn new(starting_balance: f64, initial_price: f64) -> Self {
        Self {
            cash_balance: starting_balance,
            current_price: initial_price,
            previous_price: initial_price,
            positions: Vec::new(),
            orders: Vec::new(),
            order_sequence: 0,
        }
    }

    /// Get the open position for a (symbol, side) pair
    pub fn get_position(&self, symbol: &str, side: OrderSide) -> Option<&Position> {
        self.positions.iter().find(|p| p.matches(symbol, side))
    }

    /// Get the mutable open position for a (symbol, side) pair
    pub fn get_position_mut(&mut self, symbol: &str, side: OrderSide) -> Option<&mut Position> {
        self.positions.iter_mut().find(|p| p.matches(symbol, side))
    }

    /// Look up a position by its identifier
    pub fn position_by_id(&self, id: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == id)
    }

    /// Add a new position
    pub fn add_position(&mut self, position: Position) {
        self.positions.push(position);
    }

    /// Remove a position by identifier, returning it if present
    pub fn remove_position(&mut self, id: &str) -> Option<Position> {
        let idx = self.positions.iter().position(|p| p.id == id)?;
        Some(self.positions.remove(idx))
    }

    /// Next order sequence number
    pub fn next_order_seq(&mut self) -> u64 {
        self.order_sequence += 1;
        self.order_sequence
    }

    /// Unrealized P&L across all open positions at the current mark
    pub fn unrealized_pnl(&self) -> f64 {
        self.positions
            .iter()
            .map(|p| p.unrealized_pnl(self.current_price))
            .sum()
    }

    /// Total equity: cash balance plus unrealized P&L
    pub fn equity(&self) -> f64 {
        self.cash_balance + self.unrealized_pnl()
    }

    /// Mark price change since the previous tick, in percent
    pub fn price_change_percent(&self) -> f64 {
        if self.previous_price == 0.0 {
            return 0.0;
        }
        (self.current_price - self.previous_price) / self.previous_price * 100.0
    }
}

/// Position with current P&L info, ready for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionWithPnl {
    pub id: String,
    pub symbol: String,
    pub side: OrderSide,
    pub size: f64,
    pub entry_price: f64,
    pub current_price: f64,
    pub unrealized_pnl: f64,
    pub unrealized_pnl_percent: f64,
}

/// Rendering-ready snapshot of the ledger
///
/// Everything a display surface needs; data only, never markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub timestamp: String,
    pub cash_balance: f64,
    pub equity: f64,
    pub current_price: f64,
    pub previous_price: f64,
    pub price_change_percent: f64,
    pub positions: Vec<PositionWithPnl>,
    /// Most recent orders, newest first, truncated to the display window
    pub recent_orders: Vec<Order>,
    /// Total orders executed this session (history is never truncated)
    pub total_orders: usize,
}
