//! Trading engine - the bookkeeping core of the simulation
//!
//! Pure state transitions over an explicitly passed ledger: validate, price,
//! debit, record. Rendering and notification live behind separate seams and
//! consume the data this module returns.

use chrono::Utc;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Result, TradingError};
use crate::feed::PriceFeed;
use crate::types::{
    LedgerSnapshot, LedgerState, Order, OrderSide, OrderStatus, Position, PositionWithPnl,
};

/// Slippage grows by one step per this many units of order size
const SLIPPAGE_VOLUME_DIVISOR: f64 = 10.0;
/// Slippage step, in percent
const SLIPPAGE_STEP_PERCENT: f64 = 0.1;
/// Slippage cap, in percent
const MAX_SLIPPAGE_PERCENT: f64 = 1.0;

/// Outcome of closing a position
#[derive(Debug, Clone)]
pub struct ClosedPosition {
    /// The position as it stood at close
    pub position: Position,
    /// Realized P&L: (mark - entry) * size
    pub pnl: f64,
    /// Cash credited back: full notional at the current mark
    pub proceeds: f64,
}

/// Bookkeeping engine for one simulated account
///
/// Holds no ledger state of its own; every operation takes the single
/// caller-owned [`LedgerState`] by mutable reference, so the check-then-act
/// sequences below are atomic as long as that ownership stays exclusive.
pub struct TradingEngine {
    config: Config,
}

impl TradingEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fresh ledger at the configured starting balance and initial mark
    pub fn init_state(&self) -> Result<LedgerState> {
        let initial_price = self.config.resolved_initial_price()?;
        Ok(LedgerState::new(self.config.starting_balance, initial_price))
    }

    /// Synthetic market impact: a linear function of order size, capped
    ///
    /// Returns the slippage in percent. Monotonically non-decreasing in
    /// `amount`, never above [`MAX_SLIPPAGE_PERCENT`].
    pub fn calculate_slippage(&self, amount: f64) -> f64 {
        let volume_factor = amount / SLIPPAGE_VOLUME_DIVISOR;
        (volume_factor * SLIPPAGE_STEP_PERCENT).min(MAX_SLIPPAGE_PERCENT)
    }

    /// Execution price with slippage applied against the taker
    pub fn execution_price(&self, base_price: f64, side: OrderSide, slippage_percent: f64) -> f64 {
        match side {
            OrderSide::Buy => base_price * (1.0 + slippage_percent / 100.0),
            OrderSide::Sell => base_price * (1.0 - slippage_percent / 100.0),
        }
    }

    /// Place a market order against the current mark
    ///
    /// Fills are immediate and complete; there are no partial fills. Both
    /// sides debit the cash balance by the executed notional, and each side
    /// aggregates into its own (symbol, side) position.
    ///
    /// Rejections ([`TradingError::InvalidAmount`],
    /// [`TradingError::InsufficientFunds`]) leave the ledger untouched.
    pub fn place_market_order(
        &self,
        state: &mut LedgerState,
        amount: f64,
        side: OrderSide,
    ) -> Result<Order> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(TradingError::InvalidAmount(amount));
        }

        let slippage_percent = self.calculate_slippage(amount);
        let price = self.execution_price(state.current_price, side, slippage_percent);
        let total = amount * price;

        if total > state.cash_balance {
            return Err(TradingError::InsufficientFunds {
                required: total,
                available: state.cash_balance,
            });
        }

        state.cash_balance -= total;

        let now = Utc::now();
        let seq = state.next_order_seq();
        let order = Order {
            id: format!("ORD-{}-{}", now.timestamp_millis(), seq),
            symbol: self.config.symbol.clone(),
            side,
            amount,
            price,
            slippage_percent,
            total,
            timestamp: now.to_rfc3339(),
            status: OrderStatus::Filled,
        };

        state.orders.push(order.clone());
        self.apply_to_position(state, &order);

        info!(
            id = %order.id,
            symbol = %order.symbol,
            side = %order.side,
            amount = order.amount,
            price = order.price,
            total = order.total,
            "order filled"
        );

        Ok(order)
    }

    /// Fold a fill into the matching (symbol, side) position, or open one
    fn apply_to_position(&self, state: &mut LedgerState, order: &Order) {
        if let Some(position) = state.get_position_mut(&order.symbol, order.side) {
            position.apply_fill(order.price, order.amount);
        } else {
            state.add_position(Position {
                id: format!("POS-{}", order.id),
                symbol: order.symbol.clone(),
                side: order.side,
                size: order.amount,
                entry_price: order.price,
                opened_at: order.timestamp.clone(),
            });
        }
    }

    /// Close an open position at the current mark
    ///
    /// Credits the full notional (`size * current_price`) back to cash and
    /// removes the position; P&L is realized through that credit against the
    /// debit taken at entry. Unknown ids are a silent no-op and return `None`.
    pub fn close_position(
        &self,
        state: &mut LedgerState,
        position_id: &str,
    ) -> Option<ClosedPosition> {
        let Some(position) = state.remove_position(position_id) else {
            debug!(id = position_id, "close requested for unknown position");
            return None;
        };

        let pnl = position.unrealized_pnl(state.current_price);
        let proceeds = position.size * state.current_price;
        state.cash_balance += proceeds;

        info!(
            id = %position.id,
            symbol = %position.symbol,
            size = position.size,
            price = state.current_price,
            pnl = pnl,
            "position closed"
        );

        Some(ClosedPosition {
            position,
            pnl,
            proceeds,
        })
    }

    /// Advance the mark price by one tick of the feed
    pub fn apply_tick(&self, state: &mut LedgerState, feed: &mut dyn PriceFeed) {
        state.previous_price = state.current_price;
        state.current_price = feed.next_price(state.current_price);

        debug!(
            price = state.current_price,
            change_percent = state.price_change_percent(),
            "price tick"
        );
    }

    /// Rendering-ready snapshot of the ledger
    pub fn snapshot(&self, state: &LedgerState) -> LedgerSnapshot {
        let positions = state
            .positions
            .iter()
            .map(|p| PositionWithPnl {
                id: p.id.clone(),
                symbol: p.symbol.clone(),
                side: p.side,
                size: p.size,
                entry_price: p.entry_price,
                current_price: state.current_price,
                unrealized_pnl: p.unrealized_pnl(state.current_price),
                unrealized_pnl_percent: p.unrealized_pnl_percent(state.current_price),
            })
            .collect();

        let recent_orders = state
            .orders
            .iter()
            .rev()
            .take(self.config.recent_orders_limit)
            .cloned()
            .collect();

        LedgerSnapshot {
            timestamp: Utc::now().to_rfc3339(),
            cash_balance: state.cash_balance,
            equity: state.equity(),
            current_price: state.current_price,
            previous_price: state.previous_price,
            price_change_percent: state.price_change_percent(),
            positions,
            recent_orders,
            total_orders: state.orders.len(),
        }
    }
}
