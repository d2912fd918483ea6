//! Notification sink
//!
//! Transient user feedback lives behind a trait so display surfaces can
//! decide how (and how long) to show it. The engine returns typed outcomes;
//! this layer turns them into `(message, severity)` tuples.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::TradingError;
use crate::trading::ClosedPosition;
use crate::types::Order;

/// Notification severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A transient user-facing notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Feedback for a filled order
    pub fn order_filled(order: &Order) -> Self {
        Self::success(format!("Order executed at ${:.2}", order.price))
    }

    /// Feedback for a closed position; severity follows the P&L sign
    pub fn position_closed(closed: &ClosedPosition) -> Self {
        let message = format!("Position closed with P/L: ${:.2}", closed.pnl);
        if closed.pnl >= 0.0 {
            Self::success(message)
        } else {
            Self::error(message)
        }
    }

    /// Feedback for a rejected operation
    pub fn rejection(err: &TradingError) -> Self {
        Self::error(err.to_string())
    }
}

/// Receiver of transient notifications
pub trait Notifier {
    fn notify(&self, notification: &Notification);
}

/// Notifier that routes through the tracing subscriber
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.severity {
            Severity::Info | Severity::Success => {
                info!(severity = ?notification.severity, "{}", notification.message);
            }
            Severity::Error => {
                error!("{}", notification.message);
            }
        }
    }
}

/// Notifier that collects everything it receives
///
/// Test double; also handy for surfaces that poll instead of subscribing.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    received: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the received notifications in arrival order
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.received.lock().expect("notifier poisoned"))
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: &Notification) {
        self.received
            .lock()
            .expect("notifier poisoned")
            .push(notification.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderSide, OrderStatus, Position};

    fn closed_with_pnl(pnl: f64) -> ClosedPosition {
        ClosedPosition {
            position: Position {
                id: "POS-ORD-1".to_string(),
                symbol: "BTC/USD".to_string(),
                side: OrderSide::Buy,
                size: 1.0,
                entry_price: 100.0,
                opened_at: "2024-01-01T00:00:00Z".to_string(),
            },
            pnl,
            proceeds: 100.0 + pnl,
        }
    }

    #[test]
    fn test_close_severity_follows_pnl_sign() {
        assert_eq!(
            Notification::position_closed(&closed_with_pnl(12.5)).severity,
            Severity::Success
        );
        assert_eq!(
            Notification::position_closed(&closed_with_pnl(0.0)).severity,
            Severity::Success
        );
        assert_eq!(
            Notification::position_closed(&closed_with_pnl(-3.0)).severity,
            Severity::Error
        );
    }

    #[test]
    fn test_order_filled_carries_the_fill_price() {
        let order = Order {
            id: "ORD-1-1".to_string(),
            symbol: "BTC/USD".to_string(),
            side: OrderSide::Buy,
            amount: 0.01,
            price: 42_856.38,
            slippage_percent: 0.0001,
            total: 428.56,
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            status: OrderStatus::Filled,
        };

        let n = Notification::order_filled(&order);
        assert_eq!(n.severity, Severity::Success);
        assert!(n.message.contains("42856.38"));
    }

    #[test]
    fn test_rejection_maps_to_error_severity() {
        let n = Notification::rejection(&TradingError::InvalidAmount(-1.0));
        assert_eq!(n.severity, Severity::Error);
        assert!(n.message.contains("Invalid amount"));
    }

    #[test]
    fn test_memory_notifier_collects_in_order() {
        let notifier = MemoryNotifier::new();
        notifier.notify(&Notification::info("one"));
        notifier.notify(&Notification::error("two"));

        let received = notifier.take();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].message, "one");
        assert_eq!(received[1].severity, Severity::Error);
        assert!(notifier.take().is_empty());
    }
}
