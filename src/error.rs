//! Error types for the trading simulation
//!
//! Uses thiserror for ergonomic error definitions.
//! All errors are non-panicking; trade rejections are recoverable and get
//! surfaced to the user through the notification sink.

use thiserror::Error;

/// Custom Result type using our Error
pub type Result<T> = std::result::Result<T, TradingError>;

/// Trading simulation errors
#[derive(Error, Debug)]
pub enum TradingError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Order amount is non-positive or not a number
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    /// Order cost exceeds the available cash balance
    #[error("Insufficient funds: required {required:.2}, available {available:.2}")]
    InsufficientFunds { required: f64, available: f64 },

    /// Order side string was neither "buy" nor "sell"
    #[error("Unknown order side: {0}")]
    UnknownSide(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TradingError {
    /// Whether the error is a trade rejection (operation aborted, state untouched)
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TradingError::InvalidAmount(_) | TradingError::InsufficientFunds { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TradingError::InsufficientFunds {
            required: 100.0,
            available: 50.0,
        };
        assert!(err.to_string().contains("Insufficient funds"));
        assert!(err.to_string().contains("100.00"));

        let err = TradingError::InvalidAmount(-1.5);
        assert!(err.to_string().contains("Invalid amount"));
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: TradingError = json_err.into();
        assert!(matches!(err, TradingError::Json(_)));
    }

    #[test]
    fn test_rejection_classification() {
        assert!(TradingError::InvalidAmount(0.0).is_rejection());
        assert!(
            TradingError::InsufficientFunds {
                required: 1.0,
                available: 0.0
            }
            .is_rejection()
        );
        assert!(!TradingError::Config("bad".into()).is_rejection());
    }
}
