//! Configuration management for the simulation

use std::env;
use std::str::FromStr;

use crate::assets;
use crate::error::{Result, TradingError};

/// Simulation configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment (production, staging, development)
    pub environment: String,

    /// Log level fallback when RUST_LOG is unset
    pub log_level: String,

    /// Cash balance a fresh ledger starts with
    pub starting_balance: f64,

    /// Market traded this session
    pub symbol: String,

    /// Initial mark price; defaults to the asset catalog base price for `symbol`
    pub initial_price: Option<f64>,

    /// Seconds between simulated price ticks
    pub tick_interval_seconds: u64,

    /// Bound of the random walk step, in percent per tick
    pub max_step_percent: f64,

    /// How many orders the display window shows (history is never truncated)
    pub recent_orders_limit: usize,
}

/// Parse an environment variable, falling back to the default when the
/// variable is unset or unparseable
fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: "info".to_string(),
            starting_balance: 10_000.0,
            symbol: "BTC/USD".to_string(),
            initial_price: None,
            tick_interval_seconds: 5,
            max_step_percent: 0.5,
            recent_orders_limit: 5,
        }
    }
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Self {
        Self {
            environment: env_parse("ENVIRONMENT", "development".to_string()),
            log_level: env_parse("LOG_LEVEL", "info".to_string()),
            starting_balance: env_parse("STARTING_BALANCE", 10_000.0),
            symbol: env_parse("SYMBOL", "BTC/USD".to_string()),
            initial_price: env::var("INITIAL_PRICE").ok().and_then(|v| v.parse().ok()),
            tick_interval_seconds: env_parse("TICK_INTERVAL_SECONDS", 5),
            max_step_percent: env_parse("MAX_STEP_PERCENT", 0.5),
            recent_orders_limit: env_parse("RECENT_ORDERS_LIMIT", 5),
        }
    }

    /// Initial mark price for the configured symbol
    ///
    /// An explicit `INITIAL_PRICE` wins; otherwise the asset catalog supplies
    /// the base price.
    pub fn resolved_initial_price(&self) -> Result<f64> {
        if let Some(price) = self.initial_price {
            return Ok(price);
        }
        assets::base_price(&self.symbol).ok_or_else(|| {
            TradingError::Config(format!(
                "Symbol {} is not in the asset catalog and no INITIAL_PRICE was given",
                self.symbol
            ))
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.starting_balance <= 0.0 {
            return Err(TradingError::Config(
                "starting_balance must be positive".into(),
            ));
        }
        if self.tick_interval_seconds == 0 {
            return Err(TradingError::Config(
                "tick_interval_seconds must be at least 1".into(),
            ));
        }
        if self.max_step_percent <= 0.0 || self.max_step_percent > 5.0 {
            return Err(TradingError::Config(
                "max_step_percent must be in (0, 5]".into(),
            ));
        }
        if self.recent_orders_limit == 0 {
            return Err(TradingError::Config(
                "recent_orders_limit must be at least 1".into(),
            ));
        }
        let price = self.resolved_initial_price()?;
        if price <= 0.0 {
            return Err(TradingError::Config("initial price must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Defaults are exercised through Default rather than from_env so tests
    // stay independent of the process environment.

    #[test]
    fn test_defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!((config.starting_balance - 10_000.0).abs() < f64::EPSILON);
        assert_eq!(config.symbol, "BTC/USD");
        assert_eq!(config.tick_interval_seconds, 5);
    }

    #[test]
    fn test_default_initial_price_comes_from_catalog() {
        let config = Config::default();
        let price = config.resolved_initial_price().unwrap();
        assert!((price - 42_856.34).abs() < 1e-9);
    }

    #[test]
    fn test_explicit_initial_price_wins() {
        let config = Config {
            initial_price: Some(123.45),
            ..Config::default()
        };
        assert!((config.resolved_initial_price().unwrap() - 123.45).abs() < 1e-9);
    }

    #[test]
    fn test_unlisted_symbol_requires_explicit_price() {
        let mut config = Config {
            symbol: "FOO/USD".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TradingError::Config(_))
        ));

        config.initial_price = Some(1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_bounds() {
        let bad_balance = Config {
            starting_balance: 0.0,
            ..Config::default()
        };
        assert!(bad_balance.validate().is_err());

        let bad_tick = Config {
            tick_interval_seconds: 0,
            ..Config::default()
        };
        assert!(bad_tick.validate().is_err());

        let bad_step = Config {
            max_step_percent: 6.0,
            ..Config::default()
        };
        assert!(bad_step.validate().is_err());

        let bad_window = Config {
            recent_orders_limit: 0,
            ..Config::default()
        };
        assert!(bad_window.validate().is_err());
    }
}
