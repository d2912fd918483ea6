//! Price feed abstraction
//!
//! The ledger never generates prices itself; it is marked by whatever feed
//! the driver wires in. The demo uses a bounded random walk, tests use a
//! scripted sequence.

use std::collections::VecDeque;

use rand::Rng;

/// Source of successive mark prices
pub trait PriceFeed {
    /// Produce the next mark price given the current one
    fn next_price(&mut self, current: f64) -> f64;
}

/// Bounded multiplicative random walk
///
/// Each tick moves the price by a uniform step in
/// `[-max_step_percent, +max_step_percent]` percent. Cosmetic drift, not a
/// market model.
#[derive(Debug, Clone)]
pub struct RandomWalkFeed {
    max_step_percent: f64,
}

impl RandomWalkFeed {
    pub fn new(max_step_percent: f64) -> Self {
        Self { max_step_percent }
    }
}

impl PriceFeed for RandomWalkFeed {
    fn next_price(&mut self, current: f64) -> f64 {
        let change_percent =
            rand::rng().random_range(-self.max_step_percent..=self.max_step_percent);
        current * (1.0 + change_percent / 100.0)
    }
}

/// Deterministic feed replaying a fixed price sequence
///
/// Holds the last observed price once the script is exhausted. Useful for
/// tests and replays.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFeed {
    prices: VecDeque<f64>,
}

impl ScriptedFeed {
    pub fn new(prices: impl IntoIterator<Item = f64>) -> Self {
        Self {
            prices: prices.into_iter().collect(),
        }
    }
}

impl PriceFeed for ScriptedFeed {
    fn next_price(&mut self, current: f64) -> f64 {
        self.prices.pop_front().unwrap_or(current)
    }
}
