//! Static asset catalog
//!
//! The tradeable markets and their demo base prices. The catalog only seeds
//! the initial mark for a session; once running, the price feed owns the mark.

/// A listed market with its demo base price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asset {
    pub name: &'static str,
    pub base_price: f64,
}

/// All markets available in the simulation
pub const ASSETS: &[Asset] = &[
    Asset {
        name: "BTC/USD",
        base_price: 42_856.34,
    },
    Asset {
        name: "ETH/USD",
        base_price: 2_456.78,
    },
    Asset {
        name: "BNB/USD",
        base_price: 312.45,
    },
    Asset {
        name: "SOL/USD",
        base_price: 87.23,
    },
    Asset {
        name: "XRP/USD",
        base_price: 0.5423,
    },
    Asset {
        name: "ADA/USD",
        base_price: 0.32,
    },
    Asset {
        name: "DOGE/USD",
        base_price: 0.078,
    },
    Asset {
        name: "SHIB/USD",
        base_price: 0.000_009_8,
    },
];

/// Demo base price for a symbol, if listed
pub fn base_price(symbol: &str) -> Option<f64> {
    ASSETS.iter().find(|a| a.name == symbol).map(|a| a.base_price)
}

/// Whether a symbol is in the catalog
pub fn is_listed(symbol: &str) -> bool {
    ASSETS.iter().any(|a| a.name == symbol)
}
