//! Paper venue configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::request::Direction;

/// Simulated venue settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaperConfig {
    /// Resting orders a single transaction may consume.
    ///
    /// Stands in for the gas limit that makes on-chain fills partial.
    #[serde(default = "default_max_orders_per_trade")]
    pub max_orders_per_trade: usize,

    /// Orders resting on the book at startup.
    #[serde(default)]
    pub orders: Vec<SeedOrder>,
}

/// An order placed on the paper book before any trade runs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedOrder {
    pub market: String,
    pub outcome: u32,
    pub direction: Direction,
    pub price: Decimal,
    pub amount: Decimal,
}

const fn default_max_orders_per_trade() -> usize {
    4
}

impl Default for PaperConfig {
    fn default() -> Self {
        Self {
            max_orders_per_trade: default_max_orders_per_trade(),
            orders: Vec::new(),
        }
    }
}
