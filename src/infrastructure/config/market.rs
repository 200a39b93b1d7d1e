//! Market precision settings.

use serde::{Deserialize, Serialize};

use crate::domain::fixed_point::DEFAULT_NUM_TICKS;

/// Market settings shared by every request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketConfig {
    /// Ticks per share used for fixed-point encoding (default: 10752).
    #[serde(default = "default_num_ticks")]
    pub num_ticks: u64,
}

const fn default_num_ticks() -> u64 {
    DEFAULT_NUM_TICKS
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            num_ticks: default_num_ticks(),
        }
    }
}
