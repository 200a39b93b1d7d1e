//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for sensitive values like `TRADEFILL_SIGNER`.
//!
//! # Example
//!
//! ```no_run
//! use tradefill::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::account::AccountConfig;
use super::execution::ExecutionConfig;
use super::logging::LoggingConfig;
use super::market::MarketConfig;
use crate::adapter::outbound::paper::settings::PaperConfig;
use crate::application::completion::LoopConfig;
use crate::domain::request::{Meta, Signer};
use crate::error::{ConfigError, Result};

/// Environment variable holding the signer material.
pub const SIGNER_ENV: &str = "TRADEFILL_SIGNER";

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Market precision.
    #[serde(default)]
    pub market: MarketConfig,

    /// Signing account.
    ///
    /// Signer material is loaded from the `TRADEFILL_SIGNER` environment variable.
    #[serde(default)]
    pub account: AccountConfig,

    /// Trade loop guards.
    #[serde(default)]
    pub execution: ExecutionConfig,

    /// Paper venue and its seeded book.
    #[serde(default)]
    pub paper: PaperConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Loads the signer from the `TRADEFILL_SIGNER` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., zero ticks)
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        // Signer comes from the environment only, never from the file
        config.account.signer = std::env::var(SIGNER_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty());

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if !self.logging.is_known_format() {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: "must be 'pretty' or 'json'".to_string(),
            }
            .into());
        }
        if self.market.num_ticks == 0 {
            return Err(ConfigError::InvalidValue {
                field: "num_ticks",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.execution.max_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_iterations",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.paper.max_orders_per_trade == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_orders_per_trade",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        for order in &self.paper.orders {
            if order.market.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "paper.orders.market",
                }
                .into());
            }
            if order.price <= Decimal::ZERO {
                return Err(ConfigError::InvalidValue {
                    field: "paper.orders.price",
                    reason: format!("must be greater than 0, got {}", order.price),
                }
                .into());
            }
            if order.amount <= Decimal::ZERO {
                return Err(ConfigError::InvalidValue {
                    field: "paper.orders.amount",
                    reason: format!("must be greater than 0, got {}", order.amount),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Signing identity for trade requests.
    ///
    /// # Errors
    ///
    /// Returns an error if `TRADEFILL_SIGNER` was not set.
    pub fn meta(&self) -> Result<Meta> {
        let signer = self
            .account
            .signer
            .as_ref()
            .ok_or(ConfigError::MissingField { field: SIGNER_ENV })?;
        Ok(Meta::new(
            Signer::new(signer.as_bytes().to_vec()),
            self.account.account_type,
        ))
    }

    /// Trade loop guards.
    #[must_use]
    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig::from(&self.execution)
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
