//! Signing account configuration.

use serde::{Deserialize, Serialize};

use crate::domain::request::AccountType;

/// Signing account configuration.
/// Signer material is loaded from `TRADEFILL_SIGNER` env var at runtime (never from config file).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AccountConfig {
    /// How the key is held.
    #[serde(default, rename = "type")]
    pub account_type: AccountType,
    /// Signer loaded from `TRADEFILL_SIGNER` env var at runtime
    #[serde(skip)]
    pub signer: Option<String>,
}
