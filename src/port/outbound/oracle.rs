//! Remaining-amount oracle port.

use async_trait::async_trait;

use crate::domain::fixed_point::RemainingAmount;
use crate::domain::id::TxHash;
use crate::error::TransportError;

/// Reports how much of a mined trade was left unfilled.
///
/// The chain's matching outcome depends on concurrent order-book activity,
/// so this is the only source of truth for the remaining amount.
#[async_trait]
pub trait RemainingAmountOracle: Send + Sync {
    /// Unfilled attoshares of the trade mined in `tx_hash`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or its trade log cannot be read.
    async fn trade_amount_remaining(
        &self,
        tx_hash: &TxHash,
    ) -> Result<RemainingAmount, TransportError>;
}
