//! Trade contract port.
//!
//! Abstracts the transport that signs, broadcasts and confirms trade
//! transactions. The two submission entry points mirror the market's trade
//! contract:
//!
//! - `public_trade` matches resting orders and rests whatever is unmatched
//! - `public_take_best_order` only matches resting orders and never creates one
//!
//! Submission resolves once the network has accepted the transaction; mining
//! is awaited separately through [`TradeContract::wait_for_receipt`].

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::fixed_point::FixedPoint;
use crate::domain::id::{MarketId, TradeGroupId, TxHash};
use crate::domain::request::{Direction, Meta};
use crate::error::TransportError;

/// Arguments shared by both submission entry points.
#[derive(Debug, Clone)]
pub struct TradePayload {
    /// Signing identity.
    pub meta: Meta,
    pub direction: Direction,
    pub market: MarketId,
    pub outcome: u32,
    /// Amount in ticks.
    pub fxp_amount: FixedPoint,
    /// Limit price in ticks.
    pub fxp_price: FixedPoint,
    pub trade_group_id: TradeGroupId,
}

/// Network acknowledgment of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionInfo {
    pub hash: TxHash,
}

impl TransactionInfo {
    pub fn new(hash: impl Into<TxHash>) -> Self {
        Self { hash: hash.into() }
    }
}

/// Terminal on-chain status of a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptStatus {
    Success,
    Reverted { reason: String },
}

/// Receipt of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub tx_hash: TxHash,
    pub status: ReceiptStatus,
    pub block_number: Option<u64>,
}

impl Receipt {
    #[must_use]
    pub fn success(tx_hash: TxHash, block_number: Option<u64>) -> Self {
        Self {
            tx_hash,
            status: ReceiptStatus::Success,
            block_number,
        }
    }

    #[must_use]
    pub fn reverted(tx_hash: TxHash, reason: impl Into<String>) -> Self {
        Self {
            tx_hash,
            status: ReceiptStatus::Reverted {
                reason: reason.into(),
            },
            block_number: None,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, ReceiptStatus::Success)
    }
}

/// Transport for the market's trade contract.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`); one transport is
/// shared by every concurrent run.
#[async_trait]
pub trait TradeContract: Send + Sync {
    /// Submit a trade that may rest an order for the unmatched remainder.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be signed or broadcast.
    async fn public_trade(&self, payload: &TradePayload) -> Result<TransactionInfo, TransportError>;

    /// Submit a trade that only takes existing orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be signed or broadcast.
    async fn public_take_best_order(
        &self,
        payload: &TradePayload,
    ) -> Result<TransactionInfo, TransportError>;

    /// Wait until the transaction is included in a block.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be obtained. A reverted
    /// transaction is not an error here; it is reported through
    /// [`ReceiptStatus::Reverted`].
    async fn wait_for_receipt(&self, tx_hash: &TxHash) -> Result<Receipt, TransportError>;

    /// Venue name for logging.
    fn venue_name(&self) -> &'static str;
}
