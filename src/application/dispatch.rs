//! Submission strategy selection.
//!
//! A run picks its [`ExecutionStrategy`] once from the request's `take_only`
//! flag and keeps it for every transaction it sends.

use std::fmt;

use crate::domain::request::TradeRequest;
use crate::error::TransportError;
use crate::port::outbound::contract::{TradeContract, TradePayload, TransactionInfo};

/// How a transaction is submitted to the trade contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Match resting orders and rest the unmatched remainder (`publicTrade`).
    Full,
    /// Only match resting orders (`publicTakeBestOrder`).
    TakeOnly,
}

impl ExecutionStrategy {
    #[must_use]
    pub const fn for_request(request: &TradeRequest) -> Self {
        if request.take_only() {
            Self::TakeOnly
        } else {
            Self::Full
        }
    }

    /// Whether a transaction sent with this strategy may create an order.
    #[must_use]
    pub const fn creates_orders(self) -> bool {
        matches!(self, Self::Full)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::TakeOnly => "take_only",
        }
    }

    /// Send one transaction through the entry point this strategy maps to.
    ///
    /// # Errors
    ///
    /// Propagates the transport's rejection unchanged.
    pub async fn submit(
        self,
        contract: &dyn TradeContract,
        payload: &TradePayload,
    ) -> Result<TransactionInfo, TransportError> {
        match self {
            Self::Full => contract.public_trade(payload).await,
            Self::TakeOnly => contract.public_take_best_order(payload).await,
        }
    }
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::contract::{EntryPoint, ScriptedContract};
    use crate::testkit::domain;

    #[test]
    fn take_only_flag_selects_strategy() {
        let full = domain::request_builder().take_only(false).build().unwrap();
        let take = domain::request_builder().take_only(true).build().unwrap();

        assert_eq!(ExecutionStrategy::for_request(&full), ExecutionStrategy::Full);
        assert_eq!(ExecutionStrategy::for_request(&take), ExecutionStrategy::TakeOnly);
        assert!(ExecutionStrategy::Full.creates_orders());
        assert!(!ExecutionStrategy::TakeOnly.creates_orders());
    }

    #[tokio::test]
    async fn submit_routes_to_matching_entry_point() {
        let contract = ScriptedContract::new();
        let payload = domain::payload();

        ExecutionStrategy::Full.submit(&contract, &payload).await.unwrap();
        ExecutionStrategy::TakeOnly.submit(&contract, &payload).await.unwrap();

        let entries: Vec<EntryPoint> = contract.calls().iter().map(|c| c.entry).collect();
        assert_eq!(entries, vec![EntryPoint::PublicTrade, EntryPoint::PublicTakeBestOrder]);
    }
}
