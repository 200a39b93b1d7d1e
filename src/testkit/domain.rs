//! Builders for domain primitives used across tests.
//!
//! The canonical request is "buy 10 shares of outcome 2 at 0.5" on
//! `MARKET_ADDRESS` with the default tick count.

use rust_decimal_macros::dec;

use crate::domain::fixed_point::{FixedPoint, RemainingAmount, DEFAULT_NUM_TICKS};
use crate::domain::request::{AccountType, Direction, Meta, Signer, TradeRequest, TradeRequestBuilder};
use crate::domain::id::{MarketId, TradeGroupId};
use crate::port::outbound::contract::TradePayload;

/// Signer bytes used by every test request.
pub const SIGNER: &[u8] = b"PRIVATE_KEY";

/// Market label used by every test request.
pub const MARKET: &str = "MARKET_ADDRESS";

pub fn meta() -> Meta {
    Meta::new(Signer::new(SIGNER.to_vec()), AccountType::PrivateKey)
}

/// Builder preloaded with the canonical request.
pub fn request_builder() -> TradeRequestBuilder {
    TradeRequest::builder()
        .meta(meta())
        .direction(Direction::Buy)
        .market(MARKET)
        .outcome(2)
        .amount(dec!(10))
        .price(dec!(0.5))
        .num_ticks(DEFAULT_NUM_TICKS)
        .trade_group_id("0x1")
}

/// The canonical request.
pub fn request() -> TradeRequest {
    request_builder()
        .build()
        .expect("canonical request is valid")
}

/// Payload the canonical request produces on its first transaction.
pub fn payload() -> TradePayload {
    TradePayload {
        meta: meta(),
        direction: Direction::Buy,
        market: MarketId::from(MARKET),
        outcome: 2,
        fxp_amount: FixedPoint::from(0x1a400),
        fxp_price: FixedPoint::from(0x1500),
        trade_group_id: TradeGroupId::from("0x1"),
    }
}

/// Parse a hex remaining amount such as `0x29a2241af62c0000`.
pub fn remaining(hex: &str) -> RemainingAmount {
    hex.parse().expect("valid hex remaining amount")
}
