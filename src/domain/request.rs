//! Trade requests: the immutable description of what a caller wants filled.
//!
//! A [`TradeRequest`] is validated once at construction and never mutated;
//! every transaction of a run is derived from it plus the amount still
//! unfilled.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tradefill::domain::request::{Direction, TradeRequest};
//!
//! let request = TradeRequest::builder()
//!     .direction(Direction::Buy)
//!     .market("MARKET_ADDRESS")
//!     .outcome(2)
//!     .amount(dec!(10))
//!     .price(dec!(0.5))
//!     .build()
//!     .unwrap();
//!
//! assert!(!request.take_only());
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::fixed_point::DEFAULT_NUM_TICKS;
use super::id::{MarketId, TradeGroupId};

/// Trade direction. The discriminant is the on-chain encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Direction {
    Buy = 0,
    Sell = 1,
}

impl Direction {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// The side a resting order must be on to match this direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => f.write_str("buy"),
            Self::Sell => f.write_str("sell"),
        }
    }
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" | "0" => Ok(Self::Buy),
            "sell" | "1" => Ok(Self::Sell),
            _ => Err(DomainError::Parse {
                field: "direction",
                input: s.to_string(),
            }),
        }
    }
}

/// How the signer's key is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountType {
    #[default]
    PrivateKey,
    Ledger,
    Trezor,
    Edge,
    UnlockedEthereumNode,
    MetaMask,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PrivateKey => "privateKey",
            Self::Ledger => "ledger",
            Self::Trezor => "trezor",
            Self::Edge => "edge",
            Self::UnlockedEthereumNode => "unlockedEthereumNode",
            Self::MetaMask => "metaMask",
        };
        f.write_str(name)
    }
}

/// Opaque signer material handed to the transport. Never logged.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Signer(Vec<u8>);

impl Signer {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signer(<{} bytes redacted>)", self.0.len())
    }
}

/// Signing identity attached to every transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Meta {
    pub signer: Signer,
    pub account_type: AccountType,
}

impl Meta {
    pub fn new(signer: Signer, account_type: AccountType) -> Self {
        Self {
            signer,
            account_type,
        }
    }
}

/// Immutable description of a trade to fill completely.
#[derive(Debug, Clone)]
pub struct TradeRequest {
    meta: Meta,
    direction: Direction,
    market: MarketId,
    outcome: u32,
    amount: Decimal,
    price: Decimal,
    num_ticks: u64,
    trade_group_id: TradeGroupId,
    take_only: bool,
}

impl TradeRequest {
    #[must_use]
    pub fn builder() -> TradeRequestBuilder {
        TradeRequestBuilder::default()
    }

    #[must_use]
    pub const fn meta(&self) -> &Meta {
        &self.meta
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub const fn market(&self) -> &MarketId {
        &self.market
    }

    #[must_use]
    pub const fn outcome(&self) -> u32 {
        self.outcome
    }

    /// Requested amount in shares.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Limit price per share.
    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    #[must_use]
    pub const fn num_ticks(&self) -> u64 {
        self.num_ticks
    }

    #[must_use]
    pub const fn trade_group_id(&self) -> &TradeGroupId {
        &self.trade_group_id
    }

    /// Only match resting orders; never create one.
    #[must_use]
    pub const fn take_only(&self) -> bool {
        self.take_only
    }
}

/// Builder for [`TradeRequest`].
#[derive(Debug, Clone)]
pub struct TradeRequestBuilder {
    meta: Meta,
    direction: Direction,
    market: Option<MarketId>,
    outcome: u32,
    amount: Decimal,
    price: Decimal,
    num_ticks: u64,
    trade_group_id: TradeGroupId,
    take_only: bool,
}

impl Default for TradeRequestBuilder {
    fn default() -> Self {
        Self {
            meta: Meta::default(),
            direction: Direction::Buy,
            market: None,
            outcome: 0,
            amount: Decimal::ZERO,
            price: Decimal::ZERO,
            num_ticks: DEFAULT_NUM_TICKS,
            trade_group_id: TradeGroupId::default(),
            take_only: false,
        }
    }
}

impl TradeRequestBuilder {
    #[must_use]
    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn market(mut self, market: impl Into<MarketId>) -> Self {
        self.market = Some(market.into());
        self
    }

    #[must_use]
    pub fn outcome(mut self, outcome: u32) -> Self {
        self.outcome = outcome;
        self
    }

    #[must_use]
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    #[must_use]
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    #[must_use]
    pub fn num_ticks(mut self, num_ticks: u64) -> Self {
        self.num_ticks = num_ticks;
        self
    }

    #[must_use]
    pub fn trade_group_id(mut self, id: impl Into<TradeGroupId>) -> Self {
        self.trade_group_id = id.into();
        self
    }

    #[must_use]
    pub fn take_only(mut self, take_only: bool) -> Self {
        self.take_only = take_only;
        self
    }

    /// Validate and build the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount or price is not positive, the tick
    /// count is zero, or no market was given.
    pub fn build(self) -> Result<TradeRequest, DomainError> {
        if self.amount <= Decimal::ZERO {
            return Err(DomainError::NonPositiveAmount {
                amount: self.amount,
            });
        }
        if self.price <= Decimal::ZERO {
            return Err(DomainError::NonPositivePrice { price: self.price });
        }
        if self.num_ticks == 0 {
            return Err(DomainError::ZeroTicks);
        }
        let market = self.market.ok_or_else(|| DomainError::Parse {
            field: "market",
            input: String::new(),
        })?;

        Ok(TradeRequest {
            meta: self.meta,
            direction: self.direction,
            market,
            outcome: self.outcome,
            amount: self.amount,
            price: self.price,
            num_ticks: self.num_ticks,
            trade_group_id: self.trade_group_id,
            take_only: self.take_only,
        })
    }
}
