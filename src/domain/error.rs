//! Domain validation errors.
//!
//! Returned when a trade request or a fixed-point conversion violates a
//! domain invariant. Validation happens before anything is submitted, so a
//! `DomainError` never costs a transaction fee.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Trade amount must be positive.
    #[error("amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The invalid amount that was provided.
        amount: Decimal,
    },

    /// Limit price must be positive.
    #[error("price must be positive, got {price}")]
    NonPositivePrice {
        /// The invalid price that was provided.
        price: Decimal,
    },

    /// Markets need at least one tick.
    #[error("num_ticks must be greater than 0")]
    ZeroTicks,

    /// Fixed-point values are unsigned.
    #[error("cannot encode negative value {value}")]
    NegativeValue {
        /// The negative value.
        value: Decimal,
    },

    /// The value does not fit the fixed-point or decimal range.
    #[error("{value} is out of fixed-point range")]
    Overflow {
        /// Human-readable rendering of the value.
        value: String,
    },

    /// The amount is smaller than one tick and would encode to zero.
    #[error("amount {amount} is below the market precision of 1/{num_ticks}")]
    BelowTickPrecision {
        /// The amount that rounds to zero.
        amount: Decimal,
        /// The market tick count.
        num_ticks: u64,
    },

    /// A string could not be parsed as a decimal or fixed-point value.
    #[error("cannot parse {field} from '{input}'")]
    Parse {
        /// Field being parsed.
        field: &'static str,
        /// The offending input.
        input: String,
    },
}
