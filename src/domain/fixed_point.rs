//! Fixed-point encoding between display decimals and on-chain integers.
//!
//! Markets quote amounts and prices in ticks: a display value `d` is sent to
//! the trade contract as `floor(d * num_ticks)`. Decoding divides by
//! `num_ticks`, and the quotient may not terminate, so [`TickCodec::encode`]
//! snaps products that sit within decimal precision of a whole tick. The remaining-amount oracle
//! answers in attoshares instead (`10^18` per share), so continuation
//! amounts go through [`RemainingAmount::to_shares`] before being re-encoded
//! with the market's ticks.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tradefill::domain::fixed_point::{TickCodec, DEFAULT_NUM_TICKS};
//!
//! let codec = TickCodec::new(DEFAULT_NUM_TICKS).unwrap();
//! assert_eq!(codec.encode(dec!(10)).unwrap().to_hex(), "0x1a400");
//! assert_eq!(codec.encode(dec!(0.5)).unwrap().to_hex(), "0x1500");
//! ```

use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::DomainError;

/// Default tick count for a market (divisible by 2 through 8).
pub const DEFAULT_NUM_TICKS: u64 = 10_752;

/// Decimal places of an attoshare.
pub const ATTO_DECIMALS: u32 = 18;

/// Significant digits every `Decimal` can hold regardless of magnitude.
const DECIMAL_DIGITS: u32 = 28;

/// Unsigned on-chain integer, rendered as `0x`-prefixed lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FixedPoint(U256);

impl FixedPoint {
    pub const ZERO: Self = Self(U256::ZERO);

    #[must_use]
    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(&self) -> U256 {
        self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Hex rendering used on the wire, e.g. `0x1a400`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{:x}", self.0)
    }

    /// Parse a `0x`-prefixed hex string.
    pub fn from_hex(input: &str) -> Result<Self, DomainError> {
        let digits = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .ok_or_else(|| DomainError::Parse {
                field: "fixed-point value",
                input: input.to_string(),
            })?;
        U256::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| DomainError::Parse {
                field: "fixed-point value",
                input: input.to_string(),
            })
    }

    fn to_i128(self) -> Result<i128, DomainError> {
        u128::try_from(self.0)
            .ok()
            .and_then(|v| i128::try_from(v).ok())
            .ok_or_else(|| DomainError::Overflow {
                value: self.to_hex(),
            })
    }
}

impl From<u64> for FixedPoint {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for FixedPoint {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for FixedPoint {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s.trim())
    }
}

impl Serialize for FixedPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for FixedPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

/// Converts display decimals to and from tick-scaled fixed-point integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickCodec {
    num_ticks: u64,
}

impl TickCodec {
    /// Create a codec for a market with `num_ticks` ticks per share.
    pub fn new(num_ticks: u64) -> Result<Self, DomainError> {
        if num_ticks == 0 {
            return Err(DomainError::ZeroTicks);
        }
        Ok(Self { num_ticks })
    }

    #[must_use]
    pub const fn num_ticks(&self) -> u64 {
        self.num_ticks
    }

    /// Encode a display value as `floor(value * num_ticks)`.
    ///
    /// A product within rounding distance of a whole tick resolves to that
    /// tick, so a value obtained from [`TickCodec::decode`] encodes back to
    /// the same integer.
    pub fn encode(&self, value: Decimal) -> Result<FixedPoint, DomainError> {
        if value < Decimal::ZERO {
            return Err(DomainError::NegativeValue { value });
        }
        let scaled = value
            .checked_mul(Decimal::from(self.num_ticks))
            .ok_or_else(|| DomainError::Overflow {
                value: value.to_string(),
            })?;
        let nearest = scaled.round();
        let whole = match self.snap_tolerance(value, scaled) {
            Some(tolerance) if (scaled - nearest).abs() <= tolerance => nearest,
            _ => scaled.floor(),
        };
        let raw = whole.to_u128().ok_or_else(|| DomainError::Overflow {
            value: value.to_string(),
        })?;
        Ok(FixedPoint(U256::from(raw)))
    }

    /// Worst-case distance between `value * num_ticks` and a whole tick when
    /// `value` is a truncated quotient of that tick. `None` once the bound
    /// no longer singles out one tick.
    fn snap_tolerance(&self, value: Decimal, scaled: Decimal) -> Option<Decimal> {
        let tolerance = Decimal::from(self.num_ticks)
            .checked_mul(finest_step(value)?)?
            .checked_add(finest_step(scaled)?)?;
        (tolerance < Decimal::new(5, 1)).then_some(tolerance)
    }

    /// Encode a trade amount, rejecting amounts smaller than one tick.
    pub fn encode_amount(&self, amount: Decimal) -> Result<FixedPoint, DomainError> {
        let encoded = self.encode(amount)?;
        if encoded.is_zero() {
            return Err(DomainError::BelowTickPrecision {
                amount,
                num_ticks: self.num_ticks,
            });
        }
        Ok(encoded)
    }

    /// Decode a fixed-point integer back to its display value.
    ///
    /// Fails with [`DomainError::Overflow`] when the quotient needs more
    /// digits than a `Decimal` carries to encode back to `value`.
    pub fn decode(&self, value: FixedPoint) -> Result<Decimal, DomainError> {
        let overflow = || DomainError::Overflow {
            value: value.to_hex(),
        };
        let raw = value.to_i128()?;
        let whole = Decimal::try_from_i128_with_scale(raw, 0).map_err(|_| overflow())?;
        let display = whole
            .checked_div(Decimal::from(self.num_ticks))
            .map(|d| d.normalize())
            .ok_or_else(overflow)?;
        if self.encode(display)? != value {
            return Err(overflow());
        }
        Ok(display)
    }
}

/// One unit in the last place of the coarsest `Decimal` with `value`'s
/// integer digits.
fn finest_step(value: Decimal) -> Option<Decimal> {
    let integer = value.trunc().abs().to_u128()?;
    let digits = integer.checked_ilog10().map_or(0, |d| d + 1);
    DECIMAL_DIGITS
        .checked_sub(digits)
        .map(|scale| Decimal::new(1, scale))
}

impl Default for TickCodec {
    fn default() -> Self {
        Self {
            num_ticks: DEFAULT_NUM_TICKS,
        }
    }
}

/// Unfilled quantity of a mined trade, in attoshares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemainingAmount(FixedPoint);

impl RemainingAmount {
    pub const ZERO: Self = Self(FixedPoint::ZERO);

    #[must_use]
    pub const fn from_attoshares(value: FixedPoint) -> Self {
        Self(value)
    }

    /// Build from a share count, e.g. for simulated venues.
    ///
    /// Rounds up to the next attoshare, so a share count decoded from ticks
    /// re-encodes to the same ticks.
    pub fn from_shares(shares: Decimal) -> Result<Self, DomainError> {
        if shares < Decimal::ZERO {
            return Err(DomainError::NegativeValue { value: shares });
        }
        let atto = shares
            .checked_mul(Decimal::from(10u64.pow(ATTO_DECIMALS)))
            .ok_or_else(|| DomainError::Overflow {
                value: shares.to_string(),
            })?
            .ceil();
        let raw = atto.to_u128().ok_or_else(|| DomainError::Overflow {
            value: shares.to_string(),
        })?;
        Ok(Self(FixedPoint(U256::from(raw))))
    }

    #[must_use]
    pub const fn attoshares(&self) -> FixedPoint {
        self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Exact share count (`attoshares / 10^18`).
    pub fn to_shares(&self) -> Result<Decimal, DomainError> {
        let raw = self.0.to_i128()?;
        Decimal::try_from_i128_with_scale(raw, ATTO_DECIMALS)
            .map(|d| d.normalize())
            .map_err(|_| DomainError::Overflow {
                value: self.0.to_hex(),
            })
    }
}

impl fmt::Display for RemainingAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RemainingAmount {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FixedPoint::from_str(s).map(Self)
    }
}
