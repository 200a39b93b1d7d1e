//! Paper trading venue.
//!
//! An in-memory order book that implements
//! [`TradeContract`](crate::port::outbound::contract::TradeContract) and
//! [`RemainingAmountOracle`](crate::port::outbound::oracle::RemainingAmountOracle), so a trade
//! can be filled end to end without a chain.

pub mod book;
pub mod exchange;
pub mod settings;
