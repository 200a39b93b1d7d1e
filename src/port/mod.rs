//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the completion loop and the outside world.
//! Adapters implement them; the application layer only sees the traits.
//!
//! # Available Ports
//!
//! - [`TradeContract`](outbound::contract::TradeContract) - sign, broadcast and confirm trade transactions
//! - [`RemainingAmountOracle`](outbound::oracle::RemainingAmountOracle) - read the unfilled amount of a mined trade
//! - [`TradeObserver`](inbound::observer::TradeObserver) - caller-supplied progress callbacks

pub mod inbound;
pub mod outbound;
