//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the chain-facing dependencies of the engine:
//! the trade contract transport and the remaining-amount oracle.

pub mod contract;
pub mod oracle;
