//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`contract`] - [`ScriptedContract`](contract::ScriptedContract), a
//!   [`TradeContract`](crate::port::outbound::contract::TradeContract) with scripted failures
//! - [`oracle`] - [`ScriptedOracle`](oracle::ScriptedOracle) answering from a queue
//! - [`observer`] - [`RecordingObserver`](observer::RecordingObserver) for callback assertions
//! - [`domain`] - Builders for requests and payloads
//! - [`config`] - Canonical test configurations

pub mod config;
pub mod contract;
pub mod domain;
pub mod observer;
pub mod oracle;
