//! Tradefill - fill on-chain order-book trades completely.
//!
//! A single transaction against an on-chain order book may only partially
//! fill. This crate keeps submitting transactions for whatever the chain
//! reports as still unfilled until nothing is left, then signals completion
//! exactly once.
//!
//! # Architecture
//!
//! - [`domain`] - Requests, fixed-point encoding, attempt bookkeeping
//! - [`port`] - Venue traits (contract transport, remaining-amount oracle)
//!   and the caller-facing observer
//! - [`application`] - The trade completion loop and strategy dispatch
//! - [`adapter`] - CLI and the in-memory paper venue
//! - [`infrastructure`] - Configuration, logging and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use rust_decimal_macros::dec;
//! use tradefill::adapter::outbound::paper::exchange::PaperExchange;
//! use tradefill::application::completion::TradeCompletionLoop;
//! use tradefill::domain::request::{AccountType, Direction, Meta, Signer, TradeRequest};
//! use tradefill::port::inbound::observer::NoopObserver;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let venue = Arc::new(PaperExchange::new(10_752, 4)?);
//! let completion = TradeCompletionLoop::new(venue.clone(), venue);
//!
//! let request = TradeRequest::builder()
//!     .meta(Meta::new(Signer::new(b"key".to_vec()), AccountType::PrivateKey))
//!     .direction(Direction::Buy)
//!     .market("MARKET_ADDRESS")
//!     .outcome(2)
//!     .amount(dec!(10))
//!     .price(dec!(0.5))
//!     .build()?;
//!
//! let report = completion.run(&request, &NoopObserver).await?;
//! println!("filled in {} transactions", report.transactions());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
