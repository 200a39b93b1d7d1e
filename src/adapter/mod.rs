//! Adapters connecting the application to the outside world.
//!
//! - [`inbound`] - command-line interface
//! - [`outbound`] - venue implementations of the trade ports

pub mod inbound;
pub mod outbound;
