//! Exchange-agnostic domain types.
//!
//! - [`request`] - what the caller wants filled
//! - [`fixed_point`] - tick and attoshare encodings
//! - [`attempt`] - per-transaction bookkeeping
//! - [`id`] - identifier newtypes
//! - [`error`] - invariant violations

pub mod attempt;
pub mod error;
pub mod fixed_point;
pub mod id;
pub mod request;
