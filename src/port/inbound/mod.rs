//! Inbound (driving) ports consumed by inbound adapters.
//!
//! - [`observer`]: progress callbacks a caller supplies to a run

pub mod observer;
