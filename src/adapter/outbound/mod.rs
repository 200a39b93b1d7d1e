//! Outbound adapters implementing the venue ports.

pub mod paper;
