//! Application services (use cases).
//!
//! - [`completion`] - the trade-until-filled loop
//! - [`dispatch`] - submission strategy selection

pub mod completion;
pub mod dispatch;
