//! Configuration loading.
//!
//! - [`settings`] - top-level [`Config`](settings::Config) and validation
//! - [`logging`] - tracing subscriber setup
//! - [`market`] - tick precision
//! - [`account`] - signing account
//! - [`execution`] - trade loop guards

pub mod account;
pub mod execution;
pub mod logging;
pub mod market;
pub mod settings;
