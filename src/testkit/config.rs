//! Canonical test configurations.
//!
//! Single source of truth for config values used across tests.

use std::time::Duration;

use crate::application::completion::LoopConfig;

/// Loop guards with short timeouts so stalled tests fail fast.
pub fn fast_loop() -> LoopConfig {
    LoopConfig {
        max_iterations: Some(16),
        submission_timeout: Some(Duration::from_millis(500)),
        confirmation_timeout: Some(Duration::from_millis(500)),
        remaining_timeout: Some(Duration::from_millis(500)),
        fail_on_stall: true,
    }
}

/// Smallest TOML document that passes validation.
pub const MINIMAL_TOML: &str = r#"
[logging]
level = "info"
format = "pretty"
"#;

/// Config with a seeded paper book: 4 + 3 + 5 shares offered at or below 0.5.
pub const PAPER_TOML: &str = r#"
[logging]
level = "warn"
format = "pretty"

[market]
num_ticks = 10752

[execution]
max_iterations = 8

[paper]
max_orders_per_trade = 1

[[paper.orders]]
market = "MARKET_ADDRESS"
outcome = 2
direction = "sell"
price = "0.45"
amount = "4"

[[paper.orders]]
market = "MARKET_ADDRESS"
outcome = 2
direction = "sell"
price = "0.5"
amount = "3"

[[paper.orders]]
market = "MARKET_ADDRESS"
outcome = 2
direction = "sell"
price = "0.5"
amount = "5"
"#;
