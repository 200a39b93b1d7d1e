//! Handler for the `config` command group.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::{Config, SIGNER_ENV};

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    if output::is_json() {
        output::json_output(serde_json::to_value(&config)?);
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Path", path.display());
    output::field("Log level", &config.logging.level);
    output::field("Log format", &config.logging.format);

    output::section("Market");
    output::field("Ticks", config.market.num_ticks);

    output::section("Execution");
    output::field("Max txs", config.execution.max_iterations);
    output::field("Submit", seconds(config.execution.submission_timeout_secs));
    output::field("Confirm", seconds(config.execution.confirmation_timeout_secs));
    output::field("Remaining", seconds(config.execution.remaining_timeout_secs));
    output::field("Fail on stall", config.execution.fail_on_stall);

    output::section("Account");
    output::field("Type", config.account.account_type);
    if config.account.signer.is_some() {
        output::success(&format!("Signer loaded from {SIGNER_ENV}"));
    } else {
        output::warning(&format!("{SIGNER_ENV} not set"));
    }

    output::section("Paper Venue");
    output::field("Orders/tx", config.paper.max_orders_per_trade);
    output::field("Seed orders", config.paper.orders.len());
    for order in &config.paper.orders {
        output::note(&format!(
            "{} {} @ {} on {}#{}",
            order.direction, order.amount, order.price, order.market, order.outcome
        ));
    }
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    Config::load(path)?;
    output::success("Configuration is valid");
    output::field("Path", path.display());
    Ok(())
}

fn seconds(secs: u64) -> String {
    if secs == 0 {
        "disabled".to_string()
    } else {
        format!("{secs}s")
    }
}
