//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::adapter::outbound::paper::exchange::PaperExchange;
use crate::application::completion::TradeCompletionLoop;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// A trade loop wired to the paper venue.
pub struct PaperRuntime {
    pub exchange: Arc<PaperExchange>,
    pub completion: TradeCompletionLoop,
}

/// Build the paper venue and a loop that trades against it.
///
/// # Errors
///
/// Returns an error if the configured book cannot be seeded.
pub fn build_paper_runtime(
    config: &Config,
    shutdown: Option<watch::Receiver<bool>>,
) -> Result<PaperRuntime> {
    let exchange = Arc::new(PaperExchange::from_config(
        &config.paper,
        config.market.num_ticks,
    )?);
    info!(
        num_ticks = config.market.num_ticks,
        seeded_orders = config.paper.orders.len(),
        max_orders_per_trade = config.paper.max_orders_per_trade,
        "Paper venue ready"
    );

    let mut completion = TradeCompletionLoop::new(exchange.clone(), exchange.clone())
        .with_config(config.loop_config());
    if let Some(shutdown) = shutdown {
        completion = completion.with_shutdown(shutdown);
    }

    Ok(PaperRuntime {
        exchange,
        completion,
    })
}
