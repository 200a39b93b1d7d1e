//! Handler for the `run` command.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;
use tokio::sync::watch;
use tracing::info;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::output;
use crate::domain::attempt::FillReport;
use crate::domain::fixed_point::TickCodec;
use crate::domain::id::MarketId;
use crate::domain::request::TradeRequest;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_paper_runtime;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::observer::TradeCallbacks;

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = Config::load(&args.config)?;
    if let Some(num_ticks) = args.num_ticks {
        config.market.num_ticks = num_ticks;
    }
    if let Some(max_iterations) = args.max_iterations {
        config.execution.max_iterations = max_iterations;
    }
    if output::verbosity() > 0 {
        config.logging.level = "debug".into();
    }
    config.init_logging();

    let request = TradeRequest::builder()
        .meta(config.meta()?)
        .direction(args.direction)
        .market(args.market.as_str())
        .outcome(args.outcome)
        .amount(args.amount)
        .price(args.price)
        .num_ticks(config.market.num_ticks)
        .trade_group_id(args.trade_group_id.as_str())
        .take_only(args.take_only)
        .build()?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
        }
    });
    let runtime = build_paper_runtime(&config, Some(shutdown_rx))?;

    print_request(&request);

    let sent = Arc::new(AtomicUsize::new(0));
    let callbacks = TradeCallbacks::new().with_on_sent(move |tx| {
        let iteration = sent.fetch_add(1, Ordering::Relaxed) + 1;
        output::sent(iteration, tx.hash.as_str());
    });

    let report = runtime.completion.run(&request, &callbacks).await?;

    print_report(&report, request.num_ticks())?;
    let market = MarketId::new(args.market.as_str());
    output::field(
        "Resting",
        runtime
            .exchange
            .depth(&market, args.outcome, request.direction()),
    );
    Ok(())
}

fn print_request(request: &TradeRequest) {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Market", request.market());
    output::field("Outcome", request.outcome());
    output::field("Direction", request.direction());
    output::field("Amount", request.amount());
    output::field("Price", request.price());
    output::field(
        "Strategy",
        if request.take_only() {
            "take only"
        } else {
            "trade"
        },
    );
    if output::verbosity() > 0 {
        output::field("Ticks", request.num_ticks());
        output::field("Trade group", request.trade_group_id());
        output::field("Account", request.meta().account_type);
    }
    output::section("Transactions");
}

fn print_report(report: &FillReport, num_ticks: u64) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "type": "report",
            "payload": serde_json::to_value(report)?,
        }));
        return Ok(());
    }

    let codec = TickCodec::new(num_ticks)?;
    output::section("Fill Report");
    let widths = [4, 12, 12, 66];
    output::table_header(&[
        ("#", widths[0]),
        ("Amount", widths[1]),
        ("Remaining", widths[2]),
        ("Transaction", widths[3]),
    ]);
    for attempt in report.attempts() {
        let remaining = match attempt.remaining() {
            Some(remaining) => remaining.to_shares()?.to_string(),
            None => "-".to_string(),
        };
        output::table_row(
            &[
                attempt.iteration().to_string(),
                codec.decode(attempt.fxp_amount())?.to_string(),
                remaining,
                attempt
                    .tx_hash()
                    .map_or_else(|| "-".to_string(), ToString::to_string),
            ],
            &widths,
        );
    }
    output::success(&format!(
        "Filled in {} transaction(s)",
        output::highlight(report.transactions())
    ));
    Ok(())
}
