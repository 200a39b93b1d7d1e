//! Trade-until-filled loop.
//!
//! A single transaction may only partially fill against the liquidity that
//! happens to be resting when it is mined. [`TradeCompletionLoop`] keeps
//! submitting transactions for whatever the chain reports as still unfilled
//! until nothing is left:
//!
//! ```text
//! amount ──encode──▶ submit ──▶ on_sent ──▶ receipt ──▶ remaining?
//!    ▲                                                     │
//!    └────────────── to_shares ◀──────── nonzero ◀─────────┤
//!                                                  zero ──▶ on_success
//! ```
//!
//! Transactions are strictly sequential: the next one is only sent after
//! the previous one has been mined and its remaining amount read. Any
//! failure ends the run; only the success path resubmits.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::dispatch::ExecutionStrategy;
use crate::domain::attempt::{FillReport, TradeAttempt};
use crate::domain::fixed_point::TickCodec;
use crate::domain::id::TxHash;
use crate::domain::request::TradeRequest;
use crate::error::{Stage, TradeError};
use crate::port::inbound::observer::TradeObserver;
use crate::port::outbound::contract::{ReceiptStatus, TradeContract, TradePayload};
use crate::port::outbound::oracle::RemainingAmountOracle;

/// Guards applied to every run of a [`TradeCompletionLoop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopConfig {
    /// Maximum transactions per run. `None` keeps going until filled.
    pub max_iterations: Option<u32>,
    /// Time allowed for the network to acknowledge a transaction.
    pub submission_timeout: Option<Duration>,
    /// Time allowed for a transaction to be mined.
    pub confirmation_timeout: Option<Duration>,
    /// Time allowed for the remaining-amount query.
    pub remaining_timeout: Option<Duration>,
    /// Fail when a mined transaction filled nothing.
    pub fail_on_stall: bool,
}

impl LoopConfig {
    /// No iteration cap, no timeouts, no stall detection.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_iterations: None,
            submission_timeout: None,
            confirmation_timeout: None,
            remaining_timeout: None,
            fail_on_stall: false,
        }
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_iterations: Some(64),
            submission_timeout: Some(Duration::from_secs(60)),
            confirmation_timeout: Some(Duration::from_secs(600)),
            remaining_timeout: Some(Duration::from_secs(60)),
            fail_on_stall: true,
        }
    }
}

/// Fills a [`TradeRequest`] completely, one transaction at a time.
///
/// The loop owns no per-request state, so one instance can serve any number
/// of concurrent runs.
#[derive(Clone)]
pub struct TradeCompletionLoop {
    contract: Arc<dyn TradeContract>,
    oracle: Arc<dyn RemainingAmountOracle>,
    config: LoopConfig,
    shutdown: Option<watch::Receiver<bool>>,
}

impl TradeCompletionLoop {
    pub fn new(contract: Arc<dyn TradeContract>, oracle: Arc<dyn RemainingAmountOracle>) -> Self {
        Self {
            contract,
            oracle,
            config: LoopConfig::default(),
            shutdown: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: LoopConfig) -> Self {
        self.config = config;
        self
    }

    /// Abandon in-flight runs once `shutdown` turns `true`.
    #[must_use]
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Fill `request`, reporting progress to `observer`.
    ///
    /// `observer.on_sent` fires once per acknowledged transaction, then
    /// exactly one of `on_success` or `on_failed`.
    ///
    /// # Errors
    ///
    /// Returns the [`TradeError`] that ended the run; the same error is
    /// passed to `observer.on_failed`.
    pub async fn run(
        &self,
        request: &TradeRequest,
        observer: &dyn TradeObserver,
    ) -> Result<FillReport, TradeError> {
        let result = self.fill(request, observer).await;
        match &result {
            Ok(report) => {
                info!(
                    market = %request.market(),
                    outcome = request.outcome(),
                    transactions = report.transactions(),
                    "Trade filled"
                );
                observer.on_success();
            }
            Err(error) => {
                warn!(
                    market = %request.market(),
                    outcome = request.outcome(),
                    error = %error,
                    "Trade stopped"
                );
                observer.on_failed(error);
            }
        }
        result
    }

    async fn fill(
        &self,
        request: &TradeRequest,
        observer: &dyn TradeObserver,
    ) -> Result<FillReport, TradeError> {
        let strategy = ExecutionStrategy::for_request(request);
        let codec = TickCodec::new(request.num_ticks())?;
        let fxp_price = codec.encode(request.price())?;

        let mut amount = request.amount();
        let mut attempts = Vec::new();
        let mut iteration: u32 = 0;

        loop {
            iteration = iteration.saturating_add(1);
            if let Some(limit) = self.config.max_iterations {
                if iteration > limit {
                    return Err(TradeError::IterationLimit {
                        limit,
                        remaining: amount,
                    });
                }
            }

            let fxp_amount = codec.encode_amount(amount)?;
            let payload = TradePayload {
                meta: request.meta().clone(),
                direction: request.direction(),
                market: request.market().clone(),
                outcome: request.outcome(),
                fxp_amount,
                fxp_price,
                trade_group_id: request.trade_group_id().clone(),
            };
            let mut attempt = TradeAttempt::new(iteration, fxp_amount);

            debug!(
                iteration,
                strategy = %strategy,
                amount = %amount,
                fxp_amount = %fxp_amount,
                fxp_price = %fxp_price,
                venue = self.contract.venue_name(),
                "Submitting trade transaction"
            );

            let sent = self
                .guard(
                    Stage::Submission,
                    self.config.submission_timeout,
                    strategy.submit(self.contract.as_ref(), &payload),
                )
                .await?
                .map_err(|source| TradeError::Submission { iteration, source })?;
            attempt.mark_sent(sent.hash.clone());
            info!(
                iteration,
                tx_hash = %sent.hash,
                fxp_amount = %fxp_amount,
                strategy = %strategy,
                "Trade transaction sent"
            );
            observer.on_sent(&sent);

            let confirmed = self
                .guard(
                    Stage::Confirmation,
                    self.config.confirmation_timeout,
                    self.contract.wait_for_receipt(&sent.hash),
                )
                .await?;
            let receipt = match confirmed {
                Ok(receipt) => receipt,
                Err(e) => return Err(mining_failure(sent.hash, attempt, e.to_string())),
            };
            if let ReceiptStatus::Reverted { reason } = receipt.status {
                warn!(iteration, tx_hash = %sent.hash, reason = %reason, "Trade transaction reverted");
                return Err(mining_failure(sent.hash, attempt, reason));
            }
            attempt.mark_mined();

            let remaining = self
                .guard(
                    Stage::RemainingQuery,
                    self.config.remaining_timeout,
                    self.oracle.trade_amount_remaining(&sent.hash),
                )
                .await?
                .map_err(|source| TradeError::Oracle {
                    tx_hash: sent.hash.clone(),
                    source,
                })?;
            attempt.record_remaining(remaining);
            attempts.push(attempt);

            if remaining.is_zero() {
                return Ok(FillReport::new(attempts));
            }

            let next = remaining.to_shares()?;
            if self.config.fail_on_stall && codec.encode(next)? >= fxp_amount {
                return Err(TradeError::Stalled {
                    tx_hash: sent.hash,
                    remaining: next,
                });
            }

            info!(
                iteration,
                tx_hash = %sent.hash,
                remaining = %next,
                "Trade partially filled, submitting remainder"
            );
            amount = next;
        }
    }

    /// Await `fut` under the stage timeout and the shutdown signal.
    async fn guard<T>(
        &self,
        stage: Stage,
        limit: Option<Duration>,
        fut: impl Future<Output = T>,
    ) -> Result<T, TradeError> {
        let timed = async move {
            match limit {
                Some(after) => tokio::time::timeout(after, fut)
                    .await
                    .map_err(|_| TradeError::Timeout { stage, after }),
                None => Ok(fut.await),
            }
        };

        let Some(shutdown) = &self.shutdown else {
            return timed.await;
        };
        let mut shutdown = shutdown.clone();
        if *shutdown.borrow_and_update() {
            return Err(TradeError::Cancelled { stage });
        }

        tokio::select! {
            result = timed => result,
            () = wait_for_shutdown(&mut shutdown) => Err(TradeError::Cancelled { stage }),
        }
    }
}

fn mining_failure(tx_hash: TxHash, mut attempt: TradeAttempt, reason: String) -> TradeError {
    attempt.mark_failed(reason.as_str());
    TradeError::MiningFailure {
        tx_hash,
        reason,
        attempt: Box::new(attempt),
    }
}

/// Resolves once the flag turns `true`; never resolves if the sender is gone.
async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
        if *shutdown.borrow() {
            return;
        }
    }
}
