//! Per-transaction bookkeeping for a trade-until-filled run.
//!
//! - [`TradeAttempt`] - one submitted transaction and its lifecycle
//! - [`FillReport`] - the ordered attempts of a completed run

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::fixed_point::{FixedPoint, RemainingAmount};
use super::id::TxHash;

/// Lifecycle of a single transaction.
///
/// `Pending -> Sent -> Mined` on success; `Failed` from either of the first
/// two states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "reason")]
pub enum AttemptStatus {
    Pending,
    Sent,
    Mined,
    Failed(String),
}

/// One transaction submitted while filling a request.
#[derive(Debug, Clone, Serialize)]
pub struct TradeAttempt {
    iteration: u32,
    fxp_amount: FixedPoint,
    tx_hash: Option<TxHash>,
    status: AttemptStatus,
    remaining: Option<RemainingAmount>,
    started_at: DateTime<Utc>,
}

impl TradeAttempt {
    #[must_use]
    pub fn new(iteration: u32, fxp_amount: FixedPoint) -> Self {
        Self {
            iteration,
            fxp_amount,
            tx_hash: None,
            status: AttemptStatus::Pending,
            remaining: None,
            started_at: Utc::now(),
        }
    }

    /// Record the network acknowledgment.
    pub fn mark_sent(&mut self, tx_hash: TxHash) {
        self.tx_hash = Some(tx_hash);
        self.status = AttemptStatus::Sent;
    }

    /// Record a successful receipt.
    pub fn mark_mined(&mut self) {
        self.status = AttemptStatus::Mined;
    }

    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.status = AttemptStatus::Failed(reason.into());
    }

    /// Record what the oracle reported as still unfilled.
    pub fn record_remaining(&mut self, remaining: RemainingAmount) {
        self.remaining = Some(remaining);
    }

    /// 1-based position of this attempt within its run.
    #[must_use]
    pub const fn iteration(&self) -> u32 {
        self.iteration
    }

    #[must_use]
    pub const fn fxp_amount(&self) -> FixedPoint {
        self.fxp_amount
    }

    #[must_use]
    pub fn tx_hash(&self) -> Option<&TxHash> {
        self.tx_hash.as_ref()
    }

    #[must_use]
    pub const fn status(&self) -> &AttemptStatus {
        &self.status
    }

    #[must_use]
    pub const fn remaining(&self) -> Option<RemainingAmount> {
        self.remaining
    }

    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

/// Summary of a run that filled its request completely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FillReport {
    attempts: Vec<TradeAttempt>,
}

impl FillReport {
    #[must_use]
    pub fn new(attempts: Vec<TradeAttempt>) -> Self {
        Self { attempts }
    }

    #[must_use]
    pub fn attempts(&self) -> &[TradeAttempt] {
        &self.attempts
    }

    /// Number of transactions the run needed.
    #[must_use]
    pub fn transactions(&self) -> usize {
        self.attempts.len()
    }

    pub fn tx_hashes(&self) -> impl Iterator<Item = &TxHash> {
        self.attempts.iter().filter_map(TradeAttempt::tx_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempt_walks_through_lifecycle() {
        let mut attempt = TradeAttempt::new(1, FixedPoint::from(107_520));
        assert_eq!(attempt.status(), &AttemptStatus::Pending);
        assert!(attempt.tx_hash().is_none());

        attempt.mark_sent(TxHash::from("0x01"));
        assert_eq!(attempt.status(), &AttemptStatus::Sent);
        assert_eq!(attempt.tx_hash().map(TxHash::as_str), Some("0x01"));

        attempt.mark_mined();
        attempt.record_remaining(RemainingAmount::ZERO);
        assert_eq!(attempt.status(), &AttemptStatus::Mined);
        assert_eq!(attempt.remaining(), Some(RemainingAmount::ZERO));
    }

    #[test]
    fn failed_attempt_keeps_reason() {
        let mut attempt = TradeAttempt::new(2, FixedPoint::from(1));
        attempt.mark_failed("reverted");
        assert_eq!(attempt.status(), &AttemptStatus::Failed("reverted".into()));
    }

    #[test]
    fn report_lists_hashes_in_order() {
        let mut first = TradeAttempt::new(1, FixedPoint::from(10));
        first.mark_sent(TxHash::from("a"));
        let mut second = TradeAttempt::new(2, FixedPoint::from(3));
        second.mark_sent(TxHash::from("b"));

        let report = FillReport::new(vec![first, second]);
        let hashes: Vec<&str> = report.tx_hashes().map(TxHash::as_str).collect();
        assert_eq!(report.transactions(), 2);
        assert_eq!(hashes, vec!["a", "b"]);
    }
}
