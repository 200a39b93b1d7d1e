//! Scripted [`RemainingAmountOracle`].

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::fixed_point::RemainingAmount;
use crate::domain::id::TxHash;
use crate::error::TransportError;
use crate::port::outbound::oracle::RemainingAmountOracle;

type Answer = Result<RemainingAmount, TransportError>;

/// Answers remaining-amount queries from scripted responses.
///
/// A response registered for a specific hash wins; otherwise the next
/// queued answer is used; once the queue is empty every trade reports
/// nothing remaining.
#[derive(Default)]
pub struct ScriptedOracle {
    by_hash: Mutex<HashMap<TxHash, Answer>>,
    queue: Mutex<VecDeque<Answer>>,
    queries: Mutex<Vec<TxHash>>,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue answers consumed in query order.
    pub fn with_sequence(self, answers: Vec<Answer>) -> Self {
        *self.queue.lock() = answers.into();
        self
    }

    /// Queue successful answers given as hex attoshare strings.
    pub fn with_remaining(self, hex: &[&str]) -> Self {
        let answers = hex
            .iter()
            .map(|h| Ok(crate::testkit::domain::remaining(h)))
            .collect();
        self.with_sequence(answers)
    }

    /// Answer queries for `tx_hash` with `answer`.
    pub fn with_response(self, tx_hash: impl Into<TxHash>, answer: Answer) -> Self {
        self.by_hash.lock().insert(tx_hash.into(), answer);
        self
    }

    /// Hashes queried so far, in order.
    pub fn queries(&self) -> Vec<TxHash> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl RemainingAmountOracle for ScriptedOracle {
    async fn trade_amount_remaining(&self, tx_hash: &TxHash) -> Answer {
        self.queries.lock().push(tx_hash.clone());

        let scripted = self.by_hash.lock().get(tx_hash).cloned();
        if let Some(answer) = scripted {
            return answer;
        }
        let queued = self.queue.lock().pop_front();
        queued.unwrap_or(Ok(RemainingAmount::ZERO))
    }
}
