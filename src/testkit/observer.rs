use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::id::TxHash;
use crate::error::TradeError;
use crate::port::inbound::observer::TradeObserver;
use crate::port::outbound::contract::TransactionInfo;

/// One callback received by a [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observed {
    Sent(TxHash),
    Success,
    Failed(String),
}

/// Thread-safe callback collector for run assertions.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<Observed>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Observed> {
        self.events.lock().clone()
    }

    pub fn sent_hashes(&self) -> Vec<TxHash> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                Observed::Sent(hash) => Some(hash.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn successes(&self) -> usize {
        self.count(|e| matches!(e, Observed::Success))
    }

    pub fn failures(&self) -> usize {
        self.count(|e| matches!(e, Observed::Failed(_)))
    }

    /// Number of `on_success` plus `on_failed` events.
    pub fn terminal_events(&self) -> usize {
        self.successes() + self.failures()
    }

    fn count(&self, f: impl Fn(&Observed) -> bool) -> usize {
        self.events.lock().iter().filter(|e| f(e)).count()
    }
}

impl TradeObserver for RecordingObserver {
    fn on_sent(&self, tx: &TransactionInfo) {
        self.events.lock().push(Observed::Sent(tx.hash.clone()));
    }

    fn on_success(&self) {
        self.events.lock().push(Observed::Success);
    }

    fn on_failed(&self, error: &TradeError) {
        self.events.lock().push(Observed::Failed(error.to_string()));
    }
}
