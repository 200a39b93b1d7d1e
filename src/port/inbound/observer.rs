//! Observer port for trade progress callbacks.
//!
//! A run reports every acknowledged transaction through
//! [`TradeObserver::on_sent`] and then exactly one terminal event:
//! [`TradeObserver::on_success`] or [`TradeObserver::on_failed`].

use crate::error::TradeError;
use crate::port::outbound::contract::TransactionInfo;

/// Receives progress events from a trade-until-filled run.
///
/// All methods default to no-ops.
pub trait TradeObserver: Send + Sync {
    /// A transaction was accepted by the network. May fire many times per run.
    fn on_sent(&self, _tx: &TransactionInfo) {}

    /// The whole requested amount has been filled.
    fn on_success(&self) {}

    /// The run stopped on an error. Nothing else fires afterwards.
    fn on_failed(&self, _error: &TradeError) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TradeObserver for NoopObserver {}

type SentFn = Box<dyn Fn(&TransactionInfo) + Send + Sync>;
type SuccessFn = Box<dyn Fn() + Send + Sync>;
type FailedFn = Box<dyn Fn(&TradeError) + Send + Sync>;

/// Closure-backed observer.
///
/// ```
/// use tradefill::port::inbound::observer::TradeCallbacks;
///
/// let callbacks = TradeCallbacks::new()
///     .with_on_sent(|tx| println!("sent {}", tx.hash))
///     .with_on_success(|| println!("filled"))
///     .with_on_failed(|err| eprintln!("failed: {err}"));
/// # drop(callbacks);
/// ```
#[derive(Default)]
pub struct TradeCallbacks {
    sent: Option<SentFn>,
    success: Option<SuccessFn>,
    failed: Option<FailedFn>,
}

impl TradeCallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_on_sent(mut self, f: impl Fn(&TransactionInfo) + Send + Sync + 'static) -> Self {
        self.sent = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_on_success(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.success = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_on_failed(mut self, f: impl Fn(&TradeError) + Send + Sync + 'static) -> Self {
        self.failed = Some(Box::new(f));
        self
    }
}

impl TradeObserver for TradeCallbacks {
    fn on_sent(&self, tx: &TransactionInfo) {
        if let Some(f) = &self.sent {
            f(tx);
        }
    }

    fn on_success(&self) {
        if let Some(f) = &self.success {
            f();
        }
    }

    fn on_failed(&self, error: &TradeError) {
        if let Some(f) = &self.failed {
            f(error);
        }
    }
}
