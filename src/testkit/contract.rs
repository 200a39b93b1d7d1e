//! Scripted [`TradeContract`].

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::id::TxHash;
use crate::error::TransportError;
use crate::port::outbound::contract::{Receipt, TradeContract, TradePayload, TransactionInfo};

/// Which contract entry point a submission went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    PublicTrade,
    PublicTakeBestOrder,
}

/// A recorded submission.
#[derive(Debug, Clone)]
pub struct SubmittedCall {
    pub entry: EntryPoint,
    pub payload: TradePayload,
}

enum ReceiptScript {
    Revert(String),
    Fail(TransportError),
}

/// Contract transport with scripted hashes, rejections and reverts.
///
/// Submissions are numbered from 1 in arrival order; failure scripts are
/// keyed by that number. Unscripted submissions succeed with hashes
/// `TRANSACTION_HASH_<n>` and mine successfully.
#[derive(Default)]
pub struct ScriptedContract {
    hashes: Mutex<VecDeque<TxHash>>,
    rejections: Mutex<HashMap<usize, TransportError>>,
    receipts: Mutex<HashMap<usize, ReceiptScript>>,
    submit_delay: Option<Duration>,
    receipt_delay: Option<Duration>,
    calls: Mutex<Vec<SubmittedCall>>,
    sent: Mutex<HashMap<TxHash, usize>>,
}

impl ScriptedContract {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out these hashes before falling back to generated ones.
    pub fn with_hashes(self, hashes: &[&str]) -> Self {
        *self.hashes.lock() = hashes.iter().map(|h| TxHash::from(*h)).collect();
        self
    }

    /// Reject submission number `n`.
    pub fn reject(self, n: usize, error: TransportError) -> Self {
        self.rejections.lock().insert(n, error);
        self
    }

    /// Revert submission number `n` on-chain.
    pub fn revert(self, n: usize, reason: &str) -> Self {
        self.receipts
            .lock()
            .insert(n, ReceiptScript::Revert(reason.to_string()));
        self
    }

    /// Fail the receipt wait of submission number `n`.
    pub fn fail_receipt(self, n: usize, error: TransportError) -> Self {
        self.receipts.lock().insert(n, ReceiptScript::Fail(error));
        self
    }

    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = Some(delay);
        self
    }

    pub fn with_receipt_delay(mut self, delay: Duration) -> Self {
        self.receipt_delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<SubmittedCall> {
        self.calls.lock().clone()
    }

    pub fn entry_points(&self) -> Vec<EntryPoint> {
        self.calls.lock().iter().map(|c| c.entry).collect()
    }

    /// Hex amounts of every submission, in order.
    pub fn submitted_amounts(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .map(|c| c.payload.fxp_amount.to_hex())
            .collect()
    }

    async fn submit(
        &self,
        entry: EntryPoint,
        payload: &TradePayload,
    ) -> Result<TransactionInfo, TransportError> {
        let n = {
            let mut calls = self.calls.lock();
            calls.push(SubmittedCall {
                entry,
                payload: payload.clone(),
            });
            calls.len()
        };

        if let Some(delay) = self.submit_delay {
            tokio::time::sleep(delay).await;
        }

        let rejection = self.rejections.lock().remove(&n);
        if let Some(error) = rejection {
            return Err(error);
        }

        let scripted = self.hashes.lock().pop_front();
        let hash = scripted.unwrap_or_else(|| TxHash::new(format!("TRANSACTION_HASH_{n}")));
        self.sent.lock().insert(hash.clone(), n);
        Ok(TransactionInfo { hash })
    }
}

#[async_trait]
impl TradeContract for ScriptedContract {
    async fn public_trade(&self, payload: &TradePayload) -> Result<TransactionInfo, TransportError> {
        self.submit(EntryPoint::PublicTrade, payload).await
    }

    async fn public_take_best_order(
        &self,
        payload: &TradePayload,
    ) -> Result<TransactionInfo, TransportError> {
        self.submit(EntryPoint::PublicTakeBestOrder, payload).await
    }

    async fn wait_for_receipt(&self, tx_hash: &TxHash) -> Result<Receipt, TransportError> {
        if let Some(delay) = self.receipt_delay {
            tokio::time::sleep(delay).await;
        }

        let n = self.sent.lock().get(tx_hash).copied();
        let Some(n) = n else {
            return Err(TransportError::UnknownTransaction(tx_hash.clone()));
        };

        let script = self.receipts.lock().remove(&n);
        match script {
            Some(ReceiptScript::Revert(reason)) => Ok(Receipt::reverted(tx_hash.clone(), reason)),
            Some(ReceiptScript::Fail(error)) => Err(error),
            None => Ok(Receipt::success(tx_hash.clone(), Some(n as u64))),
        }
    }

    fn venue_name(&self) -> &'static str {
        "scripted"
    }
}
