use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::attempt::TradeAttempt;
use crate::domain::error::DomainError;
use crate::domain::id::TxHash;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised by the contract transport and the remaining-amount oracle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("transaction rejected: {0}")]
    Rejected(String),

    #[error("failed to sign transaction: {0}")]
    Signing(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("receipt unavailable: {0}")]
    Receipt(String),

    #[error("unknown transaction {0}")]
    UnknownTransaction(TxHash),
}

/// Stage of a trade attempt that can time out or be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Submission,
    Confirmation,
    RemainingQuery,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Submission => "submission",
            Self::Confirmation => "confirmation",
            Self::RemainingQuery => "remaining-amount query",
        };
        f.write_str(name)
    }
}

/// Terminal failure of a trade-until-filled run.
///
/// Exactly one of these is reported per failed run. None of them is retried.
#[derive(Error, Debug, Clone)]
pub enum TradeError {
    /// The transport refused the transaction before acknowledging it.
    #[error("submission failed on attempt {iteration}: {source}")]
    Submission {
        iteration: u32,
        #[source]
        source: TransportError,
    },

    /// The transaction was acknowledged but failed on-chain.
    ///
    /// `attempt` is the failed transaction's record, in its `Failed` state.
    #[error("transaction {tx_hash} failed: {reason}")]
    MiningFailure {
        tx_hash: TxHash,
        reason: String,
        attempt: Box<TradeAttempt>,
    },

    /// The remaining amount could not be read after a successful mine.
    #[error("remaining-amount query for {tx_hash} failed: {source}")]
    Oracle {
        tx_hash: TxHash,
        #[source]
        source: TransportError,
    },

    #[error("{stage} timed out after {after:?}")]
    Timeout { stage: Stage, after: Duration },

    #[error("trade cancelled during {stage}")]
    Cancelled { stage: Stage },

    #[error("gave up after {limit} transactions with {remaining} shares unfilled")]
    IterationLimit { limit: u32, remaining: Decimal },

    /// A mined transaction filled nothing, so resubmitting cannot make progress.
    #[error("transaction {tx_hash} filled nothing; {remaining} shares have no counterparty")]
    Stalled { tx_hash: TxHash, remaining: Decimal },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Trade(#[from] TradeError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
