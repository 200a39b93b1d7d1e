//! Trade loop guard configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::completion::LoopConfig;

/// Guards applied to every trade run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExecutionConfig {
    /// Maximum transactions per run (default: 64).
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Seconds to wait for a submission to be acknowledged. 0 disables.
    #[serde(default = "default_submission_timeout_secs")]
    pub submission_timeout_secs: u64,
    /// Seconds to wait for a transaction to be mined. 0 disables.
    #[serde(default = "default_confirmation_timeout_secs")]
    pub confirmation_timeout_secs: u64,
    /// Seconds to wait for the remaining-amount query. 0 disables.
    #[serde(default = "default_remaining_timeout_secs")]
    pub remaining_timeout_secs: u64,
    /// Fail a run whose transaction filled nothing (default: true).
    #[serde(default = "default_fail_on_stall")]
    pub fail_on_stall: bool,
}

const fn default_max_iterations() -> u32 {
    64
}

const fn default_submission_timeout_secs() -> u64 {
    60
}

const fn default_confirmation_timeout_secs() -> u64 {
    600
}

const fn default_remaining_timeout_secs() -> u64 {
    60
}

const fn default_fail_on_stall() -> bool {
    true
}

fn seconds(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            submission_timeout_secs: default_submission_timeout_secs(),
            confirmation_timeout_secs: default_confirmation_timeout_secs(),
            remaining_timeout_secs: default_remaining_timeout_secs(),
            fail_on_stall: default_fail_on_stall(),
        }
    }
}

impl From<&ExecutionConfig> for LoopConfig {
    fn from(config: &ExecutionConfig) -> Self {
        Self {
            max_iterations: Some(config.max_iterations),
            submission_timeout: seconds(config.submission_timeout_secs),
            confirmation_timeout: seconds(config.confirmation_timeout_secs),
            remaining_timeout: seconds(config.remaining_timeout_secs),
            fail_on_stall: config.fail_on_stall,
        }
    }
}
