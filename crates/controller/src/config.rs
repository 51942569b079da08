use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default delay between receipt polls, in milliseconds.
const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Default number of receipt polls before giving up.
const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 100;

/// How the transfer client waits for a transaction to be included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptPolling {
    /// Delay between polls that returned no receipt.
    #[serde(default = "default_poll_interval")]
    pub interval: Duration,

    /// Number of polls before the transfer is reported as not included.
    #[serde(default = "default_max_poll_attempts")]
    pub max_attempts: u32,
}

fn default_poll_interval() -> Duration {
    Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
}

fn default_max_poll_attempts() -> u32 {
    DEFAULT_MAX_POLL_ATTEMPTS
}

impl Default for ReceiptPolling {
    fn default() -> Self {
        Self {
            interval: default_poll_interval(),
            max_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }
}

impl ReceiptPolling {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }
}
