use std::path::PathBuf;

use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default balance credited to every simulator account, in ether.
pub const DEFAULT_BALANCE_ETHER: u64 = 1_000_000;

/// Default number of dev accounts the simulator creates.
pub const DEFAULT_ACCOUNT_COUNT: usize = 10;

/// Wei per ether.
pub const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

/// Creation-time settings for a simulator instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Unix timestamp (seconds) of the genesis block. Defaults to now.
    #[serde(default = "default_start_timestamp")]
    pub start_timestamp: u64,

    /// Balance credited to each dev account, in ether.
    #[serde(default = "default_balance_ether")]
    pub default_balance_ether: u64,

    /// Number of dev accounts to create.
    #[serde(default = "default_account_count")]
    pub account_count: usize,

    /// Accounts the simulator signs for without a private key.
    #[serde(default)]
    pub unlocked_accounts: Vec<Address>,

    #[serde(default)]
    pub chain_id: Option<u64>,

    /// Port to listen on. A free port is picked when unset.
    #[serde(default)]
    pub port: Option<u16>,

    /// Path to the `anvil` binary. `$PATH` is searched when unset.
    #[serde(default)]
    pub anvil_path: Option<PathBuf>,

    /// How long to wait for the process to start listening.
    #[serde(default)]
    pub startup_timeout_ms: Option<u64>,
}

fn default_start_timestamp() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}

fn default_balance_ether() -> u64 {
    DEFAULT_BALANCE_ETHER
}

fn default_account_count() -> usize {
    DEFAULT_ACCOUNT_COUNT
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            start_timestamp: default_start_timestamp(),
            default_balance_ether: DEFAULT_BALANCE_ETHER,
            account_count: DEFAULT_ACCOUNT_COUNT,
            unlocked_accounts: Vec::new(),
            chain_id: None,
            port: None,
            anvil_path: None,
            startup_timeout_ms: None,
        }
    }
}

impl SimulatorConfig {
    /// Sets the genesis time. Times before the Unix epoch clamp to zero.
    pub fn with_start_time(mut self, start: DateTime<Utc>) -> Self {
        self.start_timestamp = u64::try_from(start.timestamp()).unwrap_or_default();
        self
    }

    pub fn with_start_timestamp(mut self, start_timestamp: u64) -> Self {
        self.start_timestamp = start_timestamp;
        self
    }

    pub fn with_unlocked_accounts(mut self, accounts: impl IntoIterator<Item = Address>) -> Self {
        self.unlocked_accounts = accounts.into_iter().collect();
        self
    }

    pub fn with_default_balance_ether(mut self, ether: u64) -> Self {
        self.default_balance_ether = ether;
        self
    }

    pub fn with_account_count(mut self, count: usize) -> Self {
        self.account_count = count;
        self
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_anvil_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.anvil_path = Some(path.into());
        self
    }

    /// Genesis time as a UTC datetime.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.start_timestamp)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Per-account default balance in wei.
    pub fn default_balance_wei(&self) -> U256 {
        U256::from(self.default_balance_ether) * U256::from(WEI_PER_ETHER)
    }
}
