//! Process-backed simulator using a local `anvil` node.

use alloy::node_bindings::{Anvil, AnvilInstance};
use alloy_primitives::Address;
use async_trait::async_trait;
use simclock_rpc_types::{RpcRequest, RpcResponse};
use tracing::*;

use crate::{config::SimulatorConfig, errors::SimulatorError, traits::Simulator};

/// An `anvil` child process plus an HTTP client bound to its endpoint.
///
/// The process is killed when this value is dropped.
#[derive(Debug)]
pub struct AnvilSimulator {
    instance: AnvilInstance,
    http: reqwest::Client,
    endpoint: String,
    unlocked_accounts: Vec<Address>,
}

impl AnvilSimulator {
    /// Starts an `anvil` process configured from `config`.
    ///
    /// Anvil cannot unlock a fixed set of foreign accounts from the command line, so a non-empty
    /// unlock list turns on `--auto-impersonate`. No RPC call is issued here.
    pub fn spawn(config: &SimulatorConfig) -> Result<Self, SimulatorError> {
        let mut anvil = Anvil::new()
            .arg("--timestamp")
            .arg(config.start_timestamp.to_string())
            .arg("--balance")
            .arg(config.default_balance_ether.to_string())
            .arg("--accounts")
            .arg(config.account_count.to_string());

        if !config.unlocked_accounts.is_empty() {
            anvil = anvil.arg("--auto-impersonate");
        }
        if let Some(chain_id) = config.chain_id {
            anvil = anvil.chain_id(chain_id);
        }
        if let Some(port) = config.port {
            anvil = anvil.port(port);
        }
        if let Some(path) = &config.anvil_path {
            anvil = anvil.path(path);
        }
        if let Some(timeout) = config.startup_timeout_ms {
            anvil = anvil.timeout(timeout);
        }

        let instance = anvil.try_spawn()?;
        let endpoint = instance.endpoint();
        info!(
            %endpoint,
            start_timestamp = config.start_timestamp,
            unlocked = config.unlocked_accounts.len(),
            "anvil simulator started"
        );

        Ok(Self {
            instance,
            http: reqwest::Client::new(),
            endpoint,
            unlocked_accounts: config.unlocked_accounts.clone(),
        })
    }

    /// HTTP endpoint of the node.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Dev accounts the node generated at startup.
    pub fn dev_accounts(&self) -> &[Address] {
        self.instance.addresses()
    }

    pub fn unlocked_accounts(&self) -> &[Address] {
        &self.unlocked_accounts
    }

    pub fn instance(&self) -> &AnvilInstance {
        &self.instance
    }
}

#[async_trait]
impl Simulator for AnvilSimulator {
    async fn call(&self, request: RpcRequest) -> Result<RpcResponse, SimulatorError> {
        trace!(method = %request.method, id = request.id, "sending rpc request");

        // Dev nodes report JSON-RPC errors with a 200 status, so the body is always decoded.
        let body = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .bytes()
            .await?;

        Ok(serde_json::from_slice(&body)?)
    }
}
