use std::sync::Arc;

use alloy_primitives::{Address, U256};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use simclock_rpc_types::{methods, RpcRequest, RpcResponse};
use simclock_simulator::{AnvilSimulator, Simulator, SimulatorConfig, SimulatorError};
use tracing::*;

use crate::{
    client::{SimulatorTransferClient, ValueTransferClient},
    errors::ControllerError,
    types::{BlockHeader, TransferReceipt, ValueTransfer},
};

/// Drives a simulator's clock and funds accounts on it.
///
/// Operations do not serialize against each other. Two overlapping [`Controller::advance_time`]
/// calls can interleave their `evm_increaseTime` and `evm_mine` requests, so callers await each
/// operation before starting the next.
#[derive(Debug)]
pub struct Controller<S, C = SimulatorTransferClient<S>> {
    simulator: Arc<S>,
    client: C,
    accounts: Vec<Address>,
    primary_account: Option<Address>,
}

impl Controller<AnvilSimulator> {
    /// Spawns an `anvil` node from `config` and attaches a controller to it.
    ///
    /// The node starts at `config.start_timestamp` with every dev account holding the default
    /// balance. No RPC call is made until the first operation.
    pub fn launch(config: &SimulatorConfig) -> Result<Self, ControllerError> {
        let simulator = AnvilSimulator::spawn(config)?;
        Ok(Self::from_simulator(simulator))
    }
}

impl<S: Simulator> Controller<S> {
    /// Attaches to `simulator` with a transfer client bound to the same handle.
    pub fn from_simulator(simulator: S) -> Self {
        Self::from_shared(Arc::new(simulator))
    }

    pub fn from_shared(simulator: Arc<S>) -> Self {
        let client = SimulatorTransferClient::new(simulator.clone());
        Self::new(simulator, client)
    }
}

impl<S, C> Controller<S, C>
where
    S: Simulator,
    C: ValueTransferClient,
{
    pub fn new(simulator: Arc<S>, client: C) -> Self {
        Self {
            simulator,
            client,
            accounts: Vec::new(),
            primary_account: None,
        }
    }

    pub fn simulator(&self) -> &Arc<S> {
        &self.simulator
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Accounts recorded by the last [`Controller::discover_accounts`] call.
    pub fn accounts(&self) -> &[Address] {
        &self.accounts
    }

    /// Default funding source, `None` until accounts are discovered.
    pub fn primary_account(&self) -> Option<Address> {
        self.primary_account
    }

    /// Sends one raw request and returns the simulator's envelope unexamined.
    ///
    /// Omitted params go out as an empty list. The caller owns error checking; see
    /// [`Controller::request`] for the checked form.
    pub async fn send_rpc(
        &self,
        method: &str,
        params: Option<Vec<Value>>,
    ) -> Result<RpcResponse, SimulatorError> {
        let request = RpcRequest::new(method, params);
        debug!(%method, id = request.id, "rpc call");
        self.simulator.call(request).await
    }

    /// Sends one request, fails on a populated error field, and decodes the result.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Option<Vec<Value>>,
    ) -> Result<T, ControllerError> {
        let result = self.send_rpc(method, params).await?.into_result()?;
        serde_json::from_value(result).map_err(|source| ControllerError::Decode {
            method: method.to_owned(),
            source,
        })
    }

    /// Fetches the simulator's account list and makes the first entry the primary account.
    ///
    /// The primary account also becomes the transfer client's default sender. An empty list is
    /// recorded as-is and leaves the primary account unchanged.
    #[instrument(skip(self))]
    pub async fn discover_accounts(&mut self) -> Result<Vec<Address>, ControllerError> {
        let accounts: Vec<Address> = self.request(methods::ETH_ACCOUNTS, None).await?;

        match accounts.first().copied() {
            Some(primary) => {
                self.primary_account = Some(primary);
                self.client.set_default_sender(primary);
                info!(%primary, count = accounts.len(), "accounts discovered");
            }
            None => warn!("simulator reported no accounts"),
        }

        self.accounts = accounts.clone();
        Ok(accounts)
    }

    /// Transfers `amount` wei from the primary account to `recipient`.
    ///
    /// Resolves once the transfer is included. Fails with
    /// [`ControllerError::PrimaryAccountUnset`] before discovery, without touching the simulator.
    #[instrument(skip(self))]
    pub async fn fund_account(
        &self,
        recipient: Address,
        amount: U256,
    ) -> Result<TransferReceipt, ControllerError> {
        let primary = self
            .primary_account
            .ok_or(ControllerError::PrimaryAccountUnset)?;

        let transfer = ValueTransfer::new(recipient, amount).from_sender(primary);
        let receipt = self.client.send_value(transfer).await?;
        debug!(tx_hash = %receipt.transaction_hash, "account funded");
        Ok(receipt)
    }

    /// Moves the clock forward by `seconds` and mines a block so the jump is visible.
    ///
    /// If `evm_increaseTime` fails, `evm_mine` is not sent.
    #[instrument(skip(self))]
    pub async fn advance_time(&self, seconds: u64) -> Result<(), ControllerError> {
        let offset: Value = self
            .request(methods::EVM_INCREASE_TIME, Some(vec![json!(seconds)]))
            .await
            .inspect_err(|err| warn!(%err, "increase time rejected"))?;

        let _: Value = self
            .request(methods::EVM_MINE, None)
            .await
            .inspect_err(|err| warn!(%err, "mine after time jump rejected"))?;

        info!(%offset, "clock advanced");
        Ok(())
    }

    /// Mines `count` blocks one at a time, stopping at the first failure.
    pub async fn mine_blocks(&self, count: usize) -> Result<(), ControllerError> {
        for _ in 0..count {
            let _: Value = self.request(methods::EVM_MINE, None).await?;
        }
        Ok(())
    }

    /// Timestamp of the latest mined block, in Unix seconds.
    pub async fn latest_block_timestamp(&self) -> Result<u64, ControllerError> {
        let header: BlockHeader = self
            .request(
                methods::ETH_GET_BLOCK_BY_NUMBER,
                Some(vec![json!(methods::LATEST_BLOCK_TAG), json!(false)]),
            )
            .await?;
        Ok(header.timestamp.to::<u64>())
    }

    /// Balance of `address` at the latest block, in wei.
    pub async fn balance_of(&self, address: Address) -> Result<U256, ControllerError> {
        self.request(
            methods::ETH_GET_BALANCE,
            Some(vec![json!(address), json!(methods::LATEST_BLOCK_TAG)]),
        )
        .await
    }
}
