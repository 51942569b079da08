use std::sync::Arc;

use alloy_primitives::{Address, U256};
use simclock_common::logging;
use simclock_controller::{Controller, TransferReceipt};
use simclock_simulator::SimulatorConfig;

use crate::fake_chain::FakeChain;

/// High level test harness that wraps a [`FakeChain`] and a controller bound to it.
///
/// The harness keeps a second handle on the chain so tests can inspect calls, balances and
/// blocks behind the controller's back.
#[derive(Debug)]
pub struct SimTestHarness {
    chain: Arc<FakeChain>,
    controller: Controller<FakeChain>,
}

impl SimTestHarness {
    /// Start a fresh in-memory chain from `config`. Accounts are not discovered yet.
    pub fn new(config: &SimulatorConfig) -> Self {
        logging::init_test_logging();
        let chain = Arc::new(FakeChain::new(config));
        let controller = Controller::from_shared(chain.clone());
        Self { chain, controller }
    }

    /// Start a new harness and immediately discover accounts so funding works.
    pub async fn new_with_discovered_accounts(config: &SimulatorConfig) -> anyhow::Result<Self> {
        let mut harness = Self::new(config);
        harness.controller.discover_accounts().await?;
        Ok(harness)
    }

    /// Accessor for the underlying chain when low level inspection is required.
    pub fn chain(&self) -> &FakeChain {
        &self.chain
    }

    pub fn controller(&self) -> &Controller<FakeChain> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<FakeChain> {
        &mut self.controller
    }

    /// Consume the harness and return the owned chain handle and controller.
    pub fn into_parts(self) -> (Arc<FakeChain>, Controller<FakeChain>) {
        (self.chain, self.controller)
    }

    /// Fund `recipient` from the primary account.
    pub async fn fund(&self, recipient: Address, amount: U256) -> anyhow::Result<TransferReceipt> {
        Ok(self.controller.fund_account(recipient, amount).await?)
    }

    /// Advance the clock and return the new latest block timestamp.
    pub async fn advance_time(&self, seconds: u64) -> anyhow::Result<u64> {
        self.controller.advance_time(seconds).await?;
        Ok(self.chain.latest_block().timestamp)
    }
}
