use std::sync::Arc;

use alloy_primitives::{Address, TxHash};
use async_trait::async_trait;
use serde_json::Value;
use simclock_rpc_types::{methods, RpcRequest};
use simclock_simulator::Simulator;
use tokio::time::sleep;
use tracing::*;

use crate::{
    config::ReceiptPolling,
    errors::TransactionError,
    types::{TransferReceipt, TransferRequest, ValueTransfer},
};

/// Higher-level client that sends value transfers and waits for their inclusion.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ValueTransferClient: Send + Sync {
    /// Sets the sender used when a transfer does not name one.
    fn set_default_sender(&mut self, sender: Address);

    fn default_sender(&self) -> Option<Address>;

    /// Sends `transfer` and resolves once it has been included in a block.
    async fn send_value(
        &self,
        transfer: ValueTransfer,
    ) -> Result<TransferReceipt, TransactionError>;
}

/// [`ValueTransferClient`] that talks to the node through the simulator's raw call interface.
///
/// Transfers go out as `eth_sendTransaction`, so the sender has to be an account the node signs
/// for (a dev account or an unlocked one).
#[derive(Debug)]
pub struct SimulatorTransferClient<S> {
    simulator: Arc<S>,
    default_sender: Option<Address>,
    polling: ReceiptPolling,
}

impl<S: Simulator> SimulatorTransferClient<S> {
    pub fn new(simulator: Arc<S>) -> Self {
        Self {
            simulator,
            default_sender: None,
            polling: ReceiptPolling::default(),
        }
    }

    pub fn with_polling(mut self, polling: ReceiptPolling) -> Self {
        self.polling = polling;
        self
    }

    pub fn polling(&self) -> ReceiptPolling {
        self.polling
    }

    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, TransactionError> {
        let response = self
            .simulator
            .call(RpcRequest::new(method, Some(params)))
            .await?;
        Ok(response.into_result()?)
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TransferReceipt, TransactionError> {
        let attempts = self.polling.max_attempts;
        for attempt in 1..=attempts {
            let raw = self
                .call(
                    methods::ETH_GET_TRANSACTION_RECEIPT,
                    vec![serde_json::to_value(tx_hash)?],
                )
                .await?;

            if !raw.is_null() {
                return Ok(serde_json::from_value(raw)?);
            }

            trace!(%tx_hash, attempt, "receipt not available yet");
            if attempt < attempts {
                sleep(self.polling.interval).await;
            }
        }

        Err(TransactionError::NotIncluded { tx_hash, attempts })
    }
}

#[async_trait]
impl<S: Simulator> ValueTransferClient for SimulatorTransferClient<S> {
    fn set_default_sender(&mut self, sender: Address) {
        self.default_sender = Some(sender);
    }

    fn default_sender(&self) -> Option<Address> {
        self.default_sender
    }

    async fn send_value(
        &self,
        transfer: ValueTransfer,
    ) -> Result<TransferReceipt, TransactionError> {
        let from = transfer
            .from
            .or(self.default_sender)
            .ok_or(TransactionError::NoSender)?;
        let request = TransferRequest {
            from,
            to: transfer.to,
            value: transfer.value,
        };

        let raw = self
            .call(
                methods::ETH_SEND_TRANSACTION,
                vec![serde_json::to_value(request)?],
            )
            .await?;
        let tx_hash: TxHash = serde_json::from_value(raw)?;
        debug!(%tx_hash, %from, to = %transfer.to, value = %transfer.value, "transfer submitted");

        let receipt = self.wait_for_receipt(tx_hash).await?;
        if !receipt.succeeded() {
            return Err(TransactionError::Reverted(tx_hash));
        }
        Ok(receipt)
    }
}
