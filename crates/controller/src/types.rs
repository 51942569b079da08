use alloy_primitives::{Address, TxHash, U256, U64};
use serde::{Deserialize, Serialize};

/// A plain value transfer handed to a [`ValueTransferClient`](crate::ValueTransferClient).
///
/// A missing `from` means the client's default sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueTransfer {
    pub from: Option<Address>,
    pub to: Address,
    pub value: U256,
}

impl ValueTransfer {
    pub fn new(to: Address, value: U256) -> Self {
        Self {
            from: None,
            to,
            value,
        }
    }

    pub fn from_sender(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }
}

/// Body of an `eth_sendTransaction` call for a value transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from: Address,
    pub to: Address,
    pub value: U256,
}

/// The receipt fields the transfer client relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferReceipt {
    pub transaction_hash: TxHash,
    #[serde(default)]
    pub block_number: Option<U64>,
    /// `0x1` on success, `0x0` on revert. Absent on pre-Byzantium chains.
    #[serde(default)]
    pub status: Option<U64>,
}

impl TransferReceipt {
    pub fn succeeded(&self) -> bool {
        self.status.is_none_or(|status| status == U64::from(1))
    }
}

/// The block fields read by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub number: U64,
    pub timestamp: U64,
}
