use alloy_primitives::TxHash;
use simclock_rpc_types::RpcError;
use simclock_simulator::SimulatorError;
use thiserror::Error;

/// Failures of a value transfer.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// The node rejected the send or the receipt lookup.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// No sender was given and the client has no default sender.
    #[error("no sender given and no default sender set")]
    NoSender,

    /// The transaction was included but reverted.
    #[error("transaction {0} reverted")]
    Reverted(TxHash),

    /// No receipt showed up within the polling budget.
    #[error("transaction {tx_hash} not included after {attempts} receipt polls")]
    NotIncluded { tx_hash: TxHash, attempts: u32 },

    #[error(transparent)]
    Simulator(#[from] SimulatorError),

    /// The node answered with something that is not a hash or receipt.
    #[error("malformed transaction response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors returned by [`Controller`](crate::Controller) operations.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The simulator populated the response's error field.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    /// No envelope came back from the simulator.
    #[error(transparent)]
    Simulator(#[from] SimulatorError),

    /// Funding was attempted before accounts were discovered.
    #[error("primary account unset, accounts must be discovered first")]
    PrimaryAccountUnset,

    #[error("malformed {method} result: {source}")]
    Decode {
        method: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ControllerError {
    /// Returns the simulator's error object if this is an RPC-level failure.
    pub fn as_rpc_error(&self) -> Option<&RpcError> {
        match self {
            Self::Rpc(err) | Self::Transaction(TransactionError::Rpc(err)) => Some(err),
            _ => None,
        }
    }
}
