use async_trait::async_trait;
use simclock_rpc_types::{RpcRequest, RpcResponse};

use crate::errors::SimulatorError;

/// Raw single-call entry point of a simulator.
///
/// Implementations forward one envelope and return the node's envelope as-is. A populated
/// `error` field is a successful call from this trait's point of view; `Err` is reserved for
/// transport failures where no envelope came back.
#[cfg_attr(feature = "test-utils", mockall::automock)]
#[async_trait]
pub trait Simulator: Send + Sync {
    async fn call(&self, request: RpcRequest) -> Result<RpcResponse, SimulatorError>;
}
