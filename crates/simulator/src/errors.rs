use alloy::node_bindings::NodeError;
use thiserror::Error;

/// Failures talking to the simulator itself, as opposed to errors the simulator reports.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// The simulator process could not be started.
    #[error("failed to spawn simulator: {0}")]
    Spawn(#[from] NodeError),

    /// The HTTP round-trip failed.
    #[error("http transport: {0}")]
    Http(#[from] reqwest::Error),

    /// The body was not a JSON-RPC envelope.
    #[error("malformed response envelope: {0}")]
    Envelope(#[from] serde_json::Error),

    /// Other transport failure.
    #[error("transport: {0}")]
    Transport(String),
}

impl SimulatorError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}
