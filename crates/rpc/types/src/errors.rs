use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Standard JSON-RPC "method not found" code.
pub const METHOD_NOT_FOUND_CODE: i64 = -32601;

/// Standard JSON-RPC "invalid params" code.
pub const INVALID_PARAMS_CODE: i64 = -32602;

/// Generic server-side error code used by dev nodes.
pub const SERVER_ERROR_CODE: i64 = -32000;

/// Error object returned in a response envelope's `error` field.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("rpc error {code}: {message}")]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND_CODE, format!("method {method} not found"))
    }

    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS_CODE, msg)
    }

    pub fn server(msg: impl Into<String>) -> Self {
        Self::new(SERVER_ERROR_CODE, msg)
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}
