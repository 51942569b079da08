//! Request and response envelopes.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::RpcError;

/// Protocol version carried by every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// A single JSON-RPC request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Vec<Value>,
    pub id: u64,
}

impl RpcRequest {
    /// Builds a request with the given method and params.
    ///
    /// Omitted params are sent as an empty list. The id is the current Unix time in milliseconds,
    /// so two requests built within the same millisecond share an id.
    pub fn new(method: impl Into<String>, params: Option<Vec<Value>>) -> Self {
        Self::with_id(method, params, millis_request_id())
    }

    /// Builds a request with an explicit correlation id.
    pub fn with_id(method: impl Into<String>, params: Option<Vec<Value>>, id: u64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            method: method.into(),
            params: params.unwrap_or_default(),
            id,
        }
    }
}

/// A single JSON-RPC response.
///
/// Exactly one of `result` or `error` is expected to be populated, but the envelope is kept as
/// received. Use [`RpcResponse::into_result`] to check it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    /// Successful response carrying `result`.
    pub fn success(id: u64, result: Value) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_owned()),
            id: Some(Value::from(id)),
            result: Some(result),
            error: None,
        }
    }

    /// Failed response carrying `error`.
    pub fn failure(id: u64, error: RpcError) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_owned()),
            id: Some(Value::from(id)),
            result: None,
            error: Some(error),
        }
    }

    /// Returns `true` if the error field is populated.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Splits the envelope into its result or its error.
    ///
    /// A populated error always wins. A response with neither field yields `Value::Null`, which
    /// is how methods like `eth_getTransactionReceipt` report "not yet".
    pub fn into_result(self) -> Result<Value, RpcError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

/// Correlation id derived from the wall clock in milliseconds.
pub fn millis_request_id() -> u64 {
    // Pre-epoch clocks clamp to zero rather than wrapping.
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}
