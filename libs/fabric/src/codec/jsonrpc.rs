use serde::Serialize;
use serde_json::Value;

use crate::codec::{Codec, JsonCodec};
use crate::error::Result;

/// Request id sent with every call
///
/// Only one request is ever in flight per connection, so the id is fixed.
pub const REQUEST_ID: u64 = 1;

/// JSON-RPC 2.0 request body
///
/// Serializes as `{"id":1,"jsonrpc":"2.0","method":..,"params":[..]}`, field
/// order included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    id: u64,
    jsonrpc: &'static str,
    method: String,
    params: Vec<Value>,
}

impl Request {
    /// Request for `method` with no params yet
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            id: REQUEST_ID,
            jsonrpc: "2.0",
            method: method.into(),
            params: Vec::new(),
        }
    }

    /// Append a positional parameter, serializing it independently
    pub fn param<T: Serialize>(mut self, value: &T) -> Result<Self> {
        self.params.push(serde_json::to_value(value)?);
        Ok(self)
    }

    /// Method name, for logging
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Encode the request body (without the length prefix)
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        JsonCodec.encode(self)
    }
}
