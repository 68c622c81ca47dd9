use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod json;
pub mod jsonrpc;

pub use self::json::JsonCodec;
pub use self::jsonrpc::Request;

/// Codec trait for serializing and deserializing frame bodies
pub trait Codec: Send + Sync {
    /// Encode a value into bytes
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>>;

    /// Decode bytes into a value
    fn decode<T: for<'de> Deserialize<'de>>(&self, bytes: &[u8]) -> Result<T>;
}
