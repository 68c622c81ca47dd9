use primitive_types::{H160, U256};
use serde::{Deserialize, Serialize};

use crate::bytes::Bytes;

/// One frame of a `callTracer` execution trace
///
/// The refiner returns the top-level call with nested sub-calls in `calls`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFrame {
    #[serde(rename = "type")]
    pub call_type: String,

    pub from: H160,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<H160>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,

    pub gas: U256,

    pub gas_used: U256,

    pub input: Bytes,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Bytes>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revert_reason: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub calls: Vec<CallFrame>,
}
