//! Decoding of refiner replies into typed results
//!
//! Success shapes are method specific. Failures share the generic JSON-RPC
//! convention of an `error` object with `message` and optional `data`.

use refiner_core::{CallFrame, U256};
use serde::Deserialize;
use serde_json::{Number, Value};
use tracing::debug;

use crate::error::{ProxyError, Result};

/// Decode a `debug_traceTransaction` reply
///
/// `result` may be a bare call frame or a one-element array holding it; both
/// decode to the same value.
pub fn trace_transaction(response: &[u8]) -> Result<CallFrame> {
    let response = parse(response)?;

    match response.get("result") {
        None => Err(rpc_error(&response)),
        Some(result @ Value::Object(_)) => CallFrame::deserialize(result)
            .map_err(|e| ProxyError::UnexpectedResponseShape(format!("undecodable trace: {e}"))),
        Some(Value::Array(items)) => {
            let mut frames: Vec<CallFrame> = items
                .iter()
                .filter_map(|item| match CallFrame::deserialize(item) {
                    Ok(frame) => Some(frame),
                    Err(e) => {
                        debug!(error = %e, "skipping undecodable trace element");
                        None
                    }
                })
                .collect();

            if frames.len() != 1 {
                return Err(ProxyError::UnexpectedResponseShape(format!(
                    "expected exactly one trace, decoded {} of {}",
                    frames.len(),
                    items.len()
                )));
            }
            Ok(frames.remove(0))
        }
        Some(other) => Err(ProxyError::UnexpectedResponseShape(format!(
            "trace result is {}",
            json_kind(other)
        ))),
    }
}

/// Decode an `eth_estimateGas` reply
///
/// The refiner answers with a plain decimal JSON number; it is re-rendered
/// as a hex quantity and decoded into `U256`.
///
/// The number must fit in a `u64`. Larger integers come back from the
/// refiner as floats anyway, and gas never exceeds a block's gas limit, so
/// anything beyond is reported as `MalformedNumber` rather than widened.
pub fn estimate_gas(response: &[u8]) -> Result<U256> {
    let response = parse(response)?;

    match response.get("result") {
        Some(Value::Number(number)) => parse_quantity(number),
        _ => Err(engine_error(&response)),
    }
}

fn parse(response: &[u8]) -> Result<Value> {
    serde_json::from_slice(response).map_err(|e| {
        debug!(error = %e, "refiner reply is not JSON");
        ProxyError::InternalProtocol
    })
}

fn parse_quantity(number: &Number) -> Result<U256> {
    let decimal = number.to_string();
    let value: u64 = decimal
        .parse()
        .map_err(|_| ProxyError::MalformedNumber(decimal.clone()))?;

    let hex = format!("{value:#x}");
    serde_json::from_value(Value::String(hex))
        .map_err(|e| ProxyError::MalformedNumber(format!("{decimal}: {e}")))
}

/// `error.message` as an RPC error, or a protocol violation if unreadable
fn rpc_error(response: &Value) -> ProxyError {
    match response.pointer("/error/message").and_then(Value::as_str) {
        Some(message) => ProxyError::Rpc(message.to_string()),
        None => ProxyError::InternalProtocol,
    }
}

/// `error.data` if non-empty, else `error.message`, else a generic message
fn engine_error(response: &Value) -> ProxyError {
    let detail = response
        .pointer("/error/data")
        .and_then(diagnostic)
        .or_else(|| response.pointer("/error/message").and_then(diagnostic))
        .unwrap_or_else(|| "unknown error occurred".to_string());

    ProxyError::Engine(detail)
}

fn diagnostic(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
