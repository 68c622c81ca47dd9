//! Pre/post hook consumed by the JSON-RPC dispatch layer
//!
//! The dispatcher calls `pre` before running its own handler. If the proxy
//! reports the call as handled, the dispatcher returns whatever landed in the
//! response slot (or the error) instead of running the handler.

use async_trait::async_trait;
use refiner_core::{BlockNumber, BlockNumberOrHash, CallFrame, TransactionForCall, H256, U256};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::client::{RefinerClient, SocketClient, ESTIMATE_GAS, TRACE_TRANSACTION};
use crate::config::RefinerConfig;
use crate::error::{ProxyError, Result};

/// Typed result written into the dispatcher's response slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Trace(CallFrame),
    GasEstimate(U256),
}

/// Outcome of a `pre` hook
#[derive(Debug)]
pub struct PreOutcome {
    /// The dispatcher must not run its own handler
    pub handled: bool,
    pub error: Option<ProxyError>,
}

impl PreOutcome {
    pub fn pass() -> Self {
        Self {
            handled: false,
            error: None,
        }
    }

    pub fn done() -> Self {
        Self {
            handled: true,
            error: None,
        }
    }

    /// Handled, with an error for the caller
    pub fn failed(error: ProxyError) -> Self {
        Self {
            handled: true,
            error: Some(error),
        }
    }

    /// Not handled, but the arguments were unusable
    pub fn rejected(error: ProxyError) -> Self {
        Self {
            handled: false,
            error: Some(error),
        }
    }
}

/// Two-phase hook contract of the dispatch layer
#[async_trait]
pub trait Processor<C: Send + 'static>: Send + Sync {
    async fn pre(
        &self,
        ctx: C,
        method: &str,
        response: &mut Option<Response>,
        args: &[Value],
    ) -> (C, PreOutcome);

    fn post(
        &self,
        ctx: C,
        method: &str,
        response: &mut Option<Response>,
        error: &mut Option<ProxyError>,
    ) -> C;
}

/// Routes trace and gas-estimation calls to the refiner
pub struct RefinerProxy<R = SocketClient> {
    client: R,
}

impl RefinerProxy<SocketClient> {
    /// Socket-backed proxy; nothing is dialed until the first call
    pub fn new(config: RefinerConfig) -> Self {
        Self::with_client(SocketClient::new(config))
    }
}

impl<R: RefinerClient> RefinerProxy<R> {
    /// Proxy over any client implementation
    pub fn with_client(client: R) -> Self {
        Self { client }
    }

    /// Client the hook forwards to
    pub fn client(&self) -> &R {
        &self.client
    }

    /// Close the client's connection
    pub async fn close(&self) -> Result<()> {
        self.client.close().await
    }

    async fn trace_transaction(&self, response: &mut Option<Response>, args: &[Value]) -> PreOutcome {
        let [hash] = args else {
            return PreOutcome::rejected(arity(TRACE_TRANSACTION, "1", args.len()));
        };
        let hash = match H256::deserialize(hash) {
            Ok(hash) => hash,
            Err(e) => return PreOutcome::failed(ProxyError::InvalidParams(e.to_string())),
        };

        match self.client.trace_transaction(hash).await {
            Ok(frame) => {
                *response = Some(Response::Trace(frame));
                PreOutcome::done()
            }
            Err(e) => PreOutcome::failed(e),
        }
    }

    async fn estimate_gas(&self, response: &mut Option<Response>, args: &[Value]) -> PreOutcome {
        let (tx, block) = match args {
            [tx] => (tx, None),
            [tx, block] => (tx, Some(block)),
            _ => return PreOutcome::rejected(arity(ESTIMATE_GAS, "1 or 2", args.len())),
        };

        let tx = match TransactionForCall::deserialize(tx) {
            Ok(tx) => tx,
            Err(e) => return PreOutcome::failed(ProxyError::InvalidParams(e.to_string())),
        };
        let block = match block_number(block) {
            Ok(block) => block,
            Err(e) => return PreOutcome::failed(e),
        };

        match self.client.estimate_gas(tx, block).await {
            Ok(gas) => {
                *response = Some(Response::GasEstimate(gas));
                PreOutcome::done()
            }
            Err(e) => PreOutcome::failed(e),
        }
    }
}

#[async_trait]
impl<C, R> Processor<C> for RefinerProxy<R>
where
    C: Send + 'static,
    R: RefinerClient,
{
    async fn pre(
        &self,
        ctx: C,
        method: &str,
        response: &mut Option<Response>,
        args: &[Value],
    ) -> (C, PreOutcome) {
        let outcome = match method {
            TRACE_TRANSACTION => self.trace_transaction(response, args).await,
            ESTIMATE_GAS => self.estimate_gas(response, args).await,
            _ => return (ctx, PreOutcome::pass()),
        };

        debug!(
            method,
            handled = outcome.handled,
            failed = outcome.error.is_some(),
            "refiner hook"
        );
        (ctx, outcome)
    }

    fn post(
        &self,
        ctx: C,
        _method: &str,
        _response: &mut Option<Response>,
        _error: &mut Option<ProxyError>,
    ) -> C {
        ctx
    }
}

/// Resolve the optional block argument; absent or null means latest
fn block_number(block: Option<&Value>) -> Result<BlockNumber> {
    let block = match block {
        None | Some(Value::Null) => return Ok(BlockNumber::Latest),
        Some(block) => BlockNumberOrHash::deserialize(block)
            .map_err(|e| ProxyError::InvalidParams(e.to_string()))?,
    };

    block.block_number.ok_or_else(|| {
        ProxyError::InvalidParams("block hash references are not supported by the refiner".into())
    })
}

fn arity(method: &str, expected: &str, got: usize) -> ProxyError {
    ProxyError::InvalidParams(format!("{method} expects {expected} argument(s), got {got}"))
}
