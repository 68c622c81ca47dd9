use async_trait::async_trait;
use refiner_core::{BlockNumber, CallFrame, TransactionForCall, H256, U256};
use refiner_fabric::codec::Request;
use tracing::debug;

use crate::config::RefinerConfig;
use crate::connection::Connection;
use crate::error::Result;
use crate::interpret;

pub const TRACE_TRANSACTION: &str = "debug_traceTransaction";
pub const ESTIMATE_GAS: &str = "eth_estimateGas";

/// What the RPC façade needs from the refiner
#[async_trait]
pub trait RefinerClient: Send + Sync {
    async fn trace_transaction(&self, hash: H256) -> Result<CallFrame>;

    async fn estimate_gas(&self, tx: TransactionForCall, block: BlockNumber) -> Result<U256>;

    async fn close(&self) -> Result<()>;
}

/// `RefinerClient` over the framed socket protocol
pub struct SocketClient {
    connection: Connection,
}

impl SocketClient {
    /// Unconnected client; the socket is dialed on first use
    pub fn new(config: RefinerConfig) -> Self {
        Self {
            connection: Connection::new(config),
        }
    }

    /// Underlying connection manager
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Send a request and return the raw reply body
    pub async fn request(&self, request: &Request) -> Result<Vec<u8>> {
        let body = request.to_bytes()?;
        debug!(method = request.method(), len = body.len(), "forwarding request to refiner");
        self.connection.exchange(&body).await
    }
}

#[async_trait]
impl RefinerClient for SocketClient {
    async fn trace_transaction(&self, hash: H256) -> Result<CallFrame> {
        let request = Request::new(TRACE_TRANSACTION).param(&hash)?;
        let response = self.request(&request).await?;
        interpret::trace_transaction(&response)
    }

    async fn estimate_gas(&self, tx: TransactionForCall, block: BlockNumber) -> Result<U256> {
        // Tags go out as "earliest" / "latest" / "pending", heights as hex
        let request = Request::new(ESTIMATE_GAS).param(&tx)?.param(&block)?;
        let response = self.request(&request).await?;
        interpret::estimate_gas(&response)
    }

    async fn close(&self) -> Result<()> {
        self.connection.close().await
    }
}
