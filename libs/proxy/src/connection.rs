//! Single persistent connection to the refiner
//!
//! The connection is dialed lazily on the first exchange and lives in one
//! slot behind an async mutex. Every exchange holds the lock for its whole
//! write + read, so frames from concurrent callers never interleave and at
//! most one socket is open at a time.
//!
//! ```text
//! Unconnected --dial ok--> Connected --broken pipe / deadline / close--> Unconnected
//! ```
//!
//! While an exchange runs the transport is taken out of the slot and only
//! put back once the exchange reaches a well-defined frame boundary. A call
//! that hits its deadline, or whose future is dropped halfway, therefore
//! leaves the slot empty and the next caller dials afresh instead of reading
//! a stale reply.

use tokio::sync::Mutex;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

use refiner_fabric::transport::{self, Network, Transport};

use crate::config::RefinerConfig;
use crate::error::{ProxyError, Result};

/// Lazily dialed, mutex-guarded refiner socket
pub struct Connection {
    config: RefinerConfig,
    transport: Mutex<Option<Box<dyn Transport>>>,
}

impl Connection {
    /// Create an unconnected manager; nothing is dialed until first use
    pub fn new(config: RefinerConfig) -> Self {
        Self {
            config,
            transport: Mutex::new(None),
        }
    }

    /// Whether a socket is currently held
    pub async fn is_connected(&self) -> bool {
        self.transport.lock().await.is_some()
    }

    /// Send one frame body and wait for the reply body
    ///
    /// Only a broken pipe on write triggers a reconnect, and the triggering
    /// call still fails: the request is not re-sent on the new socket.
    pub async fn exchange(&self, body: &[u8]) -> Result<Vec<u8>> {
        let mut slot = self.transport.lock().await;

        let mut transport = match slot.take() {
            Some(transport) => transport,
            None => self.dial().await?,
        };

        let deadline = Instant::now() + self.config.timeout;

        match timeout_at(deadline, transport.send(body)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.is_broken_pipe() => {
                warn!(address = %self.config.address, "refiner connection broken, reconnecting");
                drop(transport);
                *slot = Some(self.dial().await?);
                return Err(e.into());
            }
            Ok(Err(e)) => {
                *slot = Some(transport);
                return Err(e.into());
            }
            Err(_) => {
                warn!(timeout = ?self.config.timeout, "refiner send deadline elapsed, dropping connection");
                return Err(refiner_fabric::Error::Timeout("Send").into());
            }
        }

        match timeout_at(deadline, transport.receive()).await {
            Ok(received) => {
                *slot = Some(transport);
                Ok(received?)
            }
            Err(_) => {
                warn!(timeout = ?self.config.timeout, "refiner receive deadline elapsed, dropping connection");
                Err(refiner_fabric::Error::Timeout("Receive").into())
            }
        }
    }

    /// Shut down the socket if one is open
    ///
    /// The manager stays usable; the next exchange reconnects.
    pub async fn close(&self) -> Result<()> {
        let Some(mut transport) = self.transport.lock().await.take() else {
            return Ok(());
        };
        debug!(address = %self.config.address, "closing refiner connection");
        transport.close().await?;
        Ok(())
    }

    async fn dial(&self) -> Result<Box<dyn Transport>> {
        let RefinerConfig {
            network,
            address,
            timeout,
        } = &self.config;

        if *network == Network::Unix && !tokio::fs::try_exists(address).await.unwrap_or(false) {
            debug!(%address, "refiner socket does not exist");
            return Err(ProxyError::EndpointUnavailable);
        }

        match transport::dial(*network, address, *timeout).await {
            Ok(transport) => {
                info!(%network, %address, "connected to refiner");
                Ok(transport)
            }
            Err(e) => {
                warn!(%network, %address, error = %e, "failed to connect to refiner");
                Err(ProxyError::EndpointUnavailable)
            }
        }
    }
}
