use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

pub mod tcp;
pub mod unix;

pub use self::tcp::{TcpTransport, TcpTransportBuilder, TcpTransportListener};
pub use self::unix::{UnixTransport, UnixTransportBuilder, UnixTransportListener};

/// Transport trait for sending and receiving length-prefixed frames
///
/// Each transport instance represents a single connection.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send one frame body over the transport
    async fn send(&mut self, bytes: &[u8]) -> Result<()>;

    /// Receive one frame body from the transport
    async fn receive(&mut self) -> Result<Vec<u8>>;

    /// Close the transport connection
    async fn close(&mut self) -> Result<()>;
}

/// Listener side, used to stand up a peer that speaks the same framing
#[async_trait::async_trait]
pub trait TransportListener: Send + Sync {
    type Transport: Transport;

    /// Accept the next incoming connection
    async fn accept(&self) -> Result<Self::Transport>;

    /// Stop listening
    async fn close(&mut self) -> Result<()>;
}

/// Stream transport kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Local domain socket; the address is a filesystem path
    #[default]
    Unix,
    /// TCP; the address is `host:port`
    Tcp,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix => f.write_str("unix"),
            Self::Tcp => f.write_str("tcp"),
        }
    }
}

/// Open a transport of the given kind, bounded by `connect_timeout`
pub async fn dial(
    network: Network,
    address: &str,
    connect_timeout: Duration,
) -> Result<Box<dyn Transport>> {
    debug!(%network, %address, ?connect_timeout, "dialing");
    match network {
        Network::Unix => {
            let transport = UnixTransport::connect_timeout(address, connect_timeout).await?;
            Ok(Box::new(transport))
        }
        Network::Tcp => {
            let transport = TcpTransport::connect_timeout(address, connect_timeout).await?;
            Ok(Box::new(transport))
        }
    }
}
