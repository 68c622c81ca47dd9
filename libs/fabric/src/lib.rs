//! Refiner Fabric - framing and transport layer for the refiner protocol
//!
//! Frames are `[u32 little-endian length][JSON body]` over a stream socket
//! (Unix domain socket or TCP). On top of that sits a JSON-RPC 2.0 request
//! encoder and a typed `Channel` for whole-value exchange.
//!
//! # Example
//!
//! ```no_run
//! use refiner_fabric::{codec::Request, transport::{Transport, UnixTransport}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut transport = UnixTransport::connect("/tmp/refiner.sock").await?;
//!
//! let body = Request::new("debug_traceTransaction")
//!     .param(&"0x1f2e3d4c5b6a79881f2e3d4c5b6a79881f2e3d4c5b6a79881f2e3d4c5b6a7988")?
//!     .to_bytes()?;
//! transport.send(&body).await?;
//! let response = transport.receive().await?;
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod codec;
pub mod error;
pub mod frame;
pub mod transport;

// Re-exports for convenience
pub use channel::Channel;
pub use error::{Error, Result};
pub use transport::{Network, Transport};
