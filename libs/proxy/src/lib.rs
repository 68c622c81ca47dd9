//! Refiner Proxy - forwards selected JSON-RPC calls to the refiner
//!
//! `debug_traceTransaction` and `eth_estimateGas` are answered by a separate
//! refiner process over one persistent framed socket. Everything else passes
//! through to the dispatcher's own handlers.
//!
//! ```text
//! dispatcher --pre()--> RefinerProxy --> SocketClient --> Connection ==socket==> refiner
//!                           ^                                 |
//!                           +------- interpret::* <-----------+
//! ```
//!
//! # Example
//!
//! ```no_run
//! use refiner_proxy::{Processor, RefinerConfig, RefinerProxy};
//! use serde_json::json;
//!
//! # async fn example() {
//! let proxy = RefinerProxy::new(RefinerConfig::new("/run/refiner.sock"));
//!
//! let mut response = None;
//! let (_ctx, outcome) = proxy
//!     .pre((), "eth_estimateGas", &mut response, &[json!({ "to": null }), json!("latest")])
//!     .await;
//! if outcome.handled {
//!     println!("{:?} {:?}", response, outcome.error);
//! }
//! # }
//! ```

pub mod client;
pub mod config;
pub mod connection;
pub mod error;
pub mod hook;
pub mod interpret;

pub use client::{RefinerClient, SocketClient};
pub use config::RefinerConfig;
pub use connection::Connection;
pub use error::{ProxyError, Result};
pub use hook::{PreOutcome, Processor, RefinerProxy, Response};
