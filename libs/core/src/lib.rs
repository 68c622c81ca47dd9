//! Refiner Core - Ethereum-facing types shared by the refiner proxy layers
//!
//! Hashes and quantities come from `primitive-types` and serialize as
//! `0x`-prefixed hex, which is what both the JSON-RPC façade and the
//! refiner speak.

pub mod block;
pub mod bytes;
pub mod error;
pub mod trace;
pub mod transaction;

pub use block::{BlockNumber, BlockNumberOrHash};
pub use bytes::Bytes;
pub use error::{Error, Result};
pub use primitive_types::{H160, H256, U256};
pub use trace::CallFrame;
pub use transaction::TransactionForCall;
