//! Submission boundary against the ledger node.
//!
//! The whole chain is externally hosted; this crate only speaks to its
//! JSON-RPC endpoint — submit a signed transaction, resolve an object
//! reference — and treats everything behind that endpoint as opaque. No
//! retries, no backpressure: each call either succeeds or surfaces its
//! failure to the caller.

pub mod client;
pub mod error;

pub use client::{ExecutionResult, LedgerRpc};
pub use error::RpcError;
