//! Core primitives for the game ledger.
//!
//! This crate defines the chain-level building blocks the rest of the
//! workspace is written against: 32-byte account addresses, signature
//! schemes and their serialized-signature envelope, the intent-prefixed
//! signing payload, and a hand-rolled transaction wire format — all without
//! pulling in the upstream chain SDK (which drags in a full node client and
//! hundreds of transitive dependencies).
//!
//! The `Signer` trait is the single capability boundary for producing
//! signatures. Everything downstream (transaction signing, authorization
//! messages, the ops CLI) depends only on that trait, never on a concrete
//! key backend.

pub mod address;
pub mod error;
pub mod intent;
pub mod signature;
pub mod signer;
pub mod transaction;

// Re-export key public types for ergonomic imports.
pub use address::{Address, ADDRESS_LENGTH};
pub use error::{ChainError, SignError};
pub use intent::{signing_digest, with_intent, DIGEST_LENGTH};
pub use signature::{PublicKey, Scheme, SerializedSignature};
pub use signer::Signer;
pub use transaction::{
    CallArg, MoveCall, ObjectRef, SignedTransaction, TransactionData,
};
