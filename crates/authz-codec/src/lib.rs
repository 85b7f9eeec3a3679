//! Canonical byte encodings for off-chain-authorized operations.
//!
//! An authorization message is a fixed tuple of typed fields serialized
//! into a single undelimited byte string: the off-chain authority signs the
//! bytes, and the on-chain program re-derives the exact same bytes to check
//! the signature before releasing anything. Field order and fixed widths
//! ARE the schema — a one-byte divergence doesn't fail here, it fails
//! silently as a verification rejection on chain.
//!
//! Because of that failure mode, every schema in this crate carries both an
//! encoder and a strict round-trip decoder, and the test suite pins the
//! byte layout with fixed hex fixtures.
//!
//! Replay protection is not handled here: the salt only makes otherwise
//! identical messages distinguishable for the verifier's seen-message set.

pub mod codec;
pub mod error;
pub mod messages;

pub use codec::{MessageReader, MessageWriter};
pub use error::CodecError;
pub use messages::{GachaWithdrawal, MintGrant, TokenWithdrawal};
