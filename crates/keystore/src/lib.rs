//! Local key material and the local `Signer` implementations.
//!
//! Key material enters this crate from exactly two origins — a raw 32-byte
//! secret (0x-hex) or a BIP-39 mnemonic resolved through the ledger's
//! standard derivation paths — and never leaves it: secrets are zeroized on
//! drop and are not serialized, logged, or displayed.
//!
//! The keypairs here are the local counterparts of the remote
//! `kms-signer::KmsSigner`; all three implement `chain_core::Signer`, and
//! callers choose one via [`KeySource`] at the application entry point.

pub mod derivation;
pub mod error;
pub mod keypair;
pub mod mnemonic;
pub mod source;

pub use error::KeystoreError;
pub use keypair::{Ed25519Keypair, Secp256k1Keypair};
pub use source::KeySource;
