//! The signing capability boundary.
//!
//! A `Signer` produces a public key and serialized signatures without ever
//! exposing the secret behind them. Two production implementations exist —
//! local key material (`keystore`) and a remote key-management service
//! (`kms-signer`) — selected by configuration at the application entry
//! point and passed down explicitly. Nothing in this workspace holds a
//! process-wide signer instance.

use async_trait::async_trait;

use crate::address::Address;
use crate::error::SignError;
use crate::signature::{PublicKey, Scheme, SerializedSignature};

/// A signing capability: one key, one scheme, one public key for the
/// lifetime of the instance.
///
/// `sign_data` operates on the raw message bytes; implementations digest
/// with BLAKE2b-256 before producing the scheme-specific signature, so the
/// caller never handles digests directly.
#[async_trait]
pub trait Signer: Send + Sync {
    /// The signature scheme this signer produces.
    fn scheme(&self) -> Scheme;

    /// The signer's public key. Remote implementations fetch it on first
    /// use and cache it for the lifetime of the instance.
    async fn public_key(&self) -> Result<PublicKey, SignError>;

    /// Sign `data` and return the serialized-signature envelope.
    async fn sign_data(&self, data: &[u8]) -> Result<SerializedSignature, SignError>;

    /// The account address derived from the signer's public key.
    async fn address(&self) -> Result<Address, SignError> {
        Ok(self.public_key().await?.to_address())
    }
}
