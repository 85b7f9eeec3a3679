//! Local keypairs for both ledger schemes.
//!
//! Signing always goes through `chain_core::Signer::sign_data`: the message
//! is digested with BLAKE2b-256, the digest is signed with the scheme's
//! primitive, and the result is wrapped in the serialized-signature
//! envelope. For secp256k1 the ECDSA signature is computed over SHA-256 of
//! the digest (the curve's default) and low-S normalized before wrapping,
//! so a locally produced signature is byte-compatible with one adapted from
//! the remote signing service.

use async_trait::async_trait;
use ed25519_dalek::Signer as _;
use k256::ecdsa::signature::Signer as _;
use zeroize::Zeroize;

use chain_core::intent::signing_digest;
use chain_core::{PublicKey, Scheme, SerializedSignature, SignError, Signer};

use crate::derivation;
use crate::error::KeystoreError;
use crate::mnemonic::seed_from_phrase;

/// Decode a 0x-prefixed hex secret into 32 bytes.
fn decode_secret_hex(secret: &str) -> Result<[u8; 32], KeystoreError> {
    let stripped = secret.strip_prefix("0x").unwrap_or(secret);
    let mut bytes = hex::decode(stripped)
        .map_err(|e| KeystoreError::InvalidSecret(format!("invalid hex: {e}")))?;

    if bytes.len() != 32 {
        bytes.zeroize();
        return Err(KeystoreError::InvalidSecret(format!(
            "expected 32 bytes, got {}",
            bytes.len()
        )));
    }

    let mut arr = [0u8; 32];
    arr.copy_from_slice(&bytes);
    bytes.zeroize();
    Ok(arr)
}

/// An Ed25519 keypair held in process memory.
pub struct Ed25519Keypair {
    signing_key: ed25519_dalek::SigningKey,
    public_key: [u8; 32],
}

impl Ed25519Keypair {
    pub fn from_bytes(secret: &[u8; 32]) -> Self {
        let signing_key = ed25519_dalek::SigningKey::from_bytes(secret);
        let public_key = signing_key.verifying_key().to_bytes();
        Self {
            signing_key,
            public_key,
        }
    }

    pub fn from_secret_hex(secret: &str) -> Result<Self, KeystoreError> {
        let mut bytes = decode_secret_hex(secret)?;
        let keypair = Self::from_bytes(&bytes);
        bytes.zeroize();
        Ok(keypair)
    }

    /// Derive from a mnemonic via the ledger's SLIP-0010 path.
    pub fn from_mnemonic(
        phrase: &str,
        passphrase: &str,
        account: u32,
        index: u32,
    ) -> Result<Self, KeystoreError> {
        let mut seed = seed_from_phrase(phrase, passphrase)?;
        let derived = derivation::derive_ed25519(&seed, account, index);
        seed.zeroize();
        Ok(Self::from_bytes(&derived?.secret))
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::Ed25519(self.public_key)
    }
}

#[async_trait]
impl Signer for Ed25519Keypair {
    fn scheme(&self) -> Scheme {
        Scheme::Ed25519
    }

    async fn public_key(&self) -> Result<PublicKey, SignError> {
        Ok(self.public_key())
    }

    async fn sign_data(&self, data: &[u8]) -> Result<SerializedSignature, SignError> {
        let digest = signing_digest(data);
        let signature = self.signing_key.sign(&digest);
        Ok(SerializedSignature::new(
            signature.to_bytes(),
            self.public_key(),
        ))
    }
}

/// A secp256k1 keypair held in process memory.
pub struct Secp256k1Keypair {
    signing_key: k256::ecdsa::SigningKey,
    public_key: [u8; 33],
}

impl Secp256k1Keypair {
    pub fn from_bytes(secret: &[u8; 32]) -> Result<Self, KeystoreError> {
        let signing_key = k256::ecdsa::SigningKey::from_bytes(secret.into())
            .map_err(|e| KeystoreError::InvalidSecret(e.to_string()))?;

        let public_key: [u8; 33] = signing_key
            .verifying_key()
            .to_sec1_bytes()
            .as_ref()
            .try_into()
            .map_err(|_| KeystoreError::InvalidSecret("invalid public key length".into()))?;

        Ok(Self {
            signing_key,
            public_key,
        })
    }

    pub fn from_secret_hex(secret: &str) -> Result<Self, KeystoreError> {
        let mut bytes = decode_secret_hex(secret)?;
        let keypair = Self::from_bytes(&bytes);
        bytes.zeroize();
        keypair
    }

    /// Derive from a mnemonic via the ledger's BIP-32 path.
    pub fn from_mnemonic(
        phrase: &str,
        passphrase: &str,
        account: u32,
        index: u32,
    ) -> Result<Self, KeystoreError> {
        let mut seed = seed_from_phrase(phrase, passphrase)?;
        let derived = derivation::derive_secp256k1(&seed, account, index);
        seed.zeroize();
        Self::from_bytes(&derived?.secret)
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::Secp256k1(self.public_key)
    }
}

#[async_trait]
impl Signer for Secp256k1Keypair {
    fn scheme(&self) -> Scheme {
        Scheme::Secp256k1
    }

    async fn public_key(&self) -> Result<PublicKey, SignError> {
        Ok(self.public_key())
    }

    async fn sign_data(&self, data: &[u8]) -> Result<SerializedSignature, SignError> {
        let digest = signing_digest(data);

        // ECDSA over SHA-256 of the digest; reject the malleable high-S
        // form before wrapping.
        let signature: k256::ecdsa::Signature = self
            .signing_key
            .try_sign(&digest)
            .map_err(|e| KeystoreError::Signing(e.to_string()))?;
        let signature = signature.normalize_s().unwrap_or(signature);

        let mut bytes = [0u8; 64];
        bytes.copy_from_slice(&signature.to_bytes());

        Ok(SerializedSignature::new(bytes, self.public_key()))
    }
}
