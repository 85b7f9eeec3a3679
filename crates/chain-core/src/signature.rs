//! Signature schemes, public keys, and the serialized-signature envelope.
//!
//! The ledger accepts signatures as a single tagged byte string:
//! `flag || signature(64) || public_key`. The flag identifies the scheme,
//! the signature is always 64 bytes (Ed25519, or compact low-S ECDSA for
//! secp256k1), and the public key is the signer's point in its canonical
//! compressed form. Verifiers reject envelopes whose lengths or flags do
//! not match, so parsing here is strict.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::address::Address;
use crate::error::ChainError;
use crate::intent::signing_digest;

/// Signature width in bytes, identical for both schemes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Supported signature schemes and their envelope flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Ed25519,
    Secp256k1,
}

impl Scheme {
    /// Envelope flag byte for this scheme.
    pub fn flag(self) -> u8 {
        match self {
            Scheme::Ed25519 => 0x00,
            Scheme::Secp256k1 => 0x01,
        }
    }

    pub fn from_flag(flag: u8) -> Result<Self, ChainError> {
        match flag {
            0x00 => Ok(Scheme::Ed25519),
            0x01 => Ok(Scheme::Secp256k1),
            other => Err(ChainError::UnknownScheme(other)),
        }
    }

    /// Canonical public key width: 32 bytes for Ed25519, 33 bytes for a
    /// compressed secp256k1 point.
    pub fn public_key_length(self) -> usize {
        match self {
            Scheme::Ed25519 => 32,
            Scheme::Secp256k1 => 33,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Ed25519 => write!(f, "ed25519"),
            Scheme::Secp256k1 => write!(f, "secp256k1"),
        }
    }
}

/// A signer's public key in its canonical compressed encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicKey {
    Ed25519([u8; 32]),
    Secp256k1([u8; 33]),
}

impl PublicKey {
    pub fn scheme(&self) -> Scheme {
        match self {
            PublicKey::Ed25519(_) => Scheme::Ed25519,
            PublicKey::Secp256k1(_) => Scheme::Secp256k1,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PublicKey::Ed25519(bytes) => bytes,
            PublicKey::Secp256k1(bytes) => bytes,
        }
    }

    /// Build from raw bytes, checking the width expected by `scheme`.
    pub fn from_bytes(scheme: Scheme, bytes: &[u8]) -> Result<Self, ChainError> {
        if bytes.len() != scheme.public_key_length() {
            return Err(ChainError::InvalidPublicKey(format!(
                "{scheme} key must be {} bytes, got {}",
                scheme.public_key_length(),
                bytes.len()
            )));
        }
        match scheme {
            Scheme::Ed25519 => {
                let mut arr = [0u8; 32];
                arr.copy_from_slice(bytes);
                Ok(PublicKey::Ed25519(arr))
            }
            Scheme::Secp256k1 => {
                let mut arr = [0u8; 33];
                arr.copy_from_slice(bytes);
                Ok(PublicKey::Secp256k1(arr))
            }
        }
    }

    /// Account address: `blake2b_256(flag || key_bytes)`.
    pub fn to_address(&self) -> Address {
        let mut preimage = Vec::with_capacity(1 + self.as_bytes().len());
        preimage.push(self.scheme().flag());
        preimage.extend_from_slice(self.as_bytes());
        Address::new(signing_digest(&preimage))
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.as_bytes()))
    }
}

/// The signature envelope attached to transactions and authorization
/// messages: `flag || signature || public_key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedSignature {
    signature: [u8; SIGNATURE_LENGTH],
    public_key: PublicKey,
}

impl SerializedSignature {
    pub fn new(signature: [u8; SIGNATURE_LENGTH], public_key: PublicKey) -> Self {
        Self {
            signature,
            public_key,
        }
    }

    pub fn scheme(&self) -> Scheme {
        self.public_key.scheme()
    }

    pub fn signature(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.signature
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Serialize to the wire form `flag || signature || public_key`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let key = self.public_key.as_bytes();
        let mut out = Vec::with_capacity(1 + SIGNATURE_LENGTH + key.len());
        out.push(self.scheme().flag());
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(key);
        out
    }

    /// Base64 of the wire form, as submitted over JSON-RPC.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.to_bytes())
    }

    /// Strict parse of the wire form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ChainError> {
        let Some((&flag, rest)) = bytes.split_first() else {
            return Err(ChainError::InvalidSignature("empty envelope".into()));
        };
        let scheme = Scheme::from_flag(flag)?;

        let expected = SIGNATURE_LENGTH + scheme.public_key_length();
        if rest.len() != expected {
            return Err(ChainError::InvalidSignature(format!(
                "{scheme} envelope body must be {expected} bytes, got {}",
                rest.len()
            )));
        }

        let mut signature = [0u8; SIGNATURE_LENGTH];
        signature.copy_from_slice(&rest[..SIGNATURE_LENGTH]);
        let public_key = PublicKey::from_bytes(scheme, &rest[SIGNATURE_LENGTH..])?;

        Ok(Self {
            signature,
            public_key,
        })
    }
}
