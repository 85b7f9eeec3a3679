//! Remote signing through a cloud key-management service.
//!
//! The authority key for off-chain authorizations lives in AWS KMS and
//! never leaves it. This crate bridges the gap between what the service
//! speaks (DER: an SPKI document for the public key, an ASN.1 ECDSA
//! signature that may be high-S) and what the ledger accepts (a compressed
//! SEC1 point and a fixed 64-byte low-S signature inside the serialized-
//! signature envelope).
//!
//! The service itself is an opaque collaborator behind the [`KmsK256`]
//! trait — two calls, `get_der_public_key` and `sign_digest` — so tests
//! drive the whole path with an in-process key and production code uses
//! [`AwsKms`]. Service failures are fatal and never retried.

pub mod adapter;
pub mod client;
pub mod error;
pub mod signer;

pub use adapter::{compact_signature_from_der, compressed_public_key_from_der};
pub use client::{AwsKms, KmsK256};
pub use error::KmsError;
pub use signer::KmsSigner;
