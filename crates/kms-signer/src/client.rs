//! The opaque service boundary and its AWS implementation.

use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_kms::primitives::Blob;
use aws_sdk_kms::types::{MessageType, SigningAlgorithmSpec};
use tracing::debug;

use crate::error::KmsError;

/// The two calls the workspace makes against the key-management service.
///
/// Implementations must not retry: a failed call surfaces as-is.
#[async_trait]
pub trait KmsK256: Send + Sync {
    /// Fetch the DER-encoded (SPKI) public key for `key_id`.
    async fn get_der_public_key(&self, key_id: &str) -> Result<Vec<u8>, KmsError>;

    /// Sign a 32-byte digest with `key_id`. Returns a DER-encoded ECDSA
    /// signature, possibly high-S.
    async fn sign_digest(&self, key_id: &str, digest: [u8; 32]) -> Result<Vec<u8>, KmsError>;
}

/// AWS KMS client. Region and credentials resolve through the standard
/// provider chains (environment, profile, instance metadata).
#[derive(Debug, Clone)]
pub struct AwsKms {
    inner: aws_sdk_kms::Client,
}

impl AwsKms {
    /// Connect with an optional explicit region override.
    pub async fn connect(region: Option<String>) -> Self {
        let region_provider =
            RegionProviderChain::first_try(region.map(Region::new)).or_default_provider();

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;

        Self {
            inner: aws_sdk_kms::Client::new(&config),
        }
    }
}

#[async_trait]
impl KmsK256 for AwsKms {
    async fn get_der_public_key(&self, key_id: &str) -> Result<Vec<u8>, KmsError> {
        let output = self
            .inner
            .get_public_key()
            .key_id(key_id)
            .send()
            .await
            .map_err(|e| KmsError::GetPublicKey(format!("{e:?}")))?;

        output
            .public_key
            .map(Blob::into_inner)
            .ok_or(KmsError::MissingPublicKey)
    }

    async fn sign_digest(&self, key_id: &str, digest: [u8; 32]) -> Result<Vec<u8>, KmsError> {
        debug!(key_id, "requesting ECDSA signature from KMS");

        // Raw message type: the service applies SHA-256 over the 32-byte
        // digest before ECDSA, the same composition the local secp256k1
        // signer uses.
        let output = self
            .inner
            .sign()
            .key_id(key_id)
            .signing_algorithm(SigningAlgorithmSpec::EcdsaSha256)
            .message_type(MessageType::Raw)
            .message(Blob::new(digest.to_vec()))
            .send()
            .await
            .map_err(|e| KmsError::Sign(format!("{e:?}")))?;

        output
            .signature
            .map(Blob::into_inner)
            .ok_or(KmsError::MissingSignature)
    }
}
