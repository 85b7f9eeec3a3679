//! The KMS-backed `Signer` implementation.

use async_trait::async_trait;
use tokio::sync::OnceCell;

use chain_core::intent::signing_digest;
use chain_core::{PublicKey, Scheme, SerializedSignature, SignError, Signer};

use crate::adapter::{compact_signature_from_der, compressed_public_key_from_der};
use crate::client::KmsK256;
use crate::error::KmsError;

/// Signs with a key held by the remote service; the secret never enters
/// this process.
///
/// The public key is fetched on first use and cached for the lifetime of
/// the instance — one key per signer, no process-wide state. Construct one
/// at the application entry point and pass it down.
pub struct KmsSigner<T: KmsK256> {
    client: T,
    key_id: String,
    public_key: OnceCell<PublicKey>,
}

impl<T: KmsK256> KmsSigner<T> {
    pub fn new(client: T, key_id: impl Into<String>) -> Self {
        Self {
            client,
            key_id: key_id.into(),
            public_key: OnceCell::new(),
        }
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    async fn fetch_public_key(&self) -> Result<PublicKey, KmsError> {
        let der = self.client.get_der_public_key(&self.key_id).await?;
        let compressed = compressed_public_key_from_der(&der)?;
        Ok(PublicKey::Secp256k1(compressed))
    }
}

#[async_trait]
impl<T: KmsK256> Signer for KmsSigner<T> {
    fn scheme(&self) -> Scheme {
        Scheme::Secp256k1
    }

    async fn public_key(&self) -> Result<PublicKey, SignError> {
        self.public_key
            .get_or_try_init(|| self.fetch_public_key())
            .await
            .copied()
            .map_err(Into::into)
    }

    async fn sign_data(&self, data: &[u8]) -> Result<SerializedSignature, SignError> {
        let public_key = self.public_key().await?;

        let digest = signing_digest(data);
        let der = self.client.sign_digest(&self.key_id, digest).await?;
        let compact = compact_signature_from_der(&der)?;

        Ok(SerializedSignature::new(compact, public_key))
    }
}
