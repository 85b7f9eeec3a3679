use chain_core::SignError;
use thiserror::Error;

/// Local key-material errors.
#[derive(Debug, Error)]
pub enum KeystoreError {
    #[error("invalid secret key: {0}")]
    InvalidSecret(String),

    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("key derivation failed: {0}")]
    Derivation(String),

    #[error("signing failed: {0}")]
    Signing(String),
}

impl From<KeystoreError> for SignError {
    fn from(e: KeystoreError) -> Self {
        match e {
            KeystoreError::Signing(msg) => SignError::Backend(msg),
            other => SignError::Malformed(other.to_string()),
        }
    }
}
