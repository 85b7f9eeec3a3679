use chain_core::SignError;
use thiserror::Error;

/// Remote signing-service errors.
///
/// The two `Missing*` variants are deliberately distinct from the request
/// failures: a response that arrives without its blob is a malformed
/// service response, not a transport problem, and callers may want to tell
/// them apart.
#[derive(Debug, Error)]
pub enum KmsError {
    #[error("public key request failed: {0}")]
    GetPublicKey(String),

    #[error("sign request failed: {0}")]
    Sign(String),

    #[error("response missing public key blob")]
    MissingPublicKey,

    #[error("response missing signature blob")]
    MissingSignature,

    #[error("unparseable public key: {0}")]
    ParsePublicKey(String),

    #[error("unparseable signature: {0}")]
    ParseSignature(String),
}

impl From<KmsError> for SignError {
    fn from(e: KmsError) -> Self {
        match e {
            KmsError::ParsePublicKey(_) | KmsError::ParseSignature(_) => {
                SignError::Malformed(e.to_string())
            }
            other => SignError::Backend(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_signature() {
        assert_eq!(
            KmsError::MissingSignature.to_string(),
            "response missing signature blob"
        );
    }

    #[test]
    fn parse_errors_map_to_malformed() {
        let err: SignError = KmsError::ParseSignature("bad der".into()).into();
        assert!(matches!(err, SignError::Malformed(_)));
    }

    #[test]
    fn service_errors_map_to_backend() {
        let err: SignError = KmsError::MissingSignature.into();
        assert!(matches!(err, SignError::Backend(_)));
        let err: SignError = KmsError::Sign("timeout".into()).into();
        assert!(matches!(err, SignError::Backend(_)));
    }
}
