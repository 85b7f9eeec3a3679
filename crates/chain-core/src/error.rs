use thiserror::Error;

/// Errors for chain primitive parsing and encoding.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("unknown signature scheme flag: {0:#04x}")]
    UnknownScheme(u8),
}

/// Errors produced by `Signer` implementations.
///
/// Backend failures (a remote signing service being unreachable, rejecting
/// the request, or returning an incomplete response) are fatal and never
/// retried; they carry the backend's own description.
#[derive(Debug, Error)]
pub enum SignError {
    #[error("signing backend: {0}")]
    Backend(String),

    #[error("malformed signing material: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_address() {
        let err = ChainError::InvalidAddress("odd length".into());
        assert_eq!(err.to_string(), "invalid address: odd length");
    }

    #[test]
    fn display_unknown_scheme() {
        let err = ChainError::UnknownScheme(0x7f);
        assert_eq!(err.to_string(), "unknown signature scheme flag: 0x7f");
    }

    #[test]
    fn display_sign_backend() {
        let err = SignError::Backend("service unreachable".into());
        assert_eq!(err.to_string(), "signing backend: service unreachable");
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> =
            Box::new(SignError::Malformed("bad point".into()));
        assert!(err.to_string().contains("bad point"));
    }
}
