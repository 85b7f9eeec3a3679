//! Configuration-level description of where local key material comes from.

use zeroize::Zeroize;

use chain_core::{Scheme, Signer};

use crate::error::KeystoreError;
use crate::keypair::{Ed25519Keypair, Secp256k1Keypair};

/// Where a local signer's secret comes from.
///
/// The variants mirror the two local key origins: a raw secret supplied
/// directly, or a mnemonic resolved through the ledger's standard paths.
/// `into_signer` consumes the source and zeroizes the contained secret
/// strings, so a `KeySource` cannot be reused after resolution.
pub enum KeySource {
    /// Raw 32-byte secret, 0x-hex encoded.
    SecretHex { secret: String, scheme: Scheme },
    /// BIP-39 mnemonic with ledger-standard derivation.
    Mnemonic {
        phrase: String,
        passphrase: String,
        scheme: Scheme,
        account: u32,
        index: u32,
    },
}

impl KeySource {
    /// Resolve to a boxed signing capability.
    pub fn into_signer(self) -> Result<Box<dyn Signer>, KeystoreError> {
        match self {
            KeySource::SecretHex { mut secret, scheme } => {
                let signer: Box<dyn Signer> = match scheme {
                    Scheme::Ed25519 => Box::new(Ed25519Keypair::from_secret_hex(&secret)?),
                    Scheme::Secp256k1 => Box::new(Secp256k1Keypair::from_secret_hex(&secret)?),
                };
                secret.zeroize();
                Ok(signer)
            }
            KeySource::Mnemonic {
                mut phrase,
                mut passphrase,
                scheme,
                account,
                index,
            } => {
                let signer: Box<dyn Signer> = match scheme {
                    Scheme::Ed25519 => Box::new(Ed25519Keypair::from_mnemonic(
                        &phrase,
                        &passphrase,
                        account,
                        index,
                    )?),
                    Scheme::Secp256k1 => Box::new(Secp256k1Keypair::from_mnemonic(
                        &phrase,
                        &passphrase,
                        account,
                        index,
                    )?),
                };
                phrase.zeroize();
                passphrase.zeroize();
                Ok(signer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str =
        "0x35efd9ffee592f275633a72947c6b711bc90c4cf20a0a567f3ea1f8f1dc15131";
    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[tokio::test]
    async fn secret_hex_resolves_to_requested_scheme() {
        for scheme in [Scheme::Ed25519, Scheme::Secp256k1] {
            let signer = KeySource::SecretHex {
                secret: TEST_SECRET.into(),
                scheme,
            }
            .into_signer()
            .unwrap();
            assert_eq!(signer.scheme(), scheme);
            assert_eq!(signer.public_key().await.unwrap().scheme(), scheme);
        }
    }

    #[tokio::test]
    async fn mnemonic_resolves_and_is_deterministic() {
        let build = || {
            KeySource::Mnemonic {
                phrase: TEST_MNEMONIC.into(),
                passphrase: String::new(),
                scheme: Scheme::Ed25519,
                account: 0,
                index: 0,
            }
            .into_signer()
            .unwrap()
        };
        let a = build();
        let b = build();
        assert_eq!(
            a.public_key().await.unwrap(),
            b.public_key().await.unwrap()
        );
    }

    #[test]
    fn invalid_secret_fails() {
        let result = KeySource::SecretHex {
            secret: "0xnothex".into(),
            scheme: Scheme::Ed25519,
        }
        .into_signer();
        assert!(result.is_err());
    }

    #[test]
    fn invalid_mnemonic_fails() {
        let result = KeySource::Mnemonic {
            phrase: "not a phrase".into(),
            passphrase: String::new(),
            scheme: Scheme::Secp256k1,
            account: 0,
            index: 0,
        }
        .into_signer();
        assert!(result.is_err());
    }
}
