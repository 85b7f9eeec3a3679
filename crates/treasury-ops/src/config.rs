//! Shared flag groups: signer selection, node endpoint, gas.
//!
//! Every value can come from the environment, mirroring how the operations
//! were driven before they were collapsed into this binary. Key material is
//! resolved here, once, at the entry point — the resulting `Signer` is
//! passed down to whatever operation needs it.

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};

use chain_core::{Address, ObjectRef, Scheme, Signer};
use keystore::KeySource;
use kms_signer::{AwsKms, KmsSigner};
use rpc_client::LedgerRpc;

/// Which signing key to use and where it lives.
///
/// Exactly one of `--secret-key`, `--mnemonic`, or `--kms-key-id` selects
/// the backend; the remote backend is always secp256k1.
#[derive(Args)]
pub struct SignerOpts {
    /// Raw 32-byte secret, 0x-hex encoded.
    #[arg(long, env = "OPS_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// BIP-39 mnemonic phrase.
    #[arg(long, env = "OPS_MNEMONIC", hide_env_values = true)]
    mnemonic: Option<String>,

    /// Mnemonic passphrase.
    #[arg(long, env = "OPS_MNEMONIC_PASSPHRASE", hide_env_values = true, default_value = "")]
    passphrase: String,

    /// Key id or alias in the remote key-management service.
    #[arg(long, env = "OPS_KMS_KEY_ID")]
    kms_key_id: Option<String>,

    /// Region override for the remote service.
    #[arg(long, env = "AWS_REGION")]
    aws_region: Option<String>,

    /// Signature scheme for local keys.
    #[arg(long, value_enum, default_value = "ed25519")]
    scheme: SchemeArg,

    /// Derivation account (mnemonic keys).
    #[arg(long, default_value_t = 0)]
    account: u32,

    /// Derivation index (mnemonic keys).
    #[arg(long, default_value_t = 0)]
    key_index: u32,
}

impl SignerOpts {
    /// Resolve the configured key into a signing capability.
    pub async fn build_signer(&self) -> Result<Box<dyn Signer>> {
        if let Some(key_id) = &self.kms_key_id {
            let client = AwsKms::connect(self.aws_region.clone()).await;
            return Ok(Box::new(KmsSigner::new(client, key_id.clone())));
        }

        if let Some(secret) = &self.secret_key {
            let signer = KeySource::SecretHex {
                secret: secret.clone(),
                scheme: self.scheme.into(),
            }
            .into_signer()?;
            return Ok(signer);
        }

        if let Some(phrase) = &self.mnemonic {
            let signer = KeySource::Mnemonic {
                phrase: phrase.clone(),
                passphrase: self.passphrase.clone(),
                scheme: self.scheme.into(),
                account: self.account,
                index: self.key_index,
            }
            .into_signer()?;
            return Ok(signer);
        }

        bail!("no signing key configured: pass --secret-key, --mnemonic, or --kms-key-id");
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SchemeArg {
    Ed25519,
    Secp256k1,
}

impl From<SchemeArg> for Scheme {
    fn from(scheme: SchemeArg) -> Self {
        match scheme {
            SchemeArg::Ed25519 => Scheme::Ed25519,
            SchemeArg::Secp256k1 => Scheme::Secp256k1,
        }
    }
}

/// Node endpoint and the deployed game package.
#[derive(Args)]
pub struct NetworkOpts {
    /// JSON-RPC endpoint of the ledger node.
    #[arg(long, env = "LEDGER_RPC_URL")]
    pub rpc_url: String,

    /// Deployed game package id.
    #[arg(long, env = "GAME_PACKAGE")]
    pub package: Address,
}

impl NetworkOpts {
    pub fn rpc(&self) -> LedgerRpc {
        LedgerRpc::new(self.rpc_url.clone())
    }
}

/// Gas coin and limits for a submitted transaction.
#[derive(Args)]
pub struct GasOpts {
    /// Gas coin object id owned by the sender.
    #[arg(long, env = "GAS_OBJECT")]
    pub gas_object: Address,

    #[arg(long, env = "GAS_BUDGET", default_value_t = 100_000_000)]
    pub gas_budget: u64,

    #[arg(long, env = "GAS_PRICE", default_value_t = 1_000)]
    pub gas_price: u64,
}

impl GasOpts {
    /// Resolve the gas coin to its current reference.
    pub async fn payment(&self, rpc: &LedgerRpc) -> Result<ObjectRef> {
        Ok(rpc.object_ref(&self.gas_object).await?)
    }
}

/// Decode a 0x-hex CLI argument into raw bytes.
pub fn decode_hex_arg(name: &str, value: &str) -> Result<Vec<u8>> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(stripped).map_err(|e| anyhow::anyhow!("--{name}: invalid hex: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_hex_arg_accepts_both_prefixes() {
        assert_eq!(decode_hex_arg("x", "0xff00").unwrap(), vec![0xff, 0x00]);
        assert_eq!(decode_hex_arg("x", "ff00").unwrap(), vec![0xff, 0x00]);
    }

    #[test]
    fn decode_hex_arg_rejects_garbage() {
        let err = decode_hex_arg("signed-message", "0xzz").unwrap_err();
        assert!(err.to_string().contains("--signed-message"));
    }

    #[tokio::test]
    async fn signer_opts_require_a_key() {
        let opts = SignerOpts {
            secret_key: None,
            mnemonic: None,
            passphrase: String::new(),
            kms_key_id: None,
            aws_region: None,
            scheme: SchemeArg::Ed25519,
            account: 0,
            key_index: 0,
        };
        assert!(opts.build_signer().await.is_err());
    }

    #[tokio::test]
    async fn signer_opts_build_local_keys() {
        let secret =
            "0x35efd9ffee592f275633a72947c6b711bc90c4cf20a0a567f3ea1f8f1dc15131";
        for scheme in [SchemeArg::Ed25519, SchemeArg::Secp256k1] {
            let opts = SignerOpts {
                secret_key: Some(secret.into()),
                mnemonic: None,
                passphrase: String::new(),
                kms_key_id: None,
                aws_region: None,
                scheme,
                account: 0,
                key_index: 0,
            };
            let signer = opts.build_signer().await.unwrap();
            assert_eq!(signer.scheme(), Scheme::from(scheme));
        }
    }
}
