//! Hierarchical key derivation for the ledger's registered coin type.
//!
//! Ed25519 keys derive via SLIP-0010 with every path component hardened
//! (`m/44'/784'/account'/0'/index'`). secp256k1 keys derive via plain
//! BIP-32 (`m/54'/784'/account'/0/index`). The two schemes deliberately use
//! different purpose values, matching the ledger's wallet conventions.

use bip32::{DerivationPath, XPrv};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::Zeroize;

use crate::error::KeystoreError;

/// The ledger's registered BIP-44 coin type.
pub const COIN_TYPE: u32 = 784;

/// A derived 32-byte secret, zeroized on drop.
pub struct DerivedSecret {
    pub secret: [u8; 32],
    pub derivation_path: String,
}

impl Drop for DerivedSecret {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

/// SLIP-0010 path for Ed25519 accounts (all components hardened).
pub fn ed25519_path(account: u32, index: u32) -> String {
    format!("m/44'/{COIN_TYPE}'/{account}'/0'/{index}'")
}

/// BIP-32 path for secp256k1 accounts.
pub fn secp256k1_path(account: u32, index: u32) -> String {
    format!("m/54'/{COIN_TYPE}'/{account}'/0/{index}")
}

/// Derive an Ed25519 secret from a 64-byte seed using SLIP-0010.
///
/// Master key: HMAC-SHA512(key="ed25519 seed", data=seed); every child is
/// hardened (`0x00 || key || index|0x80000000`).
pub fn derive_ed25519(
    seed: &[u8],
    account: u32,
    index: u32,
) -> Result<DerivedSecret, KeystoreError> {
    type HmacSha512 = Hmac<Sha512>;

    let path = ed25519_path(account, index);

    let mut mac = HmacSha512::new_from_slice(b"ed25519 seed")
        .map_err(|e| KeystoreError::Derivation(e.to_string()))?;
    mac.update(seed);
    let result = mac.finalize().into_bytes();

    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&result[..32]);
    chain_code.copy_from_slice(&result[32..]);

    for component in parse_path_components(&path)? {
        let mut mac = HmacSha512::new_from_slice(&chain_code)
            .map_err(|e| KeystoreError::Derivation(e.to_string()))?;
        mac.update(&[0x00]);
        mac.update(&key);
        mac.update(&(component | 0x8000_0000).to_be_bytes());
        let result = mac.finalize().into_bytes();

        key.copy_from_slice(&result[..32]);
        chain_code.copy_from_slice(&result[32..]);
    }

    let derived = DerivedSecret {
        secret: key,
        derivation_path: path,
    };

    key.zeroize();
    chain_code.zeroize();

    Ok(derived)
}

/// Derive a secp256k1 secret from a 64-byte seed using BIP-32.
pub fn derive_secp256k1(
    seed: &[u8],
    account: u32,
    index: u32,
) -> Result<DerivedSecret, KeystoreError> {
    let path_str = secp256k1_path(account, index);

    let path: DerivationPath = path_str
        .parse()
        .map_err(|e: bip32::Error| KeystoreError::Derivation(e.to_string()))?;

    let xprv = XPrv::derive_from_path(seed, &path)
        .map_err(|e| KeystoreError::Derivation(e.to_string()))?;

    let secret: [u8; 32] = xprv.to_bytes().into();

    Ok(DerivedSecret {
        secret,
        derivation_path: path_str,
    })
}

/// Parse "m/44'/784'/0'/0'/0'" into [44, 784, 0, 0, 0].
fn parse_path_components(path: &str) -> Result<Vec<u32>, KeystoreError> {
    let path = path
        .strip_prefix("m/")
        .ok_or_else(|| KeystoreError::Derivation("path must start with m/".into()))?;

    path.split('/')
        .map(|component| {
            let digits = component
                .strip_suffix('\'')
                .or_else(|| component.strip_suffix('h'))
                .unwrap_or(component);
            digits
                .parse::<u32>()
                .map_err(|e| KeystoreError::Derivation(format!("invalid path component: {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mnemonic::seed_from_phrase;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn test_seed() -> Vec<u8> {
        seed_from_phrase(TEST_MNEMONIC, "").unwrap()
    }

    #[test]
    fn path_strings() {
        assert_eq!(ed25519_path(0, 0), "m/44'/784'/0'/0'/0'");
        assert_eq!(secp256k1_path(2, 5), "m/54'/784'/2'/0/5");
    }

    #[test]
    fn parse_path() {
        let components = parse_path_components("m/44'/784'/0'/0'/1'").unwrap();
        assert_eq!(components, vec![44, 784, 0, 0, 1]);
    }

    #[test]
    fn parse_path_rejects_garbage() {
        assert!(parse_path_components("44'/784'").is_err());
        assert!(parse_path_components("m/abc'").is_err());
    }

    #[test]
    fn ed25519_derivation_is_deterministic() {
        let seed = test_seed();
        let a = derive_ed25519(&seed, 0, 0).unwrap();
        let b = derive_ed25519(&seed, 0, 0).unwrap();
        assert_eq!(a.secret, b.secret);
        assert_eq!(a.derivation_path, "m/44'/784'/0'/0'/0'");
    }

    #[test]
    fn secp256k1_derivation_is_deterministic() {
        let seed = test_seed();
        let a = derive_secp256k1(&seed, 0, 0).unwrap();
        let b = derive_secp256k1(&seed, 0, 0).unwrap();
        assert_eq!(a.secret, b.secret);
    }

    #[test]
    fn different_accounts_differ() {
        let seed = test_seed();
        assert_ne!(
            derive_ed25519(&seed, 0, 0).unwrap().secret,
            derive_ed25519(&seed, 1, 0).unwrap().secret
        );
        assert_ne!(
            derive_secp256k1(&seed, 0, 0).unwrap().secret,
            derive_secp256k1(&seed, 1, 0).unwrap().secret
        );
    }

    #[test]
    fn different_indexes_differ() {
        let seed = test_seed();
        assert_ne!(
            derive_ed25519(&seed, 0, 0).unwrap().secret,
            derive_ed25519(&seed, 0, 1).unwrap().secret
        );
    }

    #[test]
    fn schemes_do_not_share_secrets() {
        let seed = test_seed();
        assert_ne!(
            derive_ed25519(&seed, 0, 0).unwrap().secret,
            derive_secp256k1(&seed, 0, 0).unwrap().secret
        );
    }
}
