use bip39::{Language, Mnemonic};

use crate::error::KeystoreError;

/// Check whether `phrase` is a well-formed BIP-39 mnemonic.
pub fn validate_phrase(phrase: &str) -> bool {
    Mnemonic::parse_in_normalized(Language::English, phrase).is_ok()
}

/// Derive the 64-byte seed from a mnemonic and optional passphrase.
/// Caller MUST zeroize the returned seed when done.
pub fn seed_from_phrase(phrase: &str, passphrase: &str) -> Result<Vec<u8>, KeystoreError> {
    let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase)
        .map_err(|e| KeystoreError::InvalidMnemonic(e.to_string()))?;

    Ok(mnemonic.to_seed(passphrase).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    // BIP-39 test vector: "abandon" x11 + "about"
    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn valid_phrase_accepted() {
        assert!(validate_phrase(TEST_MNEMONIC));
    }

    #[test]
    fn invalid_phrase_rejected() {
        assert!(!validate_phrase("definitely not a mnemonic phrase"));
        assert!(!validate_phrase(""));
    }

    #[test]
    fn seed_matches_bip39_vector() {
        // Official BIP-39 test vector (12 words, empty passphrase).
        let seed = seed_from_phrase(TEST_MNEMONIC, "").unwrap();
        assert_eq!(
            hex::encode(&seed),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn passphrase_changes_seed() {
        let plain = seed_from_phrase(TEST_MNEMONIC, "").unwrap();
        let salted = seed_from_phrase(TEST_MNEMONIC, "trezor").unwrap();
        assert_ne!(plain, salted);
    }

    #[test]
    fn bad_phrase_is_an_error() {
        assert!(seed_from_phrase("one two three", "").is_err());
    }
}
