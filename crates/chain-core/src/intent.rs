//! Intent framing and the signing digest.
//!
//! Every payload is framed with a 3-byte intent header before hashing, so a
//! signature over a transaction can never be replayed as a signature over a
//! personal message (and vice versa). The signing digest is BLAKE2b-256 of
//! the framed payload.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// Signing digest width in bytes.
pub const DIGEST_LENGTH: usize = 32;

/// Intent scope: transaction data.
pub const INTENT_SCOPE_TRANSACTION_DATA: u8 = 0x00;
/// Intent version currently in use.
pub const INTENT_VERSION: u8 = 0x00;
/// Application id of the target ledger.
pub const INTENT_APP_ID: u8 = 0x00;

/// Prefix `bytes` with the transaction-data intent header.
pub fn with_intent(bytes: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(3 + bytes.len());
    framed.push(INTENT_SCOPE_TRANSACTION_DATA);
    framed.push(INTENT_VERSION);
    framed.push(INTENT_APP_ID);
    framed.extend_from_slice(bytes);
    framed
}

/// BLAKE2b-256 of `data` — the 32-byte digest every signer signs.
pub fn signing_digest(data: &[u8]) -> [u8; DIGEST_LENGTH] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_header_is_three_zero_bytes() {
        let framed = with_intent(b"payload");
        assert_eq!(&framed[..3], &[0, 0, 0]);
        assert_eq!(&framed[3..], b"payload");
    }

    #[test]
    fn digest_is_32_bytes_and_deterministic() {
        let a = signing_digest(b"same input");
        let b = signing_digest(b"same input");
        assert_eq!(a, b);
        assert_eq!(a.len(), DIGEST_LENGTH);
    }

    #[test]
    fn digest_differs_for_different_input() {
        assert_ne!(signing_digest(b"a"), signing_digest(b"b"));
    }

    #[test]
    fn known_vector_empty_input() {
        // BLAKE2b-256 of the empty string.
        assert_eq!(
            hex::encode(signing_digest(b"")),
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
        );
    }
}
