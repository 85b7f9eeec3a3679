//! DER-to-ledger adaptation of service responses.
//!
//! KMS returns ECDSA signatures as ASN.1 DER and does not guarantee a
//! canonical `s`; the on-chain verifier only accepts the compact 64-byte
//! `r || s` form with `s ≤ n/2`. Public keys come back as an SPKI document
//! wrapping an uncompressed curve point; the envelope wants the 33-byte
//! compressed SEC1 encoding.

use k256::ecdsa::{Signature, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::pkcs8::DecodePublicKey;

use crate::error::KmsError;

/// Parse a DER ECDSA signature into the fixed 64-byte `r || s` form,
/// replacing a high `s` with `n − s`.
///
/// Normalization is idempotent: feeding an already-canonical signature
/// through again yields the same bytes.
pub fn compact_signature_from_der(der: &[u8]) -> Result<[u8; 64], KmsError> {
    let signature =
        Signature::from_der(der).map_err(|e| KmsError::ParseSignature(e.to_string()))?;
    let signature = signature.normalize_s().unwrap_or(signature);

    let mut out = [0u8; 64];
    out.copy_from_slice(&signature.to_bytes());
    Ok(out)
}

/// Parse an SPKI public-key document into the 33-byte compressed SEC1 point.
pub fn compressed_public_key_from_der(der: &[u8]) -> Result<[u8; 33], KmsError> {
    let verifying = VerifyingKey::from_public_key_der(der)
        .map_err(|e| KmsError::ParsePublicKey(e.to_string()))?;

    let point = verifying.to_encoded_point(true);
    point
        .as_bytes()
        .try_into()
        .map_err(|_| KmsError::ParsePublicKey("unexpected point length".into()))
}
