//! Account addresses.
//!
//! An address is 32 raw bytes, displayed as 0x-prefixed hex. It is a pure
//! function of the owning public key: `blake2b_256(scheme_flag || key_bytes)`.
//! Object ids share the same format, so `ObjectRef` reuses this type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChainError;

/// Address width in bytes.
pub const ADDRESS_LENGTH: usize = 32;

/// A 32-byte account or object address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    pub const ZERO: Address = Address([0u8; ADDRESS_LENGTH]);

    pub fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Parse from a hex string, with or without a `0x` prefix.
    ///
    /// Short forms are zero-padded on the left, so `"0x2"` is the framework
    /// address `0x00…02`.
    pub fn from_hex(s: &str) -> Result<Self, ChainError> {
        let s = s.strip_prefix("0x").unwrap_or(s);

        if s.is_empty() || s.len() > ADDRESS_LENGTH * 2 {
            return Err(ChainError::InvalidAddress(format!(
                "expected at most {} hex characters, got {}",
                ADDRESS_LENGTH * 2,
                s.len()
            )));
        }

        let padded = format!("{:0>64}", s);
        let bytes = hex::decode(&padded)
            .map_err(|e| ChainError::InvalidAddress(format!("invalid hex: {e}")))?;

        let mut arr = [0u8; ADDRESS_LENGTH];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Addresses fixed by the ledger itself.
pub mod well_known {
    use super::Address;

    /// The framework package (coin module and friends).
    pub fn framework() -> Address {
        let mut bytes = [0u8; 32];
        bytes[31] = 0x02;
        Address::new(bytes)
    }

    /// The shared clock object consumed by time-gated entry points.
    pub fn clock() -> Address {
        let mut bytes = [0u8; 32];
        bytes[31] = 0x06;
        Address::new(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_form_is_left_padded() {
        let addr = Address::from_hex("0x2").unwrap();
        assert_eq!(addr.as_bytes()[31], 0x02);
        assert!(addr.as_bytes()[..31].iter().all(|&b| b == 0));
    }

    #[test]
    fn roundtrip_full_width() {
        let s = "0x0000000000000000000000000000000000000000000000000000000000000111";
        let addr = Address::from_hex(s).unwrap();
        assert_eq!(addr.to_hex(), s);
    }

    #[test]
    fn prefix_is_optional() {
        let with = Address::from_hex("0xabc").unwrap();
        let without = Address::from_hex("abc").unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn rejects_non_hex() {
        assert!(Address::from_hex("0xzz").is_err());
    }

    #[test]
    fn rejects_overlong() {
        let s = "ff".repeat(33);
        assert!(Address::from_hex(&s).is_err());
    }

    #[test]
    fn rejects_empty() {
        assert!(Address::from_hex("").is_err());
        assert!(Address::from_hex("0x").is_err());
    }

    #[test]
    fn zero_address() {
        assert!(Address::ZERO.is_zero());
        assert!(!well_known::clock().is_zero());
    }

    #[test]
    fn from_str_parses() {
        let addr: Address = "0x6".parse().unwrap();
        assert_eq!(addr, well_known::clock());
    }

    #[test]
    fn display_matches_to_hex() {
        let addr = Address::from_hex("0x111").unwrap();
        assert_eq!(format!("{addr}"), addr.to_hex());
        assert_eq!(addr.to_hex().len(), 66);
    }
}
