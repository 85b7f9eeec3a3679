//! Field-level primitives shared by every message schema.
//!
//! Three field types exist: a 32-byte address (raw bytes), a u64 (8 bytes
//! little-endian), and a u64 array (u64 element count, then elements).
//! There are no delimiters and no tags; widths alone disambiguate.

use chain_core::{Address, ADDRESS_LENGTH};

use crate::error::CodecError;

/// Appends fields in schema order.
#[derive(Default)]
pub struct MessageWriter {
    buf: Vec<u8>,
}

impl MessageWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_address(&mut self, address: &Address) -> &mut Self {
        self.buf.extend_from_slice(address.as_bytes());
        self
    }

    pub fn put_u64(&mut self, value: u64) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn put_u64_array(&mut self, values: &[u64]) -> &mut Self {
        self.put_u64(values.len() as u64);
        for value in values {
            self.put_u64(*value);
        }
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Consumes fields in schema order; every read names its field so a
/// truncation error points at the divergence.
pub struct MessageReader<'a> {
    bytes: &'a [u8],
}

impl<'a> MessageReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn take_address(&mut self, field: &'static str) -> Result<Address, CodecError> {
        if self.bytes.len() < ADDRESS_LENGTH {
            return Err(CodecError::Truncated(field));
        }
        let (head, rest) = self.bytes.split_at(ADDRESS_LENGTH);
        self.bytes = rest;

        let mut arr = [0u8; ADDRESS_LENGTH];
        arr.copy_from_slice(head);
        Ok(Address::new(arr))
    }

    pub fn take_u64(&mut self, field: &'static str) -> Result<u64, CodecError> {
        if self.bytes.len() < 8 {
            return Err(CodecError::Truncated(field));
        }
        let (head, rest) = self.bytes.split_at(8);
        self.bytes = rest;

        Ok(u64::from_le_bytes(head.try_into().expect("split_at(8)")))
    }

    pub fn take_u64_array(&mut self, field: &'static str) -> Result<Vec<u64>, CodecError> {
        let length = self.take_u64(field)?;

        // The length is attacker-controlled input; bound it by what the
        // buffer could actually hold before allocating.
        if length.checked_mul(8).map_or(true, |needed| {
            needed > self.bytes.len() as u64
        }) {
            return Err(CodecError::LengthOverflow { field, length });
        }

        let mut values = Vec::with_capacity(length as usize);
        for _ in 0..length {
            values.push(self.take_u64(field)?);
        }
        Ok(values)
    }

    /// The schema must account for every byte.
    pub fn expect_end(&self) -> Result<(), CodecError> {
        if self.bytes.is_empty() {
            Ok(())
        } else {
            Err(CodecError::TrailingBytes(self.bytes.len()))
        }
    }
}
