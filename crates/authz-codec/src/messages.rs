//! The fixed message schemas, one per verifier entry point.
//!
//! Each schema is a distinct, versioned-by-convention field layout; there
//! is no negotiation and no shared envelope. Changing a field's position or
//! width here without changing the on-chain verifier in lockstep produces
//! signatures that silently fail verification, which is why each type pins
//! its layout with a decoder and the tests pin it with hex fixtures.

use chain_core::Address;

use crate::codec::{MessageReader, MessageWriter};
use crate::error::CodecError;

/// Grant for a signature-gated mint.
///
/// Layout: `recipient(32) || amount(8) || expire_at(8) || salt(8)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintGrant {
    pub recipient: Address,
    pub amount: u64,
    pub expire_at: u64,
    pub salt: u64,
}

impl MintGrant {
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = MessageWriter::new();
        writer
            .put_address(&self.recipient)
            .put_u64(self.amount)
            .put_u64(self.expire_at)
            .put_u64(self.salt);
        writer.finish()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut reader = MessageReader::new(bytes);
        let grant = Self {
            recipient: reader.take_address("recipient")?,
            amount: reader.take_u64("amount")?,
            expire_at: reader.take_u64("expire_at")?,
            salt: reader.take_u64("salt")?,
        };
        reader.expect_end()?;
        Ok(grant)
    }

    pub fn encoded_len(&self) -> usize {
        32 + 8 * 3
    }
}

/// Scalar token withdrawal against the treasury counter.
///
/// Layout: `recipient(32) || amount(8) || expire_at(8) || salt(8) ||
/// fee(8) || chain_id(8) || package(32)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenWithdrawal {
    pub recipient: Address,
    pub amount: u64,
    pub expire_at: u64,
    pub salt: u64,
    pub fee: u64,
    pub chain_id: u64,
    pub package: Address,
}

impl TokenWithdrawal {
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = MessageWriter::new();
        writer
            .put_address(&self.recipient)
            .put_u64(self.amount)
            .put_u64(self.expire_at)
            .put_u64(self.salt)
            .put_u64(self.fee)
            .put_u64(self.chain_id)
            .put_address(&self.package);
        writer.finish()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut reader = MessageReader::new(bytes);
        let withdrawal = Self {
            recipient: reader.take_address("recipient")?,
            amount: reader.take_u64("amount")?,
            expire_at: reader.take_u64("expire_at")?,
            salt: reader.take_u64("salt")?,
            fee: reader.take_u64("fee")?,
            chain_id: reader.take_u64("chain_id")?,
            package: reader.take_address("package")?,
        };
        reader.expect_end()?;
        Ok(withdrawal)
    }

    pub fn encoded_len(&self) -> usize {
        32 + 8 * 5 + 32
    }
}

/// Batch gacha-token withdrawal: parallel token-type and amount arrays.
///
/// Layout: `recipient(32) || token_types(8 + 8n) || amounts(8 + 8n) ||
/// expire_at(8) || salt(8) || chain_id(8) || package(32)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GachaWithdrawal {
    pub recipient: Address,
    pub token_types: Vec<u64>,
    pub amounts: Vec<u64>,
    pub expire_at: u64,
    pub salt: u64,
    pub chain_id: u64,
    pub package: Address,
}

impl GachaWithdrawal {
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = MessageWriter::new();
        writer
            .put_address(&self.recipient)
            .put_u64_array(&self.token_types)
            .put_u64_array(&self.amounts)
            .put_u64(self.expire_at)
            .put_u64(self.salt)
            .put_u64(self.chain_id)
            .put_address(&self.package);
        writer.finish()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut reader = MessageReader::new(bytes);
        let withdrawal = Self {
            recipient: reader.take_address("recipient")?,
            token_types: reader.take_u64_array("token_types")?,
            amounts: reader.take_u64_array("amounts")?,
            expire_at: reader.take_u64("expire_at")?,
            salt: reader.take_u64("salt")?,
            chain_id: reader.take_u64("chain_id")?,
            package: reader.take_address("package")?,
        };
        reader.expect_end()?;
        Ok(withdrawal)
    }

    pub fn encoded_len(&self) -> usize {
        32 + (8 + 8 * self.token_types.len()) + (8 + 8 * self.amounts.len()) + 8 * 3 + 32
    }
}
