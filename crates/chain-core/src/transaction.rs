//! Transaction payloads and their deterministic wire encoding.
//!
//! Every administrative operation in this workspace is a single Move-style
//! call: a target `package::module::function`, optional type arguments, and
//! a list of arguments that are either owned/shared object references or
//! pre-encoded pure values. The wire format is hand-rolled and
//! deterministic — same payload, same bytes — because the bytes are what
//! gets signed.
//!
//! Variable-length sequences (names, type arguments, argument lists, pure
//! byte vectors) are ULEB128 length-prefixed. Scalars are fixed-width
//! little-endian.

use crate::address::Address;
use crate::error::SignError;
use crate::intent::with_intent;
use crate::signature::SerializedSignature;
use crate::signer::Signer;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// A reference to an on-chain object: id, version, and content digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectRef {
    pub id: Address,
    pub version: u64,
    pub digest: [u8; 32],
}

impl ObjectRef {
    pub fn new(id: Address, version: u64, digest: [u8; 32]) -> Self {
        Self {
            id,
            version,
            digest,
        }
    }
}

/// One argument to a Move call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArg {
    /// An object passed by reference.
    Object(ObjectRef),
    /// A pure value, already encoded (see [`pure`]).
    Pure(Vec<u8>),
}

/// Encoders for pure call arguments.
pub mod pure {
    use super::put_uleb128;
    use crate::address::Address;

    /// A `u64` argument: 8 bytes little-endian.
    pub fn u64(value: u64) -> Vec<u8> {
        value.to_le_bytes().to_vec()
    }

    /// An `address` argument: the raw 32 bytes.
    pub fn address(value: &Address) -> Vec<u8> {
        value.as_bytes().to_vec()
    }

    /// A `vector<u8>` argument: ULEB128 length, then the bytes.
    pub fn bytes(value: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(value.len() + 2);
        put_uleb128(&mut out, value.len() as u64);
        out.extend_from_slice(value);
        out
    }

    /// A `vector<u64>` argument: ULEB128 length, then little-endian elements.
    pub fn u64_vec(values: &[u64]) -> Vec<u8> {
        let mut out = Vec::with_capacity(values.len() * 8 + 2);
        put_uleb128(&mut out, values.len() as u64);
        for value in values {
            out.extend_from_slice(&value.to_le_bytes());
        }
        out
    }
}

/// A call target plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCall {
    pub package: Address,
    pub module: String,
    pub function: String,
    pub type_args: Vec<String>,
    pub args: Vec<CallArg>,
}

impl MoveCall {
    pub fn new(package: Address, module: &str, function: &str) -> Self {
        Self {
            package,
            module: module.to_string(),
            function: function.to_string(),
            type_args: Vec::new(),
            args: Vec::new(),
        }
    }

    pub fn type_arg(mut self, type_arg: impl Into<String>) -> Self {
        self.type_args.push(type_arg.into());
        self
    }

    pub fn object(mut self, object: ObjectRef) -> Self {
        self.args.push(CallArg::Object(object));
        self
    }

    pub fn pure(mut self, bytes: Vec<u8>) -> Self {
        self.args.push(CallArg::Pure(bytes));
        self
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.package.as_bytes());
        put_str(out, &self.module);
        put_str(out, &self.function);

        put_uleb128(out, self.type_args.len() as u64);
        for type_arg in &self.type_args {
            put_str(out, type_arg);
        }

        put_uleb128(out, self.args.len() as u64);
        for arg in &self.args {
            match arg {
                CallArg::Object(object) => {
                    out.push(0x00);
                    put_object_ref(out, object);
                }
                CallArg::Pure(bytes) => {
                    out.push(0x01);
                    put_uleb128(out, bytes.len() as u64);
                    out.extend_from_slice(bytes);
                }
            }
        }
    }
}

/// An unsigned transaction: sender, one call, and gas data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionData {
    pub sender: Address,
    pub call: MoveCall,
    pub gas_payment: ObjectRef,
    pub gas_budget: u64,
    pub gas_price: u64,
    pub expiration_epoch: Option<u64>,
}

impl TransactionData {
    pub fn new(
        sender: Address,
        call: MoveCall,
        gas_payment: ObjectRef,
        gas_budget: u64,
        gas_price: u64,
    ) -> Self {
        Self {
            sender,
            call,
            gas_payment,
            gas_budget,
            gas_price,
            expiration_epoch: None,
        }
    }

    /// Serialize the transaction payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();

        // Format version.
        out.push(0x00);

        out.extend_from_slice(self.sender.as_bytes());
        self.call.encode_into(&mut out);

        put_object_ref(&mut out, &self.gas_payment);
        out.extend_from_slice(&self.gas_budget.to_le_bytes());
        out.extend_from_slice(&self.gas_price.to_le_bytes());

        match self.expiration_epoch {
            Some(epoch) => {
                out.push(0x01);
                out.extend_from_slice(&epoch.to_le_bytes());
            }
            None => out.push(0x00),
        }

        out
    }

    /// The bytes a signer signs: intent header plus the payload.
    pub fn signing_message(&self) -> Vec<u8> {
        with_intent(&self.to_bytes())
    }

    /// Sign with the given capability and attach the envelope.
    pub async fn sign(&self, signer: &dyn Signer) -> Result<SignedTransaction, SignError> {
        let signature = signer.sign_data(&self.signing_message()).await?;
        Ok(SignedTransaction {
            tx_bytes: self.to_bytes(),
            signature,
        })
    }
}

/// A transaction payload with its signature, ready for submission.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    pub tx_bytes: Vec<u8>,
    pub signature: SerializedSignature,
}

impl SignedTransaction {
    /// Base64 payload for the submission endpoint.
    pub fn tx_base64(&self) -> String {
        BASE64.encode(&self.tx_bytes)
    }

    /// Base64 signature envelope for the submission endpoint.
    pub fn signature_base64(&self) -> String {
        self.signature.to_base64()
    }
}

fn put_object_ref(out: &mut Vec<u8>, object: &ObjectRef) {
    out.extend_from_slice(object.id.as_bytes());
    out.extend_from_slice(&object.version.to_le_bytes());
    out.extend_from_slice(&object.digest);
}

fn put_str(out: &mut Vec<u8>, s: &str) {
    put_uleb128(out, s.len() as u64);
    out.extend_from_slice(s.as_bytes());
}

/// ULEB128: 7 bits per byte, low bits first, high bit marks continuation.
pub(crate) fn put_uleb128(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if value == 0 {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::well_known;
    use crate::error::SignError;
    use crate::intent::signing_digest;
    use crate::signature::{PublicKey, Scheme};
    use async_trait::async_trait;
    use ed25519_dalek::Signer as _;

    fn uleb(value: u64) -> Vec<u8> {
        let mut out = Vec::new();
        put_uleb128(&mut out, value);
        out
    }

    #[test]
    fn uleb128_known_values() {
        assert_eq!(uleb(0), vec![0x00]);
        assert_eq!(uleb(1), vec![0x01]);
        assert_eq!(uleb(127), vec![0x7f]);
        assert_eq!(uleb(128), vec![0x80, 0x01]);
        assert_eq!(uleb(300), vec![0xac, 0x02]);
        assert_eq!(uleb(16_384), vec![0x80, 0x80, 0x01]);
    }

    fn gas() -> ObjectRef {
        ObjectRef::new(Address::from_hex("0xaa").unwrap(), 7, [0x33; 32])
    }

    fn sample_tx() -> TransactionData {
        let call = MoveCall::new(Address::from_hex("0xc0ffee").unwrap(), "game", "withdraw")
            .object(ObjectRef::new(well_known::clock(), 1, [0u8; 32]))
            .pure(pure::u64(1_000));
        TransactionData::new(Address::from_hex("0x111").unwrap(), call, gas(), 10_000_000, 1_000)
    }

    #[test]
    fn encoding_is_deterministic() {
        assert_eq!(sample_tx().to_bytes(), sample_tx().to_bytes());
    }

    #[test]
    fn encoding_starts_with_version_and_sender() {
        let tx = sample_tx();
        let bytes = tx.to_bytes();
        assert_eq!(bytes[0], 0x00);
        assert_eq!(&bytes[1..33], tx.sender.as_bytes());
    }

    #[test]
    fn different_arguments_change_encoding() {
        let a = sample_tx();
        let mut b = sample_tx();
        *b.call.args.last_mut().unwrap() = CallArg::Pure(pure::u64(2_000));
        assert_ne!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn expiration_changes_encoding() {
        let a = sample_tx();
        let mut b = sample_tx();
        b.expiration_epoch = Some(99);
        assert_eq!(b.to_bytes().len(), a.to_bytes().len() + 8);
        assert_ne!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn signing_message_is_intent_framed() {
        let tx = sample_tx();
        let message = tx.signing_message();
        assert_eq!(&message[..3], &[0, 0, 0]);
        assert_eq!(&message[3..], &tx.to_bytes()[..]);
    }

    #[test]
    fn pure_u64_is_little_endian() {
        assert_eq!(pure::u64(1), vec![1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn pure_bytes_is_length_prefixed() {
        let encoded = pure::bytes(&[0xaa; 300]);
        assert_eq!(&encoded[..2], &[0xac, 0x02]);
        assert_eq!(encoded.len(), 302);
    }

    #[test]
    fn pure_u64_vec_layout() {
        let encoded = pure::u64_vec(&[1, 2]);
        assert_eq!(encoded[0], 2);
        assert_eq!(&encoded[1..9], &[1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&encoded[9..17], &[2, 0, 0, 0, 0, 0, 0, 0]);
    }

    /// Minimal in-test signer: Ed25519 over the BLAKE2b-256 digest.
    struct TestSigner {
        key: ed25519_dalek::SigningKey,
    }

    #[async_trait]
    impl crate::signer::Signer for TestSigner {
        fn scheme(&self) -> Scheme {
            Scheme::Ed25519
        }

        async fn public_key(&self) -> Result<PublicKey, SignError> {
            Ok(PublicKey::Ed25519(self.key.verifying_key().to_bytes()))
        }

        async fn sign_data(&self, data: &[u8]) -> Result<SerializedSignature, SignError> {
            let digest = signing_digest(data);
            let signature = self.key.sign(&digest);
            Ok(SerializedSignature::new(
                signature.to_bytes(),
                PublicKey::Ed25519(self.key.verifying_key().to_bytes()),
            ))
        }
    }

    #[tokio::test]
    async fn signed_transaction_verifies() {
        use ed25519_dalek::{Signature, Verifier, VerifyingKey};

        let signer = TestSigner {
            key: ed25519_dalek::SigningKey::from_bytes(&[0x41; 32]),
        };
        let tx = sample_tx();
        let signed = tx.sign(&signer).await.unwrap();

        assert_eq!(signed.tx_bytes, tx.to_bytes());
        assert_eq!(signed.signature.scheme(), Scheme::Ed25519);

        let digest = signing_digest(&tx.signing_message());
        let verifying = VerifyingKey::from_bytes(
            signed.signature.public_key().as_bytes().try_into().unwrap(),
        )
        .unwrap();
        let signature = Signature::from_bytes(signed.signature.signature());
        assert!(verifying.verify(&digest, &signature).is_ok());
    }

    #[tokio::test]
    async fn base64_outputs_decode() {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine as _;

        let signer = TestSigner {
            key: ed25519_dalek::SigningKey::from_bytes(&[0x42; 32]),
        };
        let signed = sample_tx().sign(&signer).await.unwrap();
        assert_eq!(
            STANDARD.decode(signed.tx_base64()).unwrap(),
            signed.tx_bytes
        );
        assert_eq!(
            STANDARD.decode(signed.signature_base64()).unwrap(),
            signed.signature.to_bytes()
        );
    }
}
