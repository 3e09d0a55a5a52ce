//! Clear values
//!
//! A [`Value`] is what the caller masks and what unmasking gives back. Its
//! constructors enforce the invariants the masker relies on: arrays are
//! homogeneous and private keys are nonzero.

use num_bigint::{BigInt, BigUint};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use veilshare_field::encoding::SCALAR_SIZE;

use crate::types::ValueType;

/// Compressed secp256k1 point length
pub const ECDSA_PUBLIC_KEY_SIZE: usize = 33;
pub const EDDSA_PUBLIC_KEY_SIZE: usize = 32;
pub const ECDSA_DIGEST_SIZE: usize = 32;
pub const STORE_ID_SIZE: usize = 16;

/// Value construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("array element {index} has type {found}, expected {expected}")]
    ArrayTypeMismatch {
        index: usize,
        expected: ValueType,
        found: ValueType,
    },

    #[error("private key is zero")]
    ZeroPrivateKey,

    #[error("{kind} must be exactly {expected} bytes long, got {got}")]
    InvalidLength {
        kind: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("signature component {0} is zero")]
    ZeroSignatureComponent(&'static str),
}

/// Signature `(r, s)` pair, each a big-endian integer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    #[serde(with = "serde_bytes")]
    pub r: Vec<u8>,
    #[serde(with = "serde_bytes")]
    pub s: Vec<u8>,
}

impl Signature {
    /// Build a signature; neither component may be zero
    pub fn new(r: Vec<u8>, s: Vec<u8>) -> Result<Self, ValueError> {
        if is_zero(&r) {
            return Err(ValueError::ZeroSignatureComponent("r"));
        }
        if is_zero(&s) {
            return Err(ValueError::ZeroSignatureComponent("s"));
        }
        Ok(Self { r, s })
    }
}

/// A clear value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Integer(BigInt),
    UnsignedInteger(BigUint),
    Boolean(bool),
    SecretInteger(BigInt),
    SecretUnsignedInteger(BigUint),
    SecretBoolean(bool),
    SecretBlob(#[serde(with = "serde_bytes")] Vec<u8>),
    Array {
        inner_type: ValueType,
        values: Vec<Value>,
    },
    Tuple {
        left: Box<Value>,
        right: Box<Value>,
    },
    EcdsaPrivateKey(#[serde(with = "serde_bytes")] [u8; SCALAR_SIZE]),
    EcdsaDigestMessage(#[serde(with = "serde_bytes")] [u8; ECDSA_DIGEST_SIZE]),
    EcdsaSignature(Signature),
    EcdsaPublicKey(#[serde(with = "serde_bytes")] [u8; ECDSA_PUBLIC_KEY_SIZE]),
    EddsaPrivateKey(#[serde(with = "serde_bytes")] [u8; SCALAR_SIZE]),
    EddsaMessage(#[serde(with = "serde_bytes")] Vec<u8>),
    EddsaSignature(Signature),
    EddsaPublicKey(#[serde(with = "serde_bytes")] [u8; EDDSA_PUBLIC_KEY_SIZE]),
    StoreId(#[serde(with = "serde_bytes")] [u8; STORE_ID_SIZE]),
}

impl Value {
    /// Build an array whose elements all have `inner_type`
    pub fn new_array(inner_type: ValueType, values: Vec<Value>) -> Result<Self, ValueError> {
        for (index, value) in values.iter().enumerate() {
            let found = value.to_type();
            if found != inner_type {
                return Err(ValueError::ArrayTypeMismatch {
                    index,
                    expected: inner_type,
                    found,
                });
            }
        }
        Ok(Value::Array { inner_type, values })
    }

    pub fn new_tuple(left: Value, right: Value) -> Self {
        Value::Tuple {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn new_ecdsa_private_key(bytes: [u8; SCALAR_SIZE]) -> Result<Self, ValueError> {
        if is_zero(&bytes) {
            return Err(ValueError::ZeroPrivateKey);
        }
        Ok(Value::EcdsaPrivateKey(bytes))
    }

    pub fn new_eddsa_private_key(bytes: [u8; SCALAR_SIZE]) -> Result<Self, ValueError> {
        if is_zero(&bytes) {
            return Err(ValueError::ZeroPrivateKey);
        }
        Ok(Value::EddsaPrivateKey(bytes))
    }

    pub fn ecdsa_private_key_from_slice(bytes: &[u8]) -> Result<Self, ValueError> {
        Self::new_ecdsa_private_key(fixed(bytes, "ecdsa private key")?)
    }

    pub fn eddsa_private_key_from_slice(bytes: &[u8]) -> Result<Self, ValueError> {
        Self::new_eddsa_private_key(fixed(bytes, "eddsa private key")?)
    }

    pub fn ecdsa_digest_message_from_slice(bytes: &[u8]) -> Result<Self, ValueError> {
        fixed(bytes, "ecdsa digest message").map(Value::EcdsaDigestMessage)
    }

    pub fn ecdsa_public_key_from_slice(bytes: &[u8]) -> Result<Self, ValueError> {
        fixed(bytes, "ecdsa public key").map(Value::EcdsaPublicKey)
    }

    pub fn eddsa_public_key_from_slice(bytes: &[u8]) -> Result<Self, ValueError> {
        fixed(bytes, "eddsa public key").map(Value::EddsaPublicKey)
    }

    pub fn store_id_from_slice(bytes: &[u8]) -> Result<Self, ValueError> {
        fixed(bytes, "store id").map(Value::StoreId)
    }

    pub fn new_ecdsa_signature(r: Vec<u8>, s: Vec<u8>) -> Result<Self, ValueError> {
        Signature::new(r, s).map(Value::EcdsaSignature)
    }

    pub fn new_eddsa_signature(r: Vec<u8>, s: Vec<u8>) -> Result<Self, ValueError> {
        Signature::new(r, s).map(Value::EddsaSignature)
    }

    /// Structural type of this value
    pub fn to_type(&self) -> ValueType {
        match self {
            Value::Integer(_) => ValueType::Integer,
            Value::UnsignedInteger(_) => ValueType::UnsignedInteger,
            Value::Boolean(_) => ValueType::Boolean,
            Value::SecretInteger(_) => ValueType::SecretInteger,
            Value::SecretUnsignedInteger(_) => ValueType::SecretUnsignedInteger,
            Value::SecretBoolean(_) => ValueType::SecretBoolean,
            Value::SecretBlob(_) => ValueType::SecretBlob,
            Value::Array { inner_type, values } => {
                ValueType::new_array(inner_type.clone(), values.len())
            }
            Value::Tuple { left, right } => ValueType::new_tuple(left.to_type(), right.to_type()),
            Value::EcdsaPrivateKey(_) => ValueType::EcdsaPrivateKey,
            Value::EcdsaDigestMessage(_) => ValueType::EcdsaDigestMessage,
            Value::EcdsaSignature(_) => ValueType::EcdsaSignature,
            Value::EcdsaPublicKey(_) => ValueType::EcdsaPublicKey,
            Value::EddsaPrivateKey(_) => ValueType::EddsaPrivateKey,
            Value::EddsaMessage(_) => ValueType::EddsaMessage,
            Value::EddsaSignature(_) => ValueType::EddsaSignature,
            Value::EddsaPublicKey(_) => ValueType::EddsaPublicKey,
            Value::StoreId(_) => ValueType::StoreId,
        }
    }

    pub fn is_secret(&self) -> bool {
        self.to_type().is_secret()
    }

    pub fn is_public(&self) -> bool {
        !self.is_secret()
    }
}

fn is_zero(bytes: &[u8]) -> bool {
    bytes.iter().all(|b| *b == 0)
}

fn fixed<const N: usize>(bytes: &[u8], kind: &'static str) -> Result<[u8; N], ValueError> {
    bytes.try_into().map_err(|_| ValueError::InvalidLength {
        kind,
        expected: N,
        got: bytes.len(),
    })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "Integer({v})"),
            Value::UnsignedInteger(v) => write!(f, "UnsignedInteger({v})"),
            Value::Boolean(v) => write!(f, "Boolean({v})"),
            Value::SecretInteger(v) => write!(f, "SecretInteger({v})"),
            Value::SecretUnsignedInteger(v) => write!(f, "SecretUnsignedInteger({v})"),
            Value::SecretBoolean(v) => write!(f, "SecretBoolean({v})"),
            Value::SecretBlob(bytes) => write!(f, "SecretBlob({})", hex::encode(bytes)),
            Value::Array { values, .. } => {
                f.write_str("Array(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str(")")
            }
            Value::Tuple { left, right } => write!(f, "Tuple({left}, {right})"),
            // Key material never goes through Display
            Value::EcdsaPrivateKey(_) => f.write_str("EcdsaPrivateKey(..)"),
            Value::EddsaPrivateKey(_) => f.write_str("EddsaPrivateKey(..)"),
            Value::EcdsaDigestMessage(bytes) => {
                write!(f, "EcdsaDigestMessage({})", hex::encode(bytes))
            }
            Value::EcdsaSignature(sig) => write!(
                f,
                "EcdsaSignature(r={}, s={})",
                hex::encode(&sig.r),
                hex::encode(&sig.s)
            ),
            Value::EcdsaPublicKey(bytes) => write!(f, "EcdsaPublicKey({})", hex::encode(bytes)),
            Value::EddsaMessage(bytes) => write!(f, "EddsaMessage({})", hex::encode(bytes)),
            Value::EddsaSignature(sig) => write!(
                f,
                "EddsaSignature(r={}, s={})",
                hex::encode(&sig.r),
                hex::encode(&sig.s)
            ),
            Value::EddsaPublicKey(bytes) => write!(f, "EddsaPublicKey({})", hex::encode(bytes)),
            Value::StoreId(bytes) => write!(f, "StoreId({})", hex::encode(bytes)),
        }
    }
}
