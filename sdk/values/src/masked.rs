//! Masked values
//!
//! The per-party form of a [`Value`](crate::Value). Public leaves travel in
//! clear; secret leaves carry this party's share.

use num_bigint::{BigInt, BigUint};
use serde::{Deserialize, Serialize};
use veilshare_field::FieldElement;

use crate::types::ValueType;
use crate::value::{
    ECDSA_DIGEST_SIZE, ECDSA_PUBLIC_KEY_SIZE, EDDSA_PUBLIC_KEY_SIZE, STORE_ID_SIZE, Signature,
    Value,
};

/// One party's shares of a blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobShares {
    /// One share per chunk, in chunk order
    pub chunks: Vec<FieldElement>,
    /// Length of the blob before chunking
    pub original_size: u64,
}

/// A value as held by a single party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaskedValue {
    Integer(BigInt),
    UnsignedInteger(BigUint),
    Boolean(bool),
    SecretInteger(FieldElement),
    SecretUnsignedInteger(FieldElement),
    SecretBoolean(FieldElement),
    SecretBlob(BlobShares),
    Array {
        inner_type: ValueType,
        values: Vec<MaskedValue>,
    },
    Tuple {
        left: Box<MaskedValue>,
        right: Box<MaskedValue>,
    },
    EcdsaPrivateKey(FieldElement),
    EcdsaDigestMessage(#[serde(with = "serde_bytes")] [u8; ECDSA_DIGEST_SIZE]),
    EcdsaSignature(Signature),
    EcdsaPublicKey(#[serde(with = "serde_bytes")] [u8; ECDSA_PUBLIC_KEY_SIZE]),
    EddsaPrivateKey(FieldElement),
    EddsaMessage(#[serde(with = "serde_bytes")] Vec<u8>),
    EddsaSignature(Signature),
    EddsaPublicKey(#[serde(with = "serde_bytes")] [u8; EDDSA_PUBLIC_KEY_SIZE]),
    StoreId(#[serde(with = "serde_bytes")] [u8; STORE_ID_SIZE]),
}

impl MaskedValue {
    pub fn new_tuple(left: MaskedValue, right: MaskedValue) -> Self {
        MaskedValue::Tuple {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Clear copy of a public leaf; `None` for secret or composite values
    pub fn from_public(value: &Value) -> Option<Self> {
        let masked = match value {
            Value::Integer(v) => MaskedValue::Integer(v.clone()),
            Value::UnsignedInteger(v) => MaskedValue::UnsignedInteger(v.clone()),
            Value::Boolean(v) => MaskedValue::Boolean(*v),
            Value::EcdsaDigestMessage(v) => MaskedValue::EcdsaDigestMessage(*v),
            Value::EcdsaSignature(v) => MaskedValue::EcdsaSignature(v.clone()),
            Value::EcdsaPublicKey(v) => MaskedValue::EcdsaPublicKey(*v),
            Value::EddsaMessage(v) => MaskedValue::EddsaMessage(v.clone()),
            Value::EddsaSignature(v) => MaskedValue::EddsaSignature(v.clone()),
            Value::EddsaPublicKey(v) => MaskedValue::EddsaPublicKey(*v),
            Value::StoreId(v) => MaskedValue::StoreId(*v),
            Value::SecretInteger(_)
            | Value::SecretUnsignedInteger(_)
            | Value::SecretBoolean(_)
            | Value::SecretBlob(_)
            | Value::EcdsaPrivateKey(_)
            | Value::EddsaPrivateKey(_)
            | Value::Array { .. }
            | Value::Tuple { .. } => return None,
        };
        Some(masked)
    }

    /// Inverse of [`from_public`](Self::from_public)
    pub fn to_public_value(&self) -> Option<Value> {
        let value = match self {
            MaskedValue::Integer(v) => Value::Integer(v.clone()),
            MaskedValue::UnsignedInteger(v) => Value::UnsignedInteger(v.clone()),
            MaskedValue::Boolean(v) => Value::Boolean(*v),
            MaskedValue::EcdsaDigestMessage(v) => Value::EcdsaDigestMessage(*v),
            MaskedValue::EcdsaSignature(v) => Value::EcdsaSignature(v.clone()),
            MaskedValue::EcdsaPublicKey(v) => Value::EcdsaPublicKey(*v),
            MaskedValue::EddsaMessage(v) => Value::EddsaMessage(v.clone()),
            MaskedValue::EddsaSignature(v) => Value::EddsaSignature(v.clone()),
            MaskedValue::EddsaPublicKey(v) => Value::EddsaPublicKey(*v),
            MaskedValue::StoreId(v) => Value::StoreId(*v),
            MaskedValue::SecretInteger(_)
            | MaskedValue::SecretUnsignedInteger(_)
            | MaskedValue::SecretBoolean(_)
            | MaskedValue::SecretBlob(_)
            | MaskedValue::EcdsaPrivateKey(_)
            | MaskedValue::EddsaPrivateKey(_)
            | MaskedValue::Array { .. }
            | MaskedValue::Tuple { .. } => return None,
        };
        Some(value)
    }

    /// Type of the clear value this share was produced from
    pub fn to_type(&self) -> ValueType {
        match self {
            MaskedValue::Integer(_) => ValueType::Integer,
            MaskedValue::UnsignedInteger(_) => ValueType::UnsignedInteger,
            MaskedValue::Boolean(_) => ValueType::Boolean,
            MaskedValue::SecretInteger(_) => ValueType::SecretInteger,
            MaskedValue::SecretUnsignedInteger(_) => ValueType::SecretUnsignedInteger,
            MaskedValue::SecretBoolean(_) => ValueType::SecretBoolean,
            MaskedValue::SecretBlob(_) => ValueType::SecretBlob,
            MaskedValue::Array { inner_type, values } => {
                ValueType::new_array(inner_type.clone(), values.len())
            }
            MaskedValue::Tuple { left, right } => {
                ValueType::new_tuple(left.to_type(), right.to_type())
            }
            MaskedValue::EcdsaPrivateKey(_) => ValueType::EcdsaPrivateKey,
            MaskedValue::EcdsaDigestMessage(_) => ValueType::EcdsaDigestMessage,
            MaskedValue::EcdsaSignature(_) => ValueType::EcdsaSignature,
            MaskedValue::EcdsaPublicKey(_) => ValueType::EcdsaPublicKey,
            MaskedValue::EddsaPrivateKey(_) => ValueType::EddsaPrivateKey,
            MaskedValue::EddsaMessage(_) => ValueType::EddsaMessage,
            MaskedValue::EddsaSignature(_) => ValueType::EddsaSignature,
            MaskedValue::EddsaPublicKey(_) => ValueType::EddsaPublicKey,
            MaskedValue::StoreId(_) => ValueType::StoreId,
        }
    }
}
