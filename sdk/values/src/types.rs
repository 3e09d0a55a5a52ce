//! Value type descriptors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural type of a [`Value`](crate::Value)
///
/// Classification is a property of the type: every instance of a variant
/// is either replicated in clear or split into shares.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Integer,
    UnsignedInteger,
    Boolean,
    SecretInteger,
    SecretUnsignedInteger,
    SecretBoolean,
    SecretBlob,
    Array {
        inner_type: Box<ValueType>,
        size: usize,
    },
    Tuple {
        left_type: Box<ValueType>,
        right_type: Box<ValueType>,
    },
    EcdsaPrivateKey,
    EcdsaDigestMessage,
    EcdsaSignature,
    EcdsaPublicKey,
    EddsaPrivateKey,
    EddsaMessage,
    EddsaSignature,
    EddsaPublicKey,
    StoreId,
}

impl ValueType {
    pub fn new_array(inner_type: ValueType, size: usize) -> Self {
        ValueType::Array {
            inner_type: Box::new(inner_type),
            size,
        }
    }

    pub fn new_tuple(left_type: ValueType, right_type: ValueType) -> Self {
        ValueType::Tuple {
            left_type: Box::new(left_type),
            right_type: Box::new(right_type),
        }
    }

    /// Whether any leaf of this type is split into shares
    pub fn is_secret(&self) -> bool {
        use ValueType::*;
        match self {
            SecretInteger | SecretUnsignedInteger | SecretBoolean | SecretBlob | EcdsaPrivateKey
            | EddsaPrivateKey => true,
            Integer | UnsignedInteger | Boolean | EcdsaDigestMessage | EcdsaSignature
            | EcdsaPublicKey | EddsaMessage | EddsaSignature | EddsaPublicKey | StoreId => false,
            Array { inner_type, .. } => inner_type.is_secret(),
            Tuple {
                left_type,
                right_type,
            } => left_type.is_secret() || right_type.is_secret(),
        }
    }

    /// Whether every leaf of this type is replicated in clear
    pub fn is_public(&self) -> bool {
        !self.is_secret()
    }

    pub fn is_private_key(&self) -> bool {
        matches!(self, ValueType::EcdsaPrivateKey | ValueType::EddsaPrivateKey)
    }

    /// Same variant, ignoring array sizes and inner types
    pub fn same_kind(&self, other: &ValueType) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Array { inner_type, size } => write!(f, "Array<{inner_type}; {size}>"),
            ValueType::Tuple {
                left_type,
                right_type,
            } => write!(f, "Tuple<{left_type}, {right_type}>"),
            leaf => write!(f, "{leaf:?}"),
        }
    }
}
