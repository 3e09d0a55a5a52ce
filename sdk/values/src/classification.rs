//! Storage sizing for a value collection

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

use crate::named::NamedValues;
use crate::value::Value;

/// How many elements of each kind one party stores for a collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuesClassification {
    /// Field-element shares: one per secret scalar, one per blob chunk
    pub shares: u64,
    /// Public leaves, replicated in clear
    pub public: u64,
    pub ecdsa_private_key_shares: u64,
    pub eddsa_private_key_shares: u64,
}

impl ValuesClassification {
    /// Classify every leaf of `values`, splitting blobs into `blob_chunk_size` chunks
    pub fn classify(values: &NamedValues<Value>, blob_chunk_size: usize) -> Self {
        let mut classification = Self::default();
        for (_, value) in values.iter() {
            classification.add_value(value, blob_chunk_size);
        }
        classification
    }

    fn add_value(&mut self, value: &Value, blob_chunk_size: usize) {
        match value {
            Value::SecretInteger(_) | Value::SecretUnsignedInteger(_) | Value::SecretBoolean(_) => {
                self.shares += 1;
            }
            Value::SecretBlob(bytes) => {
                self.shares += bytes.len().div_ceil(blob_chunk_size.max(1)) as u64;
            }
            Value::EcdsaPrivateKey(_) => self.ecdsa_private_key_shares += 1,
            Value::EddsaPrivateKey(_) => self.eddsa_private_key_shares += 1,
            Value::Array { values, .. } => {
                for value in values {
                    self.add_value(value, blob_chunk_size);
                }
            }
            Value::Tuple { left, right } => {
                self.add_value(left, blob_chunk_size);
                self.add_value(right, blob_chunk_size);
            }
            Value::Integer(_)
            | Value::UnsignedInteger(_)
            | Value::Boolean(_)
            | Value::EcdsaDigestMessage(_)
            | Value::EcdsaSignature(_)
            | Value::EcdsaPublicKey(_)
            | Value::EddsaMessage(_)
            | Value::EddsaSignature(_)
            | Value::EddsaPublicKey(_)
            | Value::StoreId(_) => self.public += 1,
        }
    }

    /// Total elements stored per party
    pub fn total(&self) -> u64 {
        self.shares + self.public + self.ecdsa_private_key_shares + self.eddsa_private_key_shares
    }
}

impl AddAssign for ValuesClassification {
    fn add_assign(&mut self, other: Self) {
        self.shares += other.shares;
        self.public += other.public;
        self.ecdsa_private_key_shares += other.ecdsa_private_key_shares;
        self.eddsa_private_key_shares += other.eddsa_private_key_shares;
    }
}
