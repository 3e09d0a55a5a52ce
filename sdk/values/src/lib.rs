//! Veilshare Values
//!
//! The typed value model the masker consumes and produces.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  NamedValues<Value>  ──mask──▶  NamedValues<MaskedValue>      │
//! │       (clear)                      (one bundle per party)     │
//! │                                                               │
//! │  PUBLIC   Integer, UnsignedInteger, Boolean, messages,        │
//! │           signatures, public keys, StoreId ─▶ copied          │
//! │  SECRET   SecretInteger, SecretUnsignedInteger,               │
//! │           SecretBoolean, SecretBlob, private keys ─▶ shared   │
//! │  COMPOSITE Array, Tuple ─▶ element-wise                       │
//! └───────────────────────────────────────────────────────────────┘
//! ```

pub mod classification;
pub mod masked;
pub mod named;
pub mod types;
pub mod value;

pub use classification::ValuesClassification;
pub use masked::{BlobShares, MaskedValue};
pub use named::NamedValues;
pub use types::ValueType;
pub use value::{Signature, Value, ValueError};
