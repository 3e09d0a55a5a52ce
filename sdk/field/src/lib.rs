//! Veilshare Field Arithmetic
//!
//! Modular arithmetic over the fixed safe primes used for secret sharing,
//! plus the encodings that map integers, booleans, byte chunks and key
//! scalars into field elements and back.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  SafePrime::U64 / U128 / U256 ──▶ PrimeField (mod p)         │
//! │                                                              │
//! │  signed:   v >= 0 ─▶ v         v < 0 ─▶ p - |v|              │
//! │            r <= (p-1)/2 ─▶ r   r > (p-1)/2 ─▶ r - p          │
//! │  blob:     (bits(p) - 1) / 8 byte little-endian chunks       │
//! │  keys:     32-byte big-endian scalar, 0 < k < modulus        │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod encoding;
pub mod field;
pub mod prime;

pub use field::{FieldElement, FieldError, PrimeField};
pub use prime::SafePrime;
