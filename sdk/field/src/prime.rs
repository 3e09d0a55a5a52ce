//! Safe Primes
//!
//! The three fixed moduli a masker can be built over. Each `p` is a safe
//! prime: `(p - 1) / 2` is prime as well.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 18446744072637906947
const U64_SAFE_PRIME: u64 = 0xffff_ffff_c020_0003;

/// 340282366920938463463374607429104828419
const U128_SAFE_PRIME: u128 = 0xffff_ffff_ffff_ffff_ffff_ffff_6140_0003;

/// 115792089237316195423570985008687907853269984665640564039457584007911397392387
const U256_SAFE_PRIME_BE: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x98, 0xc0, 0x00, 0x03,
];

/// secp256k1 group order `n`
pub(crate) const SECP256K1_ORDER_BE: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// ed25519 group order `l = 2^252 + 27742317777372353535851937790883648493`
pub(crate) const ED25519_ORDER_BE: [u8; 32] = [
    0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x14, 0xde, 0xf9, 0xde, 0xa2, 0xf7, 0x9c, 0xd6, 0x58, 0x12, 0x63, 0x1a, 0x5c, 0xf5, 0xd3, 0xed,
];

/// Safe prime selection for a masker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafePrime {
    /// 64-bit prime: plain integers
    U64,
    /// 128-bit prime
    U128,
    /// 256-bit prime: required for EC-scalar sized payloads
    #[default]
    U256,
}

impl SafePrime {
    /// The prime as a big integer
    pub fn modulus(&self) -> BigUint {
        match self {
            SafePrime::U64 => BigUint::from(U64_SAFE_PRIME),
            SafePrime::U128 => BigUint::from(U128_SAFE_PRIME),
            SafePrime::U256 => BigUint::from_bytes_be(&U256_SAFE_PRIME_BE),
        }
    }

    /// Nominal size in bits
    pub fn bits(&self) -> u64 {
        match self {
            SafePrime::U64 => 64,
            SafePrime::U128 => 128,
            SafePrime::U256 => 256,
        }
    }

    /// Short lowercase name, as used in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            SafePrime::U64 => "u64",
            SafePrime::U128 => "u128",
            SafePrime::U256 => "u256",
        }
    }
}

impl fmt::Display for SafePrime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SafePrime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "u64" | "64" => Ok(SafePrime::U64),
            "u128" | "128" => Ok(SafePrime::U128),
            "u256" | "256" => Ok(SafePrime::U256),
            other => Err(format!("unknown safe prime: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    #[test]
    fn test_moduli_match_decimal_constants() {
        assert_eq!(
            SafePrime::U64.modulus().to_string(),
            "18446744072637906947"
        );
        assert_eq!(
            SafePrime::U128.modulus().to_string(),
            "340282366920938463463374607429104828419"
        );
        assert_eq!(
            SafePrime::U256.modulus().to_string(),
            "115792089237316195423570985008687907853269984665640564039457584007911397392387"
        );
    }

    #[test]
    fn test_bit_lengths() {
        for prime in [SafePrime::U64, SafePrime::U128, SafePrime::U256] {
            assert_eq!(prime.modulus().bits(), prime.bits());
        }
    }

    #[test]
    fn test_ed25519_order() {
        let l = BigUint::from_bytes_be(&ED25519_ORDER_BE);
        let expected = (BigUint::one() << 252u32)
            + "27742317777372353535851937790883648493"
                .parse::<BigUint>()
                .unwrap();
        assert_eq!(l, expected);
    }

    #[test]
    fn test_parse() {
        assert_eq!("u64".parse::<SafePrime>().unwrap(), SafePrime::U64);
        assert_eq!("256".parse::<SafePrime>().unwrap(), SafePrime::U256);
        assert!("u512".parse::<SafePrime>().is_err());
    }
}
