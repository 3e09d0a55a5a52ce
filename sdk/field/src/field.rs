//! Prime Field
//!
//! Arithmetic modulo a prime `p`. Every operation returns a residue in
//! `[0, p)`; inputs are reduced first so callers never see a wide value.

use num_bigint::{BigInt, BigUint, RandBigInt, Sign};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::prime::{ED25519_ORDER_BE, SECP256K1_ORDER_BE, SafePrime};

/// Field arithmetic errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("value out of range for a {bits}-bit field: {reason}")]
    OutOfRange { bits: u64, reason: String },

    #[error("zero has no multiplicative inverse")]
    ZeroInverse,
}

/// An element of a prime field
///
/// The element does not remember its modulus; it is only meaningful
/// together with the [`PrimeField`] that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldElement(pub BigUint);

impl FieldElement {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn one() -> Self {
        Self(BigUint::one())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Get the underlying residue
    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A prime field `GF(p)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrimeField {
    modulus: BigUint,
    /// `(p - 1) / 2`, the largest magnitude of a signed value
    half: BigUint,
}

impl PrimeField {
    /// Create a field over `modulus`
    ///
    /// The modulus must be an odd prime; this is not checked.
    pub fn new(modulus: BigUint) -> Self {
        let half = (&modulus - 1u32) >> 1u32;
        Self { modulus, half }
    }

    /// Field over one of the fixed safe primes
    pub fn safe_prime(prime: SafePrime) -> Self {
        Self::new(prime.modulus())
    }

    /// Field of secp256k1 scalars
    pub fn secp256k1_order() -> Self {
        Self::new(BigUint::from_bytes_be(&SECP256K1_ORDER_BE))
    }

    /// Field of ed25519 scalars
    pub fn ed25519_order() -> Self {
        Self::new(BigUint::from_bytes_be(&ED25519_ORDER_BE))
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// `(p - 1) / 2`
    pub fn half(&self) -> &BigUint {
        &self.half
    }

    /// Bit length of the modulus
    pub fn bits(&self) -> u64 {
        self.modulus.bits()
    }

    /// Check that an element is a canonical residue
    pub fn contains(&self, element: &FieldElement) -> bool {
        element.0 < self.modulus
    }

    /// Accept `value` only if it is already below the modulus
    pub fn element(&self, value: BigUint) -> Result<FieldElement, FieldError> {
        if value >= self.modulus {
            return Err(self.out_of_range("value is not below the modulus"));
        }
        Ok(FieldElement(value))
    }

    /// Reduce an arbitrary unsigned integer into the field
    pub fn reduce(&self, value: &BigUint) -> FieldElement {
        FieldElement(value % &self.modulus)
    }

    /// Reduce a signed integer, mapping negatives to their additive inverse
    pub fn reduce_signed(&self, value: &BigInt) -> FieldElement {
        let residue = self.reduce(value.magnitude());
        match value.sign() {
            Sign::Minus => self.neg(&residue),
            Sign::NoSign | Sign::Plus => residue,
        }
    }

    pub fn from_u64(&self, value: u64) -> FieldElement {
        self.reduce(&BigUint::from(value))
    }

    pub fn add(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        FieldElement((&a.0 + &b.0) % &self.modulus)
    }

    pub fn sub(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        let a = &a.0 % &self.modulus;
        let b = &b.0 % &self.modulus;
        FieldElement((a + &self.modulus - b) % &self.modulus)
    }

    pub fn neg(&self, a: &FieldElement) -> FieldElement {
        self.sub(&FieldElement::zero(), a)
    }

    pub fn mul(&self, a: &FieldElement, b: &FieldElement) -> FieldElement {
        FieldElement((&a.0 * &b.0) % &self.modulus)
    }

    pub fn pow(&self, base: &FieldElement, exponent: &BigUint) -> FieldElement {
        FieldElement(base.0.modpow(exponent, &self.modulus))
    }

    /// Multiplicative inverse via Fermat: `a^(p-2)`
    pub fn inv(&self, a: &FieldElement) -> Result<FieldElement, FieldError> {
        let a = self.reduce(&a.0);
        if a.is_zero() {
            return Err(FieldError::ZeroInverse);
        }
        let exponent = &self.modulus - 2u32;
        Ok(self.pow(&a, &exponent))
    }

    pub fn div(&self, a: &FieldElement, b: &FieldElement) -> Result<FieldElement, FieldError> {
        Ok(self.mul(a, &self.inv(b)?))
    }

    /// Uniformly random element in `[0, p)`
    pub fn random<R>(&self, rng: &mut R) -> FieldElement
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        FieldElement(rng.gen_biguint_below(&self.modulus))
    }

    /// Uniformly random element in `[1, p)`
    pub fn random_nonzero<R>(&self, rng: &mut R) -> FieldElement
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        FieldElement(rng.gen_biguint_range(&BigUint::one(), &self.modulus))
    }

    pub(crate) fn out_of_range(&self, reason: impl Into<String>) -> FieldError {
        FieldError::OutOfRange {
            bits: self.bits(),
            reason: reason.into(),
        }
    }
}

impl From<SafePrime> for PrimeField {
    fn from(prime: SafePrime) -> Self {
        Self::safe_prime(prime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;
    use rand::SeedableRng;

    fn small_field() -> PrimeField {
        PrimeField::new(BigUint::from(23u32))
    }

    #[test]
    fn test_add_sub_wrap() {
        let f = small_field();
        let a = FieldElement::from(20);
        let b = FieldElement::from(5);
        assert_eq!(f.add(&a, &b), FieldElement::from(2));
        assert_eq!(f.sub(&b, &a), FieldElement::from(8));
        assert_eq!(f.neg(&b), FieldElement::from(18));
        assert_eq!(f.neg(&FieldElement::zero()), FieldElement::zero());
    }

    #[test]
    fn test_mul_inv() {
        let f = small_field();
        for v in 1..23u64 {
            let a = FieldElement::from(v);
            let inv = f.inv(&a).unwrap();
            assert_eq!(f.mul(&a, &inv), FieldElement::one());
        }
        assert_eq!(f.inv(&FieldElement::zero()), Err(FieldError::ZeroInverse));
    }

    #[test]
    fn test_operations_reduce_wide_inputs() {
        let f = small_field();
        let wide = FieldElement(BigUint::from(23u32 * 5 + 4));
        assert_eq!(f.sub(&wide, &FieldElement::from(1)), FieldElement::from(3));
        assert_eq!(f.reduce(&wide.0), FieldElement::from(4));
        assert_eq!(f.reduce_signed(&BigInt::from(-1)), FieldElement::from(22));
        assert_eq!(f.reduce_signed(&BigInt::from(-47)), FieldElement::from(22));
    }

    #[test]
    fn test_element_rejects_modulus() {
        let f = PrimeField::safe_prime(SafePrime::U64);
        assert!(f.element(f.modulus().clone()).is_err());
        assert!(f.element(f.modulus() - 1u32).is_ok());
    }

    #[test]
    fn test_random_in_range() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let f = PrimeField::safe_prime(SafePrime::U64);
        for _ in 0..100 {
            let r = f.random(&mut rng);
            assert!(f.contains(&r));
            let nz = f.random_nonzero(&mut rng);
            assert!(!nz.is_zero());
            assert!(f.contains(&nz));
        }
    }

    #[test]
    fn test_curve_orders_bits() {
        assert_eq!(PrimeField::secp256k1_order().bits(), 256);
        assert_eq!(PrimeField::ed25519_order().bits(), 253);
    }
}
