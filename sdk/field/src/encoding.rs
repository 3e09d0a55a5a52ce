//! Value Encodings
//!
//! Maps typed scalars into field elements before sharing and back after
//! reconstruction. Nothing here wraps silently: a value that does not fit the
//! field is an error.

use num_bigint::{BigInt, BigUint, Sign};

use crate::field::{FieldElement, FieldError, PrimeField};

/// Size in bytes of a private key scalar
pub const SCALAR_SIZE: usize = 32;

impl PrimeField {
    /// Encode a signed integer using the symmetric residue convention
    ///
    /// Values with `|v| <= (p - 1) / 2` are accepted; negatives map to `p - |v|`.
    pub fn encode_signed(&self, value: &BigInt) -> Result<FieldElement, FieldError> {
        let magnitude = value.magnitude();
        if magnitude > self.half() {
            return Err(self.out_of_range(format!("|{value}| exceeds (p - 1) / 2")));
        }
        match value.sign() {
            Sign::Minus => Ok(FieldElement(self.modulus() - magnitude)),
            Sign::NoSign | Sign::Plus => Ok(FieldElement(magnitude.clone())),
        }
    }

    /// Decode a residue: the upper half of `[0, p)` holds negative integers
    pub fn decode_signed(&self, element: &FieldElement) -> BigInt {
        let residue = self.reduce(&element.0).0;
        if &residue > self.half() {
            BigInt::from_biguint(Sign::Minus, self.modulus() - residue)
        } else {
            BigInt::from_biguint(Sign::Plus, residue)
        }
    }

    pub fn encode_unsigned(&self, value: &BigUint) -> Result<FieldElement, FieldError> {
        self.element(value.clone())
    }

    pub fn decode_unsigned(&self, element: &FieldElement) -> BigUint {
        self.reduce(&element.0).0
    }

    pub fn encode_bool(&self, value: bool) -> FieldElement {
        if value {
            FieldElement::one()
        } else {
            FieldElement::zero()
        }
    }

    /// Only the residues 0 and 1 are booleans
    pub fn decode_bool(&self, element: &FieldElement) -> Result<bool, FieldError> {
        let residue = self.reduce(&element.0);
        if residue.is_zero() {
            Ok(false)
        } else if residue == FieldElement::one() {
            Ok(true)
        } else {
            Err(self.out_of_range("boolean residue is neither 0 nor 1"))
        }
    }

    /// Bytes per blob chunk: `(bits(p) - 1) / 8`
    ///
    /// A chunk of this many bytes is below `2^(bits(p) - 1)` and therefore below `p`.
    pub fn blob_chunk_size(&self) -> usize {
        ((self.bits() - 1) / 8) as usize
    }

    /// Encode one little-endian blob chunk
    pub fn encode_blob_chunk(&self, chunk: &[u8]) -> Result<FieldElement, FieldError> {
        if chunk.len() > self.blob_chunk_size() {
            return Err(self.out_of_range(format!(
                "chunk of {} bytes exceeds {} bytes",
                chunk.len(),
                self.blob_chunk_size()
            )));
        }
        self.element(BigUint::from_bytes_le(chunk))
    }

    /// Decode a chunk back to exactly `len` bytes
    pub fn decode_blob_chunk(&self, element: &FieldElement, len: usize) -> Result<Vec<u8>, FieldError> {
        let mut bytes = element.0.to_bytes_le();
        if element.is_zero() {
            bytes.clear();
        }
        if bytes.len() > len {
            return Err(self.out_of_range(format!("chunk does not fit in {len} bytes")));
        }
        bytes.resize(len, 0);
        Ok(bytes)
    }

    /// Encode a big-endian key scalar, which must be nonzero and below the modulus
    pub fn encode_scalar(&self, bytes: &[u8; SCALAR_SIZE]) -> Result<FieldElement, FieldError> {
        let element = self.element(BigUint::from_bytes_be(bytes))?;
        if element.is_zero() {
            return Err(self.out_of_range("key scalar is zero"));
        }
        Ok(element)
    }

    pub fn decode_scalar(&self, element: &FieldElement) -> Result<[u8; SCALAR_SIZE], FieldError> {
        let bytes = element.0.to_bytes_be();
        if bytes.len() > SCALAR_SIZE {
            return Err(self.out_of_range("scalar wider than 32 bytes"));
        }
        let mut out = [0u8; SCALAR_SIZE];
        out[SCALAR_SIZE - bytes.len()..].copy_from_slice(&bytes);
        Ok(out)
    }
}
