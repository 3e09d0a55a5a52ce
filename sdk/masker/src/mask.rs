//! Masking: clear values into one bundle per party

use rand::{CryptoRng, RngCore};
use std::collections::HashMap;
use veilshare_field::FieldElement;
use veilshare_threshold::{PartyId, ShamirSharer};
use veilshare_values::{BlobShares, MaskedValue, NamedValues, Value, ValueError};

use crate::error::MaskerError;
use crate::masker::SecretMasker;

impl SecretMasker {
    /// Mask `values` using the thread-local CSPRNG
    pub fn mask(
        &self,
        values: &NamedValues<Value>,
    ) -> Result<HashMap<PartyId, NamedValues<MaskedValue>>, MaskerError> {
        self.mask_with_rng(values, &mut rand::thread_rng())
    }

    /// Mask `values`, drawing polynomial coefficients from `rng`
    ///
    /// Every roster party gets a bundle holding the input's names in input
    /// order. Public values are copied; secret values are shared.
    pub fn mask_with_rng<R>(
        &self,
        values: &NamedValues<Value>,
        rng: &mut R,
    ) -> Result<HashMap<PartyId, NamedValues<MaskedValue>>, MaskerError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        tracing::debug!(
            values = values.len(),
            parties = self.parties().len(),
            "masking values"
        );

        let mut bundles: Vec<NamedValues<MaskedValue>> = (0..self.parties().len())
            .map(|_| NamedValues::with_capacity(values.len()))
            .collect();

        for (name, value) in values.iter() {
            let masked = self.mask_value(name, value, rng)?;
            for (bundle, share) in bundles.iter_mut().zip(masked) {
                bundle.insert(name, share);
            }
        }

        Ok(self.parties().iter().cloned().zip(bundles).collect())
    }

    /// Mask one value; the i-th output belongs to the i-th roster party
    fn mask_value<R>(
        &self,
        path: &str,
        value: &Value,
        rng: &mut R,
    ) -> Result<Vec<MaskedValue>, MaskerError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let n = self.parties().len();
        let field = self.field();

        let masked = match value {
            Value::SecretInteger(v) => {
                let secret = field
                    .encode_signed(v)
                    .map_err(|e| MaskerError::encoding(path, e))?;
                share(&self.sharer, &secret, rng, MaskedValue::SecretInteger)
            }
            Value::SecretUnsignedInteger(v) => {
                let secret = field
                    .encode_unsigned(v)
                    .map_err(|e| MaskerError::encoding(path, e))?;
                share(&self.sharer, &secret, rng, MaskedValue::SecretUnsignedInteger)
            }
            Value::SecretBoolean(v) => {
                let secret = field.encode_bool(*v);
                share(&self.sharer, &secret, rng, MaskedValue::SecretBoolean)
            }
            Value::SecretBlob(bytes) => self.mask_blob(path, bytes, rng)?,
            Value::EcdsaPrivateKey(bytes) => {
                let secret = self
                    .ecdsa_sharer
                    .field()
                    .encode_scalar(bytes)
                    .map_err(|e| MaskerError::encoding(path, e))?;
                share(&self.ecdsa_sharer, &secret, rng, MaskedValue::EcdsaPrivateKey)
            }
            Value::EddsaPrivateKey(bytes) => {
                let secret = self
                    .eddsa_sharer
                    .field()
                    .encode_scalar(bytes)
                    .map_err(|e| MaskerError::encoding(path, e))?;
                share(&self.eddsa_sharer, &secret, rng, MaskedValue::EddsaPrivateKey)
            }
            Value::Array { inner_type, values } => {
                let mut per_party: Vec<Vec<MaskedValue>> =
                    (0..n).map(|_| Vec::with_capacity(values.len())).collect();
                for (index, element) in values.iter().enumerate() {
                    let element_path = format!("{path}[{index}]");
                    let found = element.to_type();
                    if found != *inner_type {
                        return Err(MaskerError::InvalidValue {
                            name: element_path,
                            source: ValueError::ArrayTypeMismatch {
                                index,
                                expected: inner_type.clone(),
                                found,
                            },
                        });
                    }
                    let masked = self.mask_value(&element_path, element, rng)?;
                    for (elements, share) in per_party.iter_mut().zip(masked) {
                        elements.push(share);
                    }
                }
                per_party
                    .into_iter()
                    .map(|values| MaskedValue::Array {
                        inner_type: inner_type.clone(),
                        values,
                    })
                    .collect()
            }
            Value::Tuple { left, right } => {
                let left = self.mask_value(&format!("{path}.left"), left, rng)?;
                let right = self.mask_value(&format!("{path}.right"), right, rng)?;
                left.into_iter()
                    .zip(right)
                    .map(|(l, r)| MaskedValue::new_tuple(l, r))
                    .collect()
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
            | Value::StoreId(_) => MaskedValue::from_public(value)
                .map(|copy| vec![copy; n])
                .unwrap_or_default(),
        };

        Ok(masked)
    }

    /// Share a blob chunk by chunk; the original length travels alongside
    fn mask_blob<R>(
        &self,
        path: &str,
        bytes: &[u8],
        rng: &mut R,
    ) -> Result<Vec<MaskedValue>, MaskerError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let n = self.parties().len();
        let chunk_size = self.blob_chunk_size();
        let chunk_count = bytes.len().div_ceil(chunk_size);

        let mut per_party: Vec<Vec<FieldElement>> =
            (0..n).map(|_| Vec::with_capacity(chunk_count)).collect();
        for chunk in bytes.chunks(chunk_size) {
            let secret = self
                .field()
                .encode_blob_chunk(chunk)
                .map_err(|e| MaskerError::encoding(path, e))?;
            let shares = self.sharer.share_in_roster_order(&secret, rng);
            for (chunks, share) in per_party.iter_mut().zip(shares) {
                chunks.push(share);
            }
        }

        Ok(per_party
            .into_iter()
            .map(|chunks| {
                MaskedValue::SecretBlob(BlobShares {
                    chunks,
                    original_size: bytes.len() as u64,
                })
            })
            .collect())
    }
}

fn share<R>(
    sharer: &ShamirSharer,
    secret: &FieldElement,
    rng: &mut R,
    wrap: fn(FieldElement) -> MaskedValue,
) -> Vec<MaskedValue>
where
    R: RngCore + CryptoRng + ?Sized,
{
    sharer
        .share_in_roster_order(secret, rng)
        .into_iter()
        .map(wrap)
        .collect()
}
