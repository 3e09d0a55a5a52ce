//! Unmasking: a jar of party bundles back into clear values

use veilshare_field::FieldElement;
use veilshare_threshold::{PartyId, PartyShares, ShamirSharer};
use veilshare_values::{BlobShares, MaskedValue, NamedValues, Value, ValueType};

use crate::error::MaskerError;
use crate::masker::{MaskedJar, SecretMasker};

/// One party's view of a single value
type Contribution<'a> = (&'a PartyId, &'a MaskedValue);

impl SecretMasker {
    /// Reconstruct the named values held in `jar`
    ///
    /// The jar must hold bundles from at least `degree + 1` parties. Public
    /// values must agree across every contribution; shares beyond the first
    /// `degree + 1` are checked against the same polynomial.
    pub fn unmask(&self, jar: MaskedJar) -> Result<NamedValues<Value>, MaskerError> {
        if jar.binding() != self.fingerprint() || jar.roster() != self.roster() {
            return Err(MaskerError::ForeignJar);
        }
        let need = self.degree() + 1;
        if jar.len() < need {
            return Err(MaskerError::InsufficientShares {
                name: String::new(),
                got: jar.len(),
                need,
            });
        }
        if self.options().require_full_roster {
            if let Some(party) = jar.missing_parties().first() {
                return Err(MaskerError::MissingParty {
                    name: String::new(),
                    party: (*party).clone(),
                });
            }
        }

        tracing::debug!(
            contributions = jar.len(),
            parties = self.parties().len(),
            "unmasking jar"
        );

        let bundles: Vec<(PartyId, NamedValues<MaskedValue>)> = jar.into_elements().collect();
        let (first_party, first_bundle) = &bundles[0];

        // Every contributing bundle must carry exactly the same names
        for (party, bundle) in &bundles[1..] {
            if let Some(name) = first_bundle.names().find(|name| !bundle.contains(name)) {
                return Err(MaskerError::MissingParty {
                    name: name.to_string(),
                    party: party.clone(),
                });
            }
            if let Some(name) = bundle.names().find(|name| !first_bundle.contains(name)) {
                return Err(MaskerError::MissingParty {
                    name: name.to_string(),
                    party: first_party.clone(),
                });
            }
        }

        let mut values = NamedValues::with_capacity(first_bundle.len());
        for name in first_bundle.names() {
            let contributions: Vec<Contribution<'_>> = bundles
                .iter()
                .filter_map(|(party, bundle)| bundle.get(name).map(|value| (party, value)))
                .collect();
            let value = self.unmask_value(name, &contributions)?;
            tracing::trace!(name, "value reconstructed");
            values.insert(name, value);
        }

        Ok(values)
    }

    fn unmask_value(
        &self,
        path: &str,
        contributions: &[Contribution<'_>],
    ) -> Result<Value, MaskerError> {
        let (first_party, first) = contributions[0];
        let expected = first.to_type();
        for (party, value) in &contributions[1..] {
            let found = value.to_type();
            if !found.same_kind(&expected) {
                return Err(mismatch(path, party, &expected, &found));
            }
        }

        let field = self.field();
        let value = match first {
            MaskedValue::SecretInteger(_) => {
                let secret = reconstruct(&self.sharer, path, contributions, |v| match v {
                    MaskedValue::SecretInteger(share) => Some(share),
                    _ => None,
                })?;
                Value::SecretInteger(field.decode_signed(&secret))
            }
            MaskedValue::SecretUnsignedInteger(_) => {
                let secret = reconstruct(&self.sharer, path, contributions, |v| match v {
                    MaskedValue::SecretUnsignedInteger(share) => Some(share),
                    _ => None,
                })?;
                Value::SecretUnsignedInteger(field.decode_unsigned(&secret))
            }
            MaskedValue::SecretBoolean(_) => {
                let secret = reconstruct(&self.sharer, path, contributions, |v| match v {
                    MaskedValue::SecretBoolean(share) => Some(share),
                    _ => None,
                })?;
                let flag = field.decode_bool(&secret).map_err(|_| {
                    tracing::warn!(name = path, "boolean shares reconstruct to neither 0 nor 1");
                    MaskerError::Corruption {
                        name: path.to_string(),
                        party: None,
                    }
                })?;
                Value::SecretBoolean(flag)
            }
            MaskedValue::EcdsaPrivateKey(_) => {
                let key = self.unmask_key(&self.ecdsa_sharer, path, contributions, |v| match v {
                    MaskedValue::EcdsaPrivateKey(share) => Some(share),
                    _ => None,
                })?;
                Value::EcdsaPrivateKey(key)
            }
            MaskedValue::EddsaPrivateKey(_) => {
                let key = self.unmask_key(&self.eddsa_sharer, path, contributions, |v| match v {
                    MaskedValue::EddsaPrivateKey(share) => Some(share),
                    _ => None,
                })?;
                Value::EddsaPrivateKey(key)
            }
            MaskedValue::SecretBlob(blob) => {
                Value::SecretBlob(self.unmask_blob(path, first_party, blob, contributions)?)
            }
            MaskedValue::Array { inner_type, values } => {
                self.unmask_array(path, inner_type, values, contributions)?
            }
            MaskedValue::Tuple { .. } => {
                let (lefts, rights) = split_tuples(contributions);
                let left = self.unmask_value(&format!("{path}.left"), &lefts)?;
                let right = self.unmask_value(&format!("{path}.right"), &rights)?;
                Value::new_tuple(left, right)
            }
            MaskedValue::Integer(_)
            | MaskedValue::UnsignedInteger(_)
            | MaskedValue::Boolean(_)
            | MaskedValue::EcdsaDigestMessage(_)
            | MaskedValue::EcdsaSignature(_)
            | MaskedValue::EcdsaPublicKey(_)
            | MaskedValue::EddsaMessage(_)
            | MaskedValue::EddsaSignature(_)
            | MaskedValue::EddsaPublicKey(_)
            | MaskedValue::StoreId(_) => self.unmask_public(path, contributions)?,
        };

        Ok(value)
    }

    /// Take the first contribution, requiring every other one to match it
    fn unmask_public(
        &self,
        path: &str,
        contributions: &[Contribution<'_>],
    ) -> Result<Value, MaskerError> {
        let (first_party, first) = contributions[0];
        if let Some((party, _)) = contributions[1..].iter().find(|(_, value)| *value != first) {
            tracing::warn!(name = path, party = %party, "public value diverges across parties");
            return Err(MaskerError::Inconsistency {
                name: path.to_string(),
                party: (*party).clone(),
            });
        }
        first.to_public_value().ok_or_else(|| {
            let ty = first.to_type();
            mismatch(path, first_party, &ty, &ty)
        })
    }

    fn unmask_key(
        &self,
        sharer: &ShamirSharer,
        path: &str,
        contributions: &[Contribution<'_>],
        extract: fn(&MaskedValue) -> Option<&FieldElement>,
    ) -> Result<[u8; 32], MaskerError> {
        let secret = reconstruct(sharer, path, contributions, extract)?;
        if secret.is_zero() {
            tracing::warn!(name = path, "private key shares interpolate to zero");
            return Err(MaskerError::Corruption {
                name: path.to_string(),
                party: None,
            });
        }
        sharer
            .field()
            .decode_scalar(&secret)
            .map_err(|e| MaskerError::encoding(path, e))
    }

    fn unmask_blob(
        &self,
        path: &str,
        first_party: &PartyId,
        first: &BlobShares,
        contributions: &[Contribution<'_>],
    ) -> Result<Vec<u8>, MaskerError> {
        let chunk_size = self.blob_chunk_size();
        let original_size = usize::try_from(first.original_size).unwrap_or(usize::MAX);
        let chunk_count = original_size.div_ceil(chunk_size);

        let describe = |blob: &BlobShares| {
            format!(
                "SecretBlob({} chunks, {} bytes)",
                blob.chunks.len(),
                blob.original_size
            )
        };
        if first.chunks.len() != chunk_count {
            return Err(MaskerError::TypeMismatch {
                name: path.to_string(),
                party: first_party.clone(),
                expected: format!("SecretBlob({chunk_count} chunks, {original_size} bytes)"),
                found: describe(first),
            });
        }

        let mut blobs = Vec::with_capacity(contributions.len());
        for (party, value) in contributions {
            let blob = match value {
                MaskedValue::SecretBlob(blob) => blob,
                other => return Err(mismatch(path, party, &ValueType::SecretBlob, &other.to_type())),
            };
            if blob.chunks.len() != first.chunks.len() || blob.original_size != first.original_size
            {
                return Err(MaskerError::TypeMismatch {
                    name: path.to_string(),
                    party: (*party).clone(),
                    expected: describe(first),
                    found: describe(blob),
                });
            }
            blobs.push((*party, blob));
        }

        let mut bytes = Vec::with_capacity(original_size);
        for index in 0..chunk_count {
            let shares: PartyShares = blobs
                .iter()
                .map(|(party, blob)| ((*party).clone(), blob.chunks[index].clone()))
                .collect();
            let chunk = self
                .sharer
                .reconstruct(&shares)
                .map_err(|e| MaskerError::from_shamir(path, e))?;
            let len = chunk_size.min(original_size - bytes.len());
            let decoded = self
                .field()
                .decode_blob_chunk(&chunk, len)
                .map_err(|e| MaskerError::encoding(path, e))?;
            bytes.extend_from_slice(&decoded);
        }

        Ok(bytes)
    }

    fn unmask_array(
        &self,
        path: &str,
        inner_type: &ValueType,
        first_values: &[MaskedValue],
        contributions: &[Contribution<'_>],
    ) -> Result<Value, MaskerError> {
        let expected = ValueType::new_array(inner_type.clone(), first_values.len());

        let mut columns: Vec<&[MaskedValue]> = Vec::with_capacity(contributions.len());
        for (party, value) in contributions {
            match value {
                MaskedValue::Array {
                    inner_type: declared,
                    values,
                } if declared == inner_type && values.len() == first_values.len() => {
                    if let Some(element) = values.iter().find(|v| &v.to_type() != inner_type) {
                        return Err(mismatch(path, party, inner_type, &element.to_type()));
                    }
                    columns.push(values);
                }
                other => return Err(mismatch(path, party, &expected, &other.to_type())),
            }
        }

        let mut values = Vec::with_capacity(first_values.len());
        for index in 0..first_values.len() {
            let elements: Vec<Contribution<'_>> = contributions
                .iter()
                .zip(&columns)
                .map(|((party, _), column)| (*party, &column[index]))
                .collect();
            values.push(self.unmask_value(&format!("{path}[{index}]"), &elements)?);
        }

        Ok(Value::Array {
            inner_type: inner_type.clone(),
            values,
        })
    }
}

/// Gather one field element per contribution and interpolate
fn reconstruct(
    sharer: &ShamirSharer,
    path: &str,
    contributions: &[Contribution<'_>],
    extract: fn(&MaskedValue) -> Option<&FieldElement>,
) -> Result<FieldElement, MaskerError> {
    let expected = contributions[0].1.to_type();
    let mut shares = PartyShares::with_capacity(contributions.len());
    for (party, value) in contributions {
        let share = extract(value).ok_or_else(|| mismatch(path, party, &expected, &value.to_type()))?;
        shares.insert((*party).clone(), share.clone());
    }

    sharer.reconstruct(&shares).map_err(|e| {
        if matches!(e, veilshare_threshold::ShamirError::Corruption { .. }) {
            tracing::warn!(name = path, "share does not lie on the interpolated polynomial");
        }
        MaskerError::from_shamir(path, e)
    })
}

fn split_tuples<'a>(
    contributions: &[Contribution<'a>],
) -> (Vec<Contribution<'a>>, Vec<Contribution<'a>>) {
    contributions
        .iter()
        .filter_map(|&(party, value)| match value {
            MaskedValue::Tuple { left, right } => Some(((party, &**left), (party, &**right))),
            _ => None,
        })
        .unzip()
}

fn mismatch(path: &str, party: &PartyId, expected: &ValueType, found: &ValueType) -> MaskerError {
    MaskerError::TypeMismatch {
        name: path.to_string(),
        party: party.clone(),
        expected: expected.to_string(),
        found: found.to_string(),
    }
}
