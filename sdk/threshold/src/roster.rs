//! Party Roster
//!
//! The ordered, duplicate-free set of parties a masker shares to. Each party's
//! evaluation point is fixed by its position: the first party evaluates at
//! `x = 1`, the second at `x = 2`, and so on.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use veilshare_field::FieldElement;

use crate::shares::ShamirError;

/// Opaque party identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartyId(#[serde(with = "serde_bytes")] Vec<u8>);

impl PartyId {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parse a hex-encoded identifier
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        hex::decode(s).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for PartyId {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for PartyId {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<&str> for PartyId {
    fn from(name: &str) -> Self {
        Self(name.as_bytes().to_vec())
    }
}

impl AsRef<[u8]> for PartyId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

/// Ordered party roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    parties: Vec<PartyId>,
    /// Party -> index into `parties`
    positions: HashMap<PartyId, usize>,
}

impl Roster {
    /// Build a roster, rejecting empty or duplicated party lists
    pub fn new(parties: Vec<PartyId>) -> Result<Self, ShamirError> {
        if parties.is_empty() {
            return Err(ShamirError::EmptyRoster);
        }

        let mut positions = HashMap::with_capacity(parties.len());
        for (index, party) in parties.iter().enumerate() {
            if positions.insert(party.clone(), index).is_some() {
                return Err(ShamirError::DuplicateParty(party.clone()));
            }
        }

        Ok(Self { parties, positions })
    }

    pub fn parties(&self) -> &[PartyId] {
        &self.parties
    }

    pub fn len(&self) -> usize {
        self.parties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    pub fn contains(&self, party: &PartyId) -> bool {
        self.positions.contains_key(party)
    }

    /// Zero-based roster position
    pub fn position(&self, party: &PartyId) -> Option<usize> {
        self.positions.get(party).copied()
    }

    /// Evaluation point (`position + 1`, never zero)
    pub fn abscissa(&self, party: &PartyId) -> Option<FieldElement> {
        self.position(party)
            .map(|index| FieldElement::from(index as u64 + 1))
    }

    /// Digest binding this roster and a caller-supplied context
    ///
    /// Two rosters with the same parties in a different order produce
    /// different digests, as their evaluation points differ.
    pub fn fingerprint(&self, context: &[u8]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new_derive_key("veilshare-roster-binding-v1");
        hasher.update(&(context.len() as u64).to_le_bytes());
        hasher.update(context);
        for party in &self.parties {
            hasher.update(&(party.0.len() as u64).to_le_bytes());
            hasher.update(&party.0);
        }
        *hasher.finalize().as_bytes()
    }
}
