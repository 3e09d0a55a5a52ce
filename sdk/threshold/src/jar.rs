//! Party Jar
//!
//! Collects one element per party ahead of reconstruction. Insertion is
//! cheap and order-independent; the only check made on insert is that the
//! party is on the roster. Everything else is validated by the consumer.

use std::collections::HashMap;
use std::sync::Arc;

use crate::roster::{PartyId, Roster};
use crate::shares::ShamirError;

/// A jar where every party puts an element
#[derive(Debug, Clone)]
pub struct PartyJar<T> {
    roster: Arc<Roster>,
    /// Digest of the configuration that built this jar
    binding: [u8; 32],
    elements: HashMap<PartyId, T>,
}

impl<T> PartyJar<T> {
    /// Create an empty jar for `roster`, tagged with `binding`
    pub fn new(roster: Arc<Roster>, binding: [u8; 32]) -> Self {
        Self {
            roster,
            binding,
            elements: HashMap::new(),
        }
    }

    /// Insert a party's element, returning the one it replaces
    pub fn add_element(&mut self, party: PartyId, element: T) -> Result<Option<T>, ShamirError> {
        if !self.roster.contains(&party) {
            return Err(ShamirError::UnknownParty(party));
        }
        Ok(self.elements.insert(party, element))
    }

    /// Take a party's element back out
    pub fn remove(&mut self, party: &PartyId) -> Option<T> {
        self.elements.remove(party)
    }

    pub fn get(&self, party: &PartyId) -> Option<&T> {
        self.elements.get(party)
    }

    pub fn contains(&self, party: &PartyId) -> bool {
        self.elements.contains_key(party)
    }

    /// Number of contributing parties
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn binding(&self) -> &[u8; 32] {
        &self.binding
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Roster members that have not contributed
    pub fn missing_parties(&self) -> Vec<&PartyId> {
        self.roster
            .parties()
            .iter()
            .filter(|party| !self.elements.contains_key(*party))
            .collect()
    }

    /// Contributions in roster order
    pub fn elements(&self) -> impl Iterator<Item = (&PartyId, &T)> {
        self.roster
            .parties()
            .iter()
            .filter_map(|party| self.elements.get_key_value(party))
    }

    /// Consume the jar, yielding contributions in roster order
    pub fn into_elements(mut self) -> impl Iterator<Item = (PartyId, T)> {
        let order = self.roster.parties().to_vec();
        order
            .into_iter()
            .filter_map(move |party| self.elements.remove_entry(&party))
    }
}
