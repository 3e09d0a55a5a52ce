//! Named value collections

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Name → value mapping that remembers insertion order
///
/// Order is kept for iteration and diagnostics only; two collections holding
/// the same pairs compare equal regardless of order.
#[derive(Debug, Clone, Serialize)]
pub struct NamedValues<T> {
    entries: Vec<(String, T)>,
    /// Position of each name in `entries`
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl<T> Default for NamedValues<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> NamedValues<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Insert `value`, replacing an existing entry in place
    pub fn insert(&mut self, name: impl Into<String>, value: T) -> Option<T> {
        let name = name.into();
        match self.index.get(&name) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].1, value)),
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&position| &self.entries[position].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<T> {
        let position = self.index.remove(name)?;
        let (_, value) = self.entries.remove(position);
        for (n, _) in &self.entries[position..] {
            if let Some(slot) = self.index.get_mut(n) {
                *slot -= 1;
            }
        }
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NamedValues<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Entries<T> {
            entries: Vec<(String, T)>,
        }

        let Entries { entries } = Entries::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

impl<T: PartialEq> PartialEq for NamedValues<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl<T: Eq> Eq for NamedValues<T> {}

impl<T> IntoIterator for NamedValues<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<N: Into<String>, T> FromIterator<(N, T)> for NamedValues<T> {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut values = NamedValues::new();
        for (name, value) in iter {
            values.insert(name, value);
        }
        values
    }
}

impl<N: Into<String>, T> Extend<(N, T)> for NamedValues<T> {
    fn extend<I: IntoIterator<Item = (N, T)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut values = NamedValues::new();
        values.insert("a", 1);
        values.insert("b", 2);
        assert_eq!(values.insert("a", 3), Some(1));

        let names: Vec<&str> = values.names().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(values.get("a"), Some(&3));
    }

    #[test]
    fn test_remove_keeps_lookups_aligned() {
        let mut values: NamedValues<u32> = (0..100).map(|i| (format!("v{i}"), i)).collect();
        assert_eq!(values.remove("v10"), Some(10));
        assert_eq!(values.remove("v10"), None);
        assert!(!values.contains("v10"));

        assert_eq!(values.len(), 99);
        for i in (0..100).filter(|&i| i != 10) {
            assert_eq!(values.get(&format!("v{i}")), Some(&i));
        }

        values.insert("v10", 1000);
        assert_eq!(values.names().last(), Some("v10"));
        assert_eq!(values.get("v10"), Some(&1000));
    }

    #[test]
    fn test_equality_ignores_order() {
        let ab: NamedValues<u8> = [("a", 1), ("b", 2)].into_iter().collect();
        let ba: NamedValues<u8> = [("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(ab, ba);

        let other: NamedValues<u8> = [("a", 1), ("b", 3)].into_iter().collect();
        assert_ne!(ab, other);
    }

    #[test]
    fn test_remove() {
        let mut values: NamedValues<u8> = [("x", 1), ("y", 2)].into_iter().collect();
        assert_eq!(values.remove("x"), Some(1));
        assert_eq!(values.remove("x"), None);
        assert_eq!(values.len(), 1);
        assert!(values.contains("y"));
    }
}
