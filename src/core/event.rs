//! Insertion-ordered field mapping for structured events

use super::context::FieldValue;

/// Reserved key holding the primary message of an event
pub const EVENT_KEY: &str = "event";

/// Reserved key holding an exception/backtrace payload
pub const EXC_INFO_KEY: &str = "exc_info";

/// An open mapping from field name to value, iterated in insertion order.
///
/// Insertion order is the flattening contract for rendered output, so the
/// storage is a plain vector rather than a hash map. Re-inserting an
/// existing key replaces the value in place and keeps the key's original
/// position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDict {
    entries: Vec<(String, FieldValue)>,
}

impl EventDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a field
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style insert
    #[must_use]
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Remove a field, returning its value
    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for EventDict {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = EventDict::new();
        for (k, v) in iter {
            dict.insert(k, v);
        }
        dict
    }
}
