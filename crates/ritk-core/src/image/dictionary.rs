//! Open key/value metadata attached to an image.
//!
//! The dictionary travels with an image through generic I/O. Codecs are
//! expected to persist it verbatim, which is why it is serde-serialisable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MetaDataValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bytes(Vec<u8>),
}

impl MetaDataValue {
    /// The text payload, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<String> for MetaDataValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for MetaDataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i64> for MetaDataValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for MetaDataValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Vec<u8>> for MetaDataValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

/// Ordered key/value store carried alongside image pixels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaDataDictionary {
    entries: BTreeMap<String, MetaDataValue>,
}

impl MetaDataDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous value under `key`.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<MetaDataValue>,
    ) -> Option<MetaDataValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&MetaDataValue> {
        self.entries.get(key)
    }

    /// Text value under `key`; `None` if absent or not text.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(MetaDataValue::as_text)
    }

    pub fn remove(&mut self, key: &str) -> Option<MetaDataValue> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaDataValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut dict = MetaDataDictionary::new();
        assert!(dict.insert("modality", "MR").is_none());
        dict.insert("slices", 42i64);

        assert_eq!(dict.get_text("modality"), Some("MR"));
        assert_eq!(dict.get("slices"), Some(&MetaDataValue::Integer(42)));
        assert_eq!(dict.get_text("slices"), None);
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_insert_replaces() {
        let mut dict = MetaDataDictionary::new();
        dict.insert("key", 1.5f64);
        let previous = dict.insert("key", "text");
        assert_eq!(previous, Some(MetaDataValue::Float(1.5)));
        assert_eq!(dict.get_text("key"), Some("text"));
    }

    #[test]
    fn test_keys_are_ordered() {
        let mut dict = MetaDataDictionary::new();
        dict.insert("b", 1i64);
        dict.insert("a", 2i64);
        dict.insert("c", 3i64);
        assert_eq!(dict.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove() {
        let mut dict = MetaDataDictionary::new();
        dict.insert("key", vec![1u8, 2, 3]);
        assert!(dict.contains_key("key"));
        assert_eq!(dict.remove("key"), Some(MetaDataValue::Bytes(vec![1, 2, 3])));
        assert!(dict.is_empty());
    }
}
