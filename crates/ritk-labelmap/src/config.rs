//! Object map configuration.

use serde::{Deserialize, Serialize};

use crate::bridge::MetadataBridge;

/// Configuration for an object map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMapConfig {
    /// Maximum number of entries, background included.
    pub max_objects: usize,
    /// Name of the entry synthesized for label 0.
    pub background_name: String,
    /// Prefix for generated names; label `n` becomes `"{prefix}{n}"`.
    pub default_name_prefix: String,
    /// Metadata dictionary key the entry table is embedded under.
    pub metadata_key: String,
}

impl Default for ObjectMapConfig {
    fn default() -> Self {
        Self {
            max_objects: 256,
            background_name: "Background".to_owned(),
            default_name_prefix: "Object".to_owned(),
            metadata_key: MetadataBridge::DEFAULT_KEY.to_owned(),
        }
    }
}

impl ObjectMapConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entry capacity.
    pub fn with_max_objects(mut self, max_objects: usize) -> Self {
        self.max_objects = max_objects;
        self
    }

    /// Set the background entry name.
    pub fn with_background_name(mut self, name: impl Into<String>) -> Self {
        self.background_name = name.into();
        self
    }

    /// Set the prefix used for generated entry names.
    pub fn with_default_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.default_name_prefix = prefix.into();
        self
    }

    /// Set the reserved metadata key.
    pub fn with_metadata_key(mut self, key: impl Into<String>) -> Self {
        self.metadata_key = key.into();
        self
    }

    /// Name for a new entry at `label`: `name` itself unless it is empty.
    pub fn entry_name(&self, name: &str, label: usize) -> String {
        if name.is_empty() {
            format!("{}{}", self.default_name_prefix, label)
        } else {
            name.to_owned()
        }
    }
}
