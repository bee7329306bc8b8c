//! Embedding entry tables into an image's metadata dictionary.
//!
//! The table is stored as a tagged, versioned JSON document under a single
//! reserved key, so any codec that preserves the dictionary also preserves
//! the table.

use ritk_core::image::{MetaDataDictionary, MetaDataValue};
use serde::{Deserialize, Serialize};

use crate::entry::ObjectEntry;
use crate::error::{LabelMapError, Result};
use crate::table::EntryTable;

const FORMAT_TAG: &str = "ritk-object-map";
const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EncodedTable<'a> {
    format: &'a str,
    version: u32,
    entries: &'a EntryTable,
}

#[derive(Deserialize)]
struct DecodedTable {
    format: String,
    version: u32,
    entries: Vec<ObjectEntry>,
}

/// Converts between [`EntryTable`] and its metadata blob.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataBridge;

impl MetadataBridge {
    /// Default reserved dictionary key.
    pub const DEFAULT_KEY: &'static str = "ritk.labelmap.entries";

    /// Encode `table` as a metadata blob.
    pub fn serialize(table: &EntryTable) -> Result<String> {
        let encoded = EncodedTable {
            format: FORMAT_TAG,
            version: FORMAT_VERSION,
            entries: table,
        };
        serde_json::to_string(&encoded).map_err(|e| {
            LabelMapError::malformed_metadata(format!("failed to encode entry table: {}", e))
        })
    }

    /// Decode a blob produced by [`MetadataBridge::serialize`].
    pub fn deserialize(blob: &str) -> Result<EntryTable> {
        let decoded: DecodedTable = serde_json::from_str(blob)
            .map_err(|e| LabelMapError::malformed_metadata(format!("invalid entry table: {}", e)))?;

        if decoded.format != FORMAT_TAG {
            return Err(LabelMapError::malformed_metadata(format!(
                "unrecognized format tag {:?}",
                decoded.format
            )));
        }
        if decoded.version != FORMAT_VERSION {
            return Err(LabelMapError::malformed_metadata(format!(
                "unsupported version {}",
                decoded.version
            )));
        }
        if decoded.entries.is_empty() {
            return Err(LabelMapError::malformed_metadata(
                "entry table has no background entry",
            ));
        }
        if let Some(position) = decoded.entries.iter().position(|e| e.name().is_empty()) {
            return Err(LabelMapError::malformed_metadata(format!(
                "entry {} has an empty name",
                position
            )));
        }

        Ok(decoded.entries.into_iter().collect())
    }

    /// Store `table` in `dictionary` under `key`, replacing any previous table.
    pub fn embed(table: &EntryTable, dictionary: &mut MetaDataDictionary, key: &str) -> Result<()> {
        let blob = Self::serialize(table)?;
        dictionary.insert(key, MetaDataValue::Text(blob));
        Ok(())
    }

    /// Read the table stored under `key`.
    ///
    /// Returns `Ok(None)` only when the key is absent. A value that is
    /// present but not a valid table is an error, never a silent default.
    pub fn extract(dictionary: &MetaDataDictionary, key: &str) -> Result<Option<EntryTable>> {
        match dictionary.get(key) {
            None => Ok(None),
            Some(MetaDataValue::Text(blob)) => Self::deserialize(blob).map(Some),
            Some(_) => Err(LabelMapError::malformed_metadata(format!(
                "metadata key {:?} does not hold text",
                key
            ))),
        }
    }
}
