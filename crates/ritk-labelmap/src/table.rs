//! The ordered entry table of an object map.

use serde::{Deserialize, Serialize};

use crate::entry::ObjectEntry;

/// Ordered object entries; the entry at position `i` describes label `i`.
///
/// The table itself never touches pixels. Keeping labels aligned after a
/// [`remove_at`](EntryTable::remove_at) is the owning map's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryTable {
    entries: Vec<ObjectEntry>,
}

impl EntryTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table holding only `background` at position 0.
    pub fn with_background(background: ObjectEntry) -> Self {
        Self {
            entries: vec![background],
        }
    }

    /// Append an entry and return its label value.
    pub fn append(&mut self, entry: ObjectEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Remove the entry at `position`; later entries shift down by one.
    pub fn remove_at(&mut self, position: usize) -> Option<ObjectEntry> {
        if position >= self.entries.len() {
            return None;
        }
        Some(self.entries.remove(position))
    }

    /// Position of the first entry named exactly `name`.
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name() == name)
    }

    pub fn get(&self, position: usize) -> Option<&ObjectEntry> {
        self.entries.get(position)
    }

    pub fn get_mut(&mut self, position: usize) -> Option<&mut ObjectEntry> {
        self.entries.get_mut(position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObjectEntry> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[ObjectEntry] {
        &self.entries
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(ObjectEntry::name).collect()
    }
}

impl<'a> IntoIterator for &'a EntryTable {
    type Item = &'a ObjectEntry;
    type IntoIter = std::slice::Iter<'a, ObjectEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<ObjectEntry> for EntryTable {
    fn from_iter<I: IntoIterator<Item = ObjectEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
