//! Labeled object maps.
//!
//! An [`ObjectMap`] pairs an integer [`LabelImage`](ritk_core::image::LabelImage)
//! with an [`EntryTable`]: pixel value `v` is described by the entry at
//! position `v`. Every mutating operation keeps pixel labels and table
//! positions in step, including the renumbering that follows a deletion.

pub mod bridge;
pub mod config;
pub mod entry;
pub mod error;
pub mod object_map;
pub mod table;

pub use bridge::MetadataBridge;
pub use config::ObjectMapConfig;
pub use entry::{DisplayAttributes, ObjectEntry, Placement, Rgb};
pub use error::{LabelMapError, Result};
pub use object_map::ObjectMap;
pub use table::EntryTable;
