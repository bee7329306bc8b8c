//! Image types and operations.
//!
//! This module provides the label and color image containers used by
//! segmentation workflows, together with their physical geometry and the
//! open metadata dictionary that travels with them through I/O.

pub mod dictionary;
pub mod geometry;
pub mod label;
pub mod rgb;

pub use dictionary::{MetaDataDictionary, MetaDataValue};
pub use geometry::ImageGeometry;
pub use label::{Coordinates, LabelImage};
pub use rgb::RgbImage;
