pub mod error;
pub mod image;
pub mod spatial;

pub use error::{ImageError, Result};
pub use image::{ImageGeometry, LabelImage, MetaDataDictionary, MetaDataValue, RgbImage};
pub use spatial::{Direction, Point, Spacing, Vector};
