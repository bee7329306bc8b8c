//! Object entries: the descriptive record for one label value.

use serde::{Deserialize, Serialize};

use crate::error::{LabelMapError, Result};

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Build a color from wide integers, clamping each channel to `0..=255`.
    pub fn from_clamped(red: i32, green: i32, blue: i32) -> Self {
        let clamp = |v: i32| v.clamp(0, 255) as u8;
        Self::new(clamp(red), clamp(green), clamp(blue))
    }
}

/// Rendering attributes carried through unchanged by every map operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayAttributes {
    /// Whether the object is drawn at all.
    pub visible: bool,
    pub copy_flag: u8,
    pub mirror_flag: u8,
    pub status_flag: u8,
    pub neighbors_used_flag: u8,
    /// Number of color shades between the start and end colors.
    pub shades: i32,
    pub opacity: f32,
    pub opacity_thickness: i32,
    pub blend_factor: f32,
}

impl Default for DisplayAttributes {
    fn default() -> Self {
        Self {
            visible: true,
            copy_flag: 0,
            mirror_flag: 0,
            status_flag: 0,
            neighbors_used_flag: 0,
            shades: 1,
            opacity: 0.5,
            opacity_thickness: 1,
            blend_factor: 0.0,
        }
    }
}

/// Per-axis placement of the object for rendering, in voxel units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub rotation: [i32; 3],
    pub translation: [i32; 3],
    pub center: [i32; 3],
    pub rotation_increment: [i32; 3],
    pub translation_increment: [i32; 3],
    pub minimum_coordinate: [i16; 3],
    pub maximum_coordinate: [i16; 3],
}

/// Descriptor for a single label: name, display colors, and attributes.
///
/// The entry does not know its own label value; that is its position in
/// the owning [`EntryTable`](crate::table::EntryTable).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectEntry {
    name: String,
    /// Color used when the label is rendered as RGB.
    end_color: Rgb,
    start_color: Rgb,
    pub display: DisplayAttributes,
    pub placement: Placement,
}

impl ObjectEntry {
    /// Name given to entries created without one.
    pub const UNNAMED: &'static str = "Unnamed";

    /// Create an entry with default attributes and black colors.
    ///
    /// An empty `name` is replaced by [`ObjectEntry::UNNAMED`].
    pub fn new(name: impl Into<String>) -> Self {
        let mut name = name.into();
        if name.is_empty() {
            name = Self::UNNAMED.to_owned();
        }
        Self {
            name,
            end_color: Rgb::BLACK,
            start_color: Rgb::BLACK,
            display: DisplayAttributes::default(),
            placement: Placement::default(),
        }
    }

    /// Create the background entry for label 0.
    pub fn background(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    pub fn with_end_color(mut self, color: Rgb) -> Self {
        self.end_color = color;
        self
    }

    pub fn with_start_color(mut self, color: Rgb) -> Self {
        self.start_color = color;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.display.opacity = opacity;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.display.visible = visible;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the entry. Names may not be empty.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(LabelMapError::invalid_argument("object entry names may not be empty"));
        }
        self.name = name;
        Ok(())
    }

    pub fn end_color(&self) -> Rgb {
        self.end_color
    }

    pub fn set_end_color(&mut self, color: Rgb) {
        self.end_color = color;
    }

    pub fn start_color(&self) -> Rgb {
        self.start_color
    }

    pub fn set_start_color(&mut self, color: Rgb) {
        self.start_color = color;
    }

    pub fn is_visible(&self) -> bool {
        self.display.visible
    }
}
