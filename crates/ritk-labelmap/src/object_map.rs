//! Object maps: a label image paired with its entry table.
//!
//! Pixel value `v` is described by `entries[v]`. Every mutation below keeps
//! that correspondence: pixels are relabeled with whole-tensor masks in the
//! same call that edits the table, and all validation happens before either
//! side is touched.

use burn::tensor::backend::Backend;
use burn::tensor::{Int, Tensor, TensorData};
use ritk_core::image::{ImageGeometry, LabelImage, RgbImage};
use ritk_core::spatial::Point;
use tracing::{debug, info, warn};

use crate::bridge::MetadataBridge;
use crate::config::ObjectMapConfig;
use crate::entry::{ObjectEntry, Rgb};
use crate::error::{LabelMapError, Result};
use crate::table::EntryTable;

/// Largest per-component difference tolerated between the geometry of a
/// source image and the map.
const GEOMETRY_TOLERANCE: f64 = 1e-6;

/// Label image plus the entry table that describes its labels.
///
/// # Type Parameters
/// * `B` - The backend holding the label tensor
/// * `D` - The dimensionality of the image
///
/// `Clone` is a deep copy; two maps never share an entry table.
///
/// # Examples
/// ```rust
/// use ritk_core::image::ImageGeometry;
/// use ritk_labelmap::ObjectMap;
/// use burn_ndarray::NdArray;
///
/// type Backend = NdArray<f32>;
///
/// let device = Default::default();
/// let mut map = ObjectMap::<Backend, 3>::new([4, 4, 4], ImageGeometry::default(), &device);
/// let liver = map.add_entry("liver").unwrap();
/// assert_eq!(liver, 1);
/// assert_eq!(map.number_of_objects(), 2);
/// assert_eq!(map.find_entry("liver"), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct ObjectMap<B: Backend, const D: usize> {
    image: LabelImage<B, D>,
    entries: EntryTable,
    config: ObjectMapConfig,
}

impl<B: Backend, const D: usize> ObjectMap<B, D> {
    /// Create an all-background map with default configuration.
    pub fn new(shape: [usize; D], geometry: ImageGeometry<D>, device: &B::Device) -> Self {
        Self::with_config(shape, geometry, device, ObjectMapConfig::default())
    }

    /// Create an all-background map.
    pub fn with_config(
        shape: [usize; D],
        geometry: ImageGeometry<D>,
        device: &B::Device,
        config: ObjectMapConfig,
    ) -> Self {
        let entries = EntryTable::with_background(ObjectEntry::background(&config.background_name));
        Self {
            image: LabelImage::zeros(shape, geometry, device),
            entries,
            config,
        }
    }

    /// Build a map from a label image with default configuration.
    ///
    /// See [`ObjectMap::from_image_with_config`].
    pub fn from_image(image: LabelImage<B, D>) -> Result<Self> {
        Self::from_image_with_config(image, ObjectMapConfig::default())
    }

    /// Build a map from a label image, adopting its pixels and geometry.
    ///
    /// If the image's metadata holds an embedded entry table it becomes the
    /// map's table; otherwise the map starts with a single background entry.
    /// An embedded table that cannot be decoded is reported as
    /// [`LabelMapError::MalformedMetadata`].
    ///
    /// Embedded tables are trusted: pixel labels are not checked against
    /// them here. Call [`ObjectMap::validate`] when the source is untrusted.
    pub fn from_image_with_config(image: LabelImage<B, D>, config: ObjectMapConfig) -> Result<Self> {
        let entries = match MetadataBridge::extract(image.metadata(), &config.metadata_key)? {
            Some(table) => {
                if table.len() > config.max_objects {
                    return Err(LabelMapError::CapacityExceeded {
                        limit: config.max_objects,
                    });
                }
                debug!("Adopted embedded entry table with {} entries", table.len());
                table
            }
            None => {
                debug!("No embedded entry table, starting from background only");
                EntryTable::with_background(ObjectEntry::background(&config.background_name))
            }
        };

        Ok(Self {
            image,
            entries,
            config,
        })
    }

    /// Replace this map's pixels, geometry, and entries with `image`.
    ///
    /// On error the map is left unchanged.
    pub fn image_to_object_map(&mut self, image: LabelImage<B, D>) -> Result<()> {
        *self = Self::from_image_with_config(image, self.config.clone())?;
        info!("Absorbed label image with {} objects", self.number_of_objects());
        Ok(())
    }

    /// Number of entries, background included.
    pub fn number_of_objects(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &EntryTable {
        &self.entries
    }

    pub fn config(&self) -> &ObjectMapConfig {
        &self.config
    }

    pub fn image(&self) -> &LabelImage<B, D> {
        &self.image
    }

    pub fn geometry(&self) -> &ImageGeometry<D> {
        self.image.geometry()
    }

    pub fn shape(&self) -> [usize; D] {
        self.image.shape()
    }

    /// Physical location of the pixel at `index`.
    pub fn index_to_physical_point(&self, index: [usize; D]) -> Point<D> {
        self.image.geometry().index_to_physical_point(index)
    }

    /// Entry describing `label`.
    pub fn entry(&self, label: usize) -> Option<&ObjectEntry> {
        self.entries.get(label)
    }

    /// Mutable access to the entry for `label`.
    ///
    /// Only entry content can change this way; the table shape cannot.
    pub fn entry_mut(&mut self, label: usize) -> Option<&mut ObjectEntry> {
        self.entries.get_mut(label)
    }

    /// Label of the first entry named exactly `name`.
    pub fn find_entry(&self, name: &str) -> Option<usize> {
        self.entries.find_by_name(name)
    }

    /// Declare a new label with no pixels assigned to it yet.
    ///
    /// An empty `name` is replaced by a generated one. Returns the new label.
    pub fn add_entry(&mut self, name: &str) -> Result<usize> {
        self.ensure_capacity()?;
        let label = self.entries.len();
        let name = self.config.entry_name(name, label);
        debug!("Added object entry {} ({})", label, name);
        self.entries.append(ObjectEntry::new(name));
        Ok(label)
    }

    /// Add a label covering every pixel of `source` equal to `value`.
    ///
    /// With `value == None` the largest value present in `source` is used.
    /// Matching pixels are relabeled to the new label, overwriting whatever
    /// they held before; `source` itself is not modified. The new entry gets
    /// `name` (or a generated one if empty) and `color` as its end color.
    ///
    /// `source` must share the map's shape and geometry.
    pub fn add_entry_from_image_pixel(
        &mut self,
        source: &LabelImage<B, D>,
        value: Option<i64>,
        name: &str,
        color: Rgb,
    ) -> Result<usize> {
        let shape = self.shape();
        if source.shape() != shape {
            return Err(LabelMapError::ShapeMismatch {
                expected: shape.to_vec(),
                actual: source.shape().to_vec(),
            });
        }
        if !source.geometry().is_close(self.geometry(), GEOMETRY_TOLERANCE) {
            return Err(LabelMapError::invalid_argument(
                "source image geometry does not match the object map",
            ));
        }
        self.ensure_capacity()?;

        let value = match value {
            Some(value) => value,
            None => source
                .max_label()
                .ok_or_else(|| LabelMapError::invalid_argument("source image has no pixels"))?,
        };

        let label = self.entries.len();
        let matched = source.data().clone().equal_elem(value);
        let relabeled = self.image.data().clone().mask_fill(matched, label as i64);
        self.image.set_data(relabeled)?;

        let name = self.config.entry_name(name, label);
        info!("Painted source value {} as object {} ({})", value, label, name);
        self.entries.append(ObjectEntry::new(name).with_end_color(color));

        self.debug_check_invariant();
        Ok(label)
    }

    /// Delete the entry named `name` and renumber the pixels to match.
    ///
    /// Pixels of the deleted label become background and every label above
    /// it moves down by one, mirroring the shift in the table. Returns the
    /// label that was removed, or [`LabelMapError::NotFound`] with nothing
    /// changed. The background entry cannot be deleted.
    pub fn delete_entry(&mut self, name: &str) -> Result<usize> {
        let position = match self.find_entry(name) {
            Some(position) => position,
            None => {
                warn!("Cannot delete object entry {:?}: not found", name);
                return Err(LabelMapError::not_found(name));
            }
        };
        if position == 0 {
            return Err(LabelMapError::invalid_argument(
                "the background entry cannot be deleted",
            ));
        }

        let data = self.image.data().clone();
        let label = position as i64;
        let deleted = data.clone().equal_elem(label);
        let above = data.clone().greater_elem(label);
        let shifted = data.clone().sub_scalar(1);
        let relabeled = data.mask_where(above, shifted).mask_fill(deleted, 0);
        self.image.set_data(relabeled)?;
        self.entries.remove_at(position);

        info!(
            "Deleted object entry {} ({}), {} objects remain",
            position,
            name,
            self.number_of_objects()
        );
        self.debug_check_invariant();
        Ok(position)
    }

    /// Rename the first entry named `old`. Returns its label.
    pub fn rename_entry(&mut self, old: &str, new: &str) -> Result<usize> {
        let label = self
            .find_entry(old)
            .ok_or_else(|| LabelMapError::not_found(old))?;
        if let Some(entry) = self.entries.get_mut(label) {
            entry.set_name(new)?;
        }
        debug!("Renamed object entry {} from {:?} to {:?}", label, old, new);
        Ok(label)
    }

    /// Set the display color of the first entry named `name`. Returns its label.
    pub fn set_entry_color(&mut self, name: &str, color: Rgb) -> Result<usize> {
        let label = self
            .find_entry(name)
            .ok_or_else(|| LabelMapError::not_found(name))?;
        if let Some(entry) = self.entries.get_mut(label) {
            entry.set_end_color(color);
        }
        Ok(label)
    }

    /// Extract one label into a new two-entry map.
    ///
    /// Pixels labeled `label` become 1, everything else 0. The result holds
    /// a copy of this map's background entry and of the picked entry, and
    /// shares the geometry but none of the metadata. `self` is unchanged.
    ///
    /// Label 0 is rejected: picking the background alone carries no object.
    pub fn pick_one_entry(&self, label: usize) -> Result<Self> {
        let n = self.number_of_objects();
        if label == 0 || label >= n {
            return Err(LabelMapError::invalid_argument(format!(
                "entry {} cannot be picked; valid entries are 1..{}",
                label, n
            )));
        }
        let (background, picked) = match (self.entries.get(0), self.entries.get(label)) {
            (Some(background), Some(picked)) => (background.clone(), picked.clone()),
            _ => {
                return Err(LabelMapError::invariant_violation(
                    "entry table is shorter than the object count",
                ))
            }
        };

        let isolated = self.image.data().clone().equal_elem(label as i64).int();
        let image = self.image.with_data(isolated)?;

        let mut entries = EntryTable::with_background(background);
        entries.append(picked);

        debug!("Picked object entry {} into a new map", label);
        Ok(Self {
            image,
            entries,
            config: self.config.clone(),
        })
    }

    /// Render the map as color, using each label's end color.
    ///
    /// Every pixel label must have an entry; see [`ObjectMap::validate`].
    pub fn to_rgb_image(&self) -> Result<RgbImage<B, D>> {
        self.debug_check_invariant();

        let shape = self.shape();
        let device = self.image.device();
        let flat: Tensor<B, 1, Int> = self.image.data().clone().reshape([self.image.num_pixels()]);

        let lookup = |channel: fn(&Rgb) -> u8| -> Tensor<B, D, Int> {
            let values: Vec<i64> = self
                .entries
                .iter()
                .map(|entry| channel(&entry.end_color()) as i64)
                .collect();
            let len = values.len();
            let table = Tensor::<B, 1, Int>::from_data(TensorData::new(values, [len]), &device);
            table.select(0, flat.clone()).reshape(shape)
        };

        let rgb = RgbImage::new(
            lookup(|c| c.red),
            lookup(|c| c.green),
            lookup(|c| c.blue),
            *self.geometry(),
        )?;
        Ok(rgb)
    }

    /// Embed the entry table in the label image's metadata.
    ///
    /// Other metadata keys are left untouched.
    pub fn place_entries_into_metadata(&mut self) -> Result<()> {
        MetadataBridge::embed(
            &self.entries,
            self.image.metadata_mut(),
            &self.config.metadata_key,
        )?;
        debug!(
            "Embedded {} entries under {:?}",
            self.entries.len(),
            self.config.metadata_key
        );
        Ok(())
    }

    /// Embed the entry table and hand the label image back for generic I/O.
    pub fn into_label_image(mut self) -> Result<LabelImage<B, D>> {
        self.place_entries_into_metadata()?;
        Ok(self.image)
    }

    /// Check that every pixel label has an entry.
    pub fn validate(&self) -> Result<()> {
        let n = self.entries.len();
        if n == 0 {
            return Err(LabelMapError::invariant_violation("entry table is empty"));
        }
        if let (Some(min), Some(max)) = (self.image.min_label(), self.image.max_label()) {
            if min < 0 || max >= n as i64 {
                return Err(LabelMapError::invariant_violation(format!(
                    "pixel labels span [{}, {}] but the table holds {} entries",
                    min, max, n
                )));
            }
        }
        Ok(())
    }

    fn ensure_capacity(&self) -> Result<()> {
        if self.entries.len() >= self.config.max_objects {
            return Err(LabelMapError::CapacityExceeded {
                limit: self.config.max_objects,
            });
        }
        Ok(())
    }

    fn debug_check_invariant(&self) {
        if cfg!(debug_assertions) {
            if let Err(err) = self.validate() {
                panic!("object map invariant broken: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;

    type Backend = NdArray<f32>;

    fn map_from(values: Vec<i64>, shape: [usize; 2], names: &[&str]) -> ObjectMap<Backend, 2> {
        let device = Default::default();
        let mut image =
            LabelImage::from_labels(values, shape, ImageGeometry::default(), &device).unwrap();
        let table: EntryTable = names.iter().map(|name| ObjectEntry::new(*name)).collect();
        MetadataBridge::embed(&table, image.metadata_mut(), MetadataBridge::DEFAULT_KEY).unwrap();
        ObjectMap::from_image(image).unwrap()
    }

    #[test]
    fn test_new_map_is_background_only() {
        let device = Default::default();
        let map = ObjectMap::<Backend, 2>::new([3, 3], ImageGeometry::default(), &device);
        assert_eq!(map.number_of_objects(), 1);
        assert_eq!(map.entry(0).unwrap().name(), "Background");
        assert!(map.image().labels().iter().all(|&v| v == 0));
        map.validate().unwrap();
    }

    #[test]
    fn test_add_entry_generates_name() {
        let device = Default::default();
        let mut map = ObjectMap::<Backend, 2>::new([2, 2], ImageGeometry::default(), &device);
        assert_eq!(map.add_entry("").unwrap(), 1);
        assert_eq!(map.entry(1).unwrap().name(), "Object1");
        assert_eq!(map.find_entry("Object1"), Some(1));
    }

    #[test]
    fn test_capacity_is_enforced() {
        let device = Default::default();
        let config = ObjectMapConfig::new().with_max_objects(2);
        let mut map =
            ObjectMap::<Backend, 2>::with_config([2, 2], ImageGeometry::default(), &device, config);
        map.add_entry("a").unwrap();
        let err = map.add_entry("b").unwrap_err();
        assert_eq!(err, LabelMapError::CapacityExceeded { limit: 2 });
        assert_eq!(map.number_of_objects(), 2);
    }

    #[test]
    fn test_delete_renumbers_pixels() {
        let mut map = map_from(vec![0, 1, 2, 3, 3, 2, 1, 0], [2, 4], &["bg", "a", "b", "c"]);
        assert_eq!(map.delete_entry("b").unwrap(), 2);
        assert_eq!(map.image().labels(), vec![0, 1, 0, 2, 2, 0, 1, 0]);
        assert_eq!(map.entries().names(), vec!["bg", "a", "c"]);
    }

    #[test]
    fn test_delete_missing_is_not_found_and_no_op() {
        let mut map = map_from(vec![0, 1, 1, 0], [2, 2], &["bg", "a"]);
        let err = map.delete_entry("missing").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(map.image().labels(), vec![0, 1, 1, 0]);
        assert_eq!(map.number_of_objects(), 2);
    }

    #[test]
    fn test_delete_background_is_rejected() {
        let mut map = map_from(vec![0, 1, 1, 0], [2, 2], &["bg", "a"]);
        assert!(matches!(
            map.delete_entry("bg"),
            Err(LabelMapError::InvalidArgument(_))
        ));
        assert_eq!(map.number_of_objects(), 2);
    }

    #[test]
    fn test_rename_and_recolor() {
        let mut map = map_from(vec![0, 1, 1, 0], [2, 2], &["bg", "a"]);
        assert_eq!(map.rename_entry("a", "aorta").unwrap(), 1);
        assert_eq!(map.find_entry("a"), None);
        assert_eq!(map.set_entry_color("aorta", Rgb::new(255, 0, 0)).unwrap(), 1);
        assert_eq!(map.entry(1).unwrap().end_color(), Rgb::new(255, 0, 0));
        assert!(map.rename_entry("aorta", "").is_err());
        assert!(map.rename_entry("missing", "x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_validate_reports_dangling_labels() {
        let device = Default::default();
        let image = LabelImage::<Backend, 2>::from_labels(
            vec![0, 5, 0, 0],
            [2, 2],
            ImageGeometry::default(),
            &device,
        )
        .unwrap();
        let map = ObjectMap::from_image(image).unwrap();
        assert!(matches!(
            map.validate(),
            Err(LabelMapError::InvariantViolation(_))
        ));
    }
}
