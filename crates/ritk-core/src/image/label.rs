//! Integer label images.
//!
//! A [`LabelImage`] holds one non-negative integer per pixel together with
//! the physical geometry of the grid and an open metadata dictionary.

use burn::tensor::backend::Backend;
use burn::tensor::{ElementConversion, Int, Tensor, TensorData};
use std::ops::Range;

use super::dictionary::MetaDataDictionary;
use super::geometry::ImageGeometry;
use crate::error::{ImageError, Result};

/// Label image with physical geometry and a metadata sidecar.
///
/// Pixels are stored in a `Tensor<B, D, Int>` in row-major order, so the
/// last axis varies fastest. All bulk relabeling is done with tensor ops.
///
/// # Examples
/// ```rust
/// use ritk_core::image::{ImageGeometry, LabelImage};
/// use burn_ndarray::NdArray;
///
/// type Backend = NdArray<f32>;
///
/// let device = Default::default();
/// let image = LabelImage::<Backend, 2>::from_labels(
///     vec![0, 1, 1, 2],
///     [2, 2],
///     ImageGeometry::default(),
///     &device,
/// ).unwrap();
/// assert_eq!(image.pixel([1, 1]).unwrap(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct LabelImage<B: Backend, const D: usize> {
    data: Tensor<B, D, Int>,
    geometry: ImageGeometry<D>,
    metadata: MetaDataDictionary,
}

impl<B: Backend, const D: usize> LabelImage<B, D> {
    /// Wrap an existing label tensor with an empty metadata dictionary.
    pub fn new(data: Tensor<B, D, Int>, geometry: ImageGeometry<D>) -> Self {
        Self {
            data,
            geometry,
            metadata: MetaDataDictionary::new(),
        }
    }

    /// Create an image with every pixel set to 0.
    pub fn zeros(shape: [usize; D], geometry: ImageGeometry<D>, device: &B::Device) -> Self {
        Self::new(Tensor::zeros(shape, device), geometry)
    }

    /// Create an image from row-major label values.
    pub fn from_labels(
        values: Vec<i64>,
        shape: [usize; D],
        geometry: ImageGeometry<D>,
        device: &B::Device,
    ) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if values.len() != expected {
            return Err(ImageError::shape_mismatch(&[expected], &[values.len()]));
        }
        let data = Tensor::<B, D, Int>::from_data(TensorData::new(values, shape), device);
        Ok(Self::new(data, geometry))
    }

    /// Reassemble an image from its parts.
    pub fn from_parts(
        data: Tensor<B, D, Int>,
        geometry: ImageGeometry<D>,
        metadata: MetaDataDictionary,
    ) -> Self {
        Self {
            data,
            geometry,
            metadata,
        }
    }

    /// Split the image into pixel data, geometry, and metadata.
    pub fn into_parts(self) -> (Tensor<B, D, Int>, ImageGeometry<D>, MetaDataDictionary) {
        (self.data, self.geometry, self.metadata)
    }

    /// A new image on the same grid holding `data` and no metadata.
    pub fn with_data(&self, data: Tensor<B, D, Int>) -> Result<Self> {
        ensure_same_shape(&self.shape(), &data.dims())?;
        Ok(Self::new(data, self.geometry))
    }

    /// Get the label tensor.
    pub fn data(&self) -> &Tensor<B, D, Int> {
        &self.data
    }

    /// Replace the label tensor. The shape must not change.
    pub fn set_data(&mut self, data: Tensor<B, D, Int>) -> Result<()> {
        ensure_same_shape(&self.shape(), &data.dims())?;
        self.data = data;
        Ok(())
    }

    pub fn geometry(&self) -> &ImageGeometry<D> {
        &self.geometry
    }

    pub fn geometry_mut(&mut self) -> &mut ImageGeometry<D> {
        &mut self.geometry
    }

    pub fn metadata(&self) -> &MetaDataDictionary {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut MetaDataDictionary {
        &mut self.metadata
    }

    /// Get the image shape as an array.
    pub fn shape(&self) -> [usize; D] {
        self.data.dims()
    }

    pub fn num_pixels(&self) -> usize {
        self.shape().iter().product()
    }

    pub fn device(&self) -> B::Device {
        self.data.device()
    }

    /// Read the label at `index`.
    pub fn pixel(&self, index: [usize; D]) -> Result<i64> {
        let ranges = self.pixel_ranges(index)?;
        let value = self
            .data
            .clone()
            .slice(ranges)
            .into_data()
            .iter::<i64>()
            .next()
            .unwrap_or_default();
        Ok(value)
    }

    /// Write `value` at `index`.
    pub fn set_pixel(&mut self, index: [usize; D], value: i64) -> Result<()> {
        let ranges = self.pixel_ranges(index)?;
        let device = self.data.device();
        let patch =
            Tensor::<B, D, Int>::from_data(TensorData::new(vec![value], [1usize; D]), &device);
        self.data = self.data.clone().slice_assign(ranges, patch);
        Ok(())
    }

    /// All labels in row-major order.
    pub fn labels(&self) -> Vec<i64> {
        self.data.to_data().iter::<i64>().collect()
    }

    /// Enumerate every pixel index in row-major order.
    pub fn coordinates(&self) -> Coordinates<D> {
        Coordinates::new(self.shape())
    }

    /// Smallest label present, `None` for an empty image.
    pub fn min_label(&self) -> Option<i64> {
        if self.num_pixels() == 0 {
            return None;
        }
        Some(self.data.clone().min().into_scalar().elem::<i64>())
    }

    /// Largest label present, `None` for an empty image.
    pub fn max_label(&self) -> Option<i64> {
        if self.num_pixels() == 0 {
            return None;
        }
        Some(self.data.clone().max().into_scalar().elem::<i64>())
    }

    fn pixel_ranges(&self, index: [usize; D]) -> Result<[Range<usize>; D]> {
        let shape = self.shape();
        if index.iter().zip(shape.iter()).any(|(i, s)| i >= s) {
            return Err(ImageError::IndexOutOfBounds {
                index: index.to_vec(),
                shape: shape.to_vec(),
            });
        }
        Ok(std::array::from_fn(|axis| index[axis]..index[axis] + 1))
    }
}

fn ensure_same_shape(expected: &[usize], actual: &[usize]) -> Result<()> {
    if expected != actual {
        return Err(ImageError::shape_mismatch(expected, actual));
    }
    Ok(())
}

/// Row-major iterator over every index of a grid.
#[derive(Debug, Clone)]
pub struct Coordinates<const D: usize> {
    shape: [usize; D],
    next: Option<[usize; D]>,
}

impl<const D: usize> Coordinates<D> {
    pub fn new(shape: [usize; D]) -> Self {
        let next = if shape.iter().all(|&extent| extent > 0) {
            Some([0; D])
        } else {
            None
        };
        Self { shape, next }
    }
}

impl<const D: usize> Iterator for Coordinates<D> {
    type Item = [usize; D];

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let mut index = current;
        let mut axis = D;
        self.next = loop {
            if axis == 0 {
                break None;
            }
            axis -= 1;
            index[axis] += 1;
            if index[axis] < self.shape[axis] {
                break Some(index);
            }
            index[axis] = 0;
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;

    type Backend = NdArray<f32>;

    fn ramp(shape: [usize; 2]) -> LabelImage<Backend, 2> {
        let device = Default::default();
        let values = (0..shape.iter().product::<usize>() as i64).collect();
        LabelImage::from_labels(values, shape, ImageGeometry::default(), &device).unwrap()
    }

    #[test]
    fn test_zeros() {
        let device = Default::default();
        let image = LabelImage::<Backend, 3>::zeros([2, 3, 4], ImageGeometry::default(), &device);
        assert_eq!(image.shape(), [2, 3, 4]);
        assert_eq!(image.num_pixels(), 24);
        assert!(image.labels().iter().all(|&v| v == 0));
        assert!(image.metadata().is_empty());
    }

    #[test]
    fn test_from_labels_rejects_wrong_length() {
        let device = Default::default();
        let result = LabelImage::<Backend, 2>::from_labels(
            vec![0, 1, 2],
            [2, 2],
            ImageGeometry::default(),
            &device,
        );
        assert!(matches!(result, Err(ImageError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_pixel_is_row_major() {
        let image = ramp([3, 4]);
        assert_eq!(image.pixel([0, 0]).unwrap(), 0);
        assert_eq!(image.pixel([0, 3]).unwrap(), 3);
        assert_eq!(image.pixel([2, 1]).unwrap(), 9);
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let image = ramp([3, 4]);
        assert!(matches!(
            image.pixel([3, 0]),
            Err(ImageError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_set_pixel() {
        let mut image = ramp([2, 2]);
        image.set_pixel([1, 0], 7).unwrap();
        assert_eq!(image.labels(), vec![0, 1, 7, 3]);
    }

    #[test]
    fn test_min_max() {
        let image = ramp([2, 3]);
        assert_eq!(image.min_label(), Some(0));
        assert_eq!(image.max_label(), Some(5));
    }

    #[test]
    fn test_set_data_rejects_new_shape() {
        let mut image = ramp([2, 2]);
        let device = Default::default();
        let other = Tensor::<Backend, 2, Int>::zeros([3, 3], &device);
        assert!(image.set_data(other).is_err());
    }

    #[test]
    fn test_coordinates_row_major() {
        let coords: Vec<_> = Coordinates::new([2, 3]).collect();
        assert_eq!(
            coords,
            vec![[0, 0], [0, 1], [0, 2], [1, 0], [1, 1], [1, 2]]
        );
    }

    #[test]
    fn test_coordinates_empty_shape() {
        assert_eq!(Coordinates::new([0, 3]).count(), 0);
    }

    #[test]
    fn test_coordinates_agree_with_labels() {
        let image = ramp([3, 2]);
        let labels = image.labels();
        for (offset, index) in image.coordinates().enumerate() {
            assert_eq!(image.pixel(index).unwrap(), labels[offset]);
        }
    }
}
