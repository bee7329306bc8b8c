//! Color images with three 8-bit channels.

use burn::tensor::backend::Backend;
use burn::tensor::{Int, Tensor};

use super::geometry::ImageGeometry;
use crate::error::{ImageError, Result};

/// RGB image stored as three integer channel tensors in `0..=255`.
#[derive(Debug, Clone)]
pub struct RgbImage<B: Backend, const D: usize> {
    red: Tensor<B, D, Int>,
    green: Tensor<B, D, Int>,
    blue: Tensor<B, D, Int>,
    geometry: ImageGeometry<D>,
}

impl<B: Backend, const D: usize> RgbImage<B, D> {
    /// Create an RGB image. All three channels must share one shape.
    pub fn new(
        red: Tensor<B, D, Int>,
        green: Tensor<B, D, Int>,
        blue: Tensor<B, D, Int>,
        geometry: ImageGeometry<D>,
    ) -> Result<Self> {
        let shape = red.dims();
        for channel in [&green, &blue] {
            if channel.dims() != shape {
                return Err(ImageError::shape_mismatch(&shape, &channel.dims()));
            }
        }
        Ok(Self {
            red,
            green,
            blue,
            geometry,
        })
    }

    pub fn red(&self) -> &Tensor<B, D, Int> {
        &self.red
    }

    pub fn green(&self) -> &Tensor<B, D, Int> {
        &self.green
    }

    pub fn blue(&self) -> &Tensor<B, D, Int> {
        &self.blue
    }

    pub fn geometry(&self) -> &ImageGeometry<D> {
        &self.geometry
    }

    pub fn shape(&self) -> [usize; D] {
        self.red.dims()
    }

    /// Color at `index`.
    pub fn pixel(&self, index: [usize; D]) -> Result<[u8; 3]> {
        let shape = self.shape();
        if index.iter().zip(shape.iter()).any(|(i, s)| i >= s) {
            return Err(ImageError::IndexOutOfBounds {
                index: index.to_vec(),
                shape: shape.to_vec(),
            });
        }
        let offset = index
            .iter()
            .zip(shape.iter())
            .fold(0, |acc, (i, extent)| acc * extent + i);
        Ok(self.to_rgb_vec()[offset])
    }

    /// All colors in row-major order.
    pub fn to_rgb_vec(&self) -> Vec<[u8; 3]> {
        let red = channel_values(&self.red);
        let green = channel_values(&self.green);
        let blue = channel_values(&self.blue);
        red.into_iter()
            .zip(green)
            .zip(blue)
            .map(|((r, g), b)| [r, g, b])
            .collect()
    }
}

fn channel_values<B: Backend, const D: usize>(channel: &Tensor<B, D, Int>) -> Vec<u8> {
    channel
        .to_data()
        .iter::<i64>()
        .map(|v| v.clamp(0, 255) as u8)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::tensor::TensorData;
    use burn_ndarray::NdArray;

    type Backend = NdArray<f32>;

    fn channel(values: Vec<i64>) -> Tensor<Backend, 2, Int> {
        let device = Default::default();
        Tensor::from_data(TensorData::new(values, [2, 2]), &device)
    }

    #[test]
    fn test_rgb_pixels() {
        let image = RgbImage::new(
            channel(vec![255, 0, 0, 10]),
            channel(vec![0, 255, 0, 20]),
            channel(vec![0, 0, 255, 30]),
            ImageGeometry::default(),
        )
        .unwrap();

        assert_eq!(image.shape(), [2, 2]);
        assert_eq!(image.pixel([0, 0]).unwrap(), [255, 0, 0]);
        assert_eq!(image.pixel([0, 1]).unwrap(), [0, 255, 0]);
        assert_eq!(image.pixel([1, 1]).unwrap(), [10, 20, 30]);
    }

    #[test]
    fn test_channel_shape_mismatch() {
        let device = Default::default();
        let wide = Tensor::<Backend, 2, Int>::zeros([2, 3], &device);
        let result = RgbImage::new(
            channel(vec![0; 4]),
            wide,
            channel(vec![0; 4]),
            ImageGeometry::default(),
        );
        assert!(matches!(result, Err(ImageError::ShapeMismatch { .. })));
    }
}
