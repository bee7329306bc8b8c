//! Image geometry types.
//!
//! This module provides the physical-space description of an image grid:
//! origin, spacing, and direction, plus the index/physical mappings.

use crate::error::{ImageError, Result};
use crate::spatial::{Direction, Point, Spacing};

/// Geometry describing how image indices map to physical coordinates.
///
/// # Coordinate Systems
/// * **Index Space**: Discrete pixel/voxel indices (integer coordinates)
/// * **Physical Space**: Continuous coordinates in mm or other units
///
/// # Examples
/// ```rust
/// use ritk_core::image::ImageGeometry;
/// use ritk_core::spatial::{Point3, Spacing3, Direction3};
///
/// let geometry = ImageGeometry::new(
///     Point3::new(10.0, 0.0, 0.0),
///     Spacing3::new(2.0, 2.0, 2.0),
///     Direction3::identity(),
/// );
/// let point = geometry.index_to_physical_point([1, 0, 0]);
/// assert!((point[0] - 12.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageGeometry<const D: usize> {
    /// Physical coordinate of the first pixel (index 0, 0, ...).
    origin: Point<D>,
    /// Physical distance between pixels along each axis.
    spacing: Spacing<D>,
    /// Orientation of the image axes.
    direction: Direction<D>,
}

impl<const D: usize> ImageGeometry<D> {
    /// Create new image geometry.
    pub fn new(origin: Point<D>, spacing: Spacing<D>, direction: Direction<D>) -> Self {
        Self {
            origin,
            spacing,
            direction,
        }
    }

    /// Get the origin.
    pub fn origin(&self) -> &Point<D> {
        &self.origin
    }

    /// Get the spacing.
    pub fn spacing(&self) -> &Spacing<D> {
        &self.spacing
    }

    /// Get the direction.
    pub fn direction(&self) -> &Direction<D> {
        &self.direction
    }

    /// Set the origin.
    pub fn set_origin(&mut self, origin: Point<D>) {
        self.origin = origin;
    }

    /// Set the spacing.
    pub fn set_spacing(&mut self, spacing: Spacing<D>) {
        self.spacing = spacing;
    }

    /// Set the direction.
    pub fn set_direction(&mut self, direction: Direction<D>) {
        self.direction = direction;
    }

    /// Map a discrete pixel index to its physical point.
    pub fn index_to_physical_point(&self, index: [usize; D]) -> Point<D> {
        let continuous = Point::<D>::from(index.map(|i| i as f64));
        self.continuous_index_to_physical_point(&continuous)
    }

    /// Map a continuous index to a physical point.
    ///
    /// `point = origin + Direction * (index * spacing)`
    pub fn continuous_index_to_physical_point(&self, index: &Point<D>) -> Point<D> {
        let scaled = index.coords.component_mul(&self.spacing);
        self.origin + self.direction * scaled
    }

    /// Map a physical point to a continuous index.
    ///
    /// `index = (Direction^-1 * (point - origin)) / spacing`
    pub fn physical_point_to_continuous_index(&self, point: &Point<D>) -> Result<Point<D>> {
        let inv_dir = self
            .direction
            .try_inverse()
            .ok_or(ImageError::NonInvertibleDirection)?;
        let rotated = inv_dir * (*point - self.origin);
        Ok(Point::from(rotated.component_div(&self.spacing)))
    }

    /// Whether two geometries agree within `tolerance` in every component.
    pub fn is_close(&self, other: &Self, tolerance: f64) -> bool {
        (self.origin - other.origin).amax() <= tolerance
            && (self.spacing - other.spacing).amax() <= tolerance
            && (self.direction - other.direction).amax() <= tolerance
    }
}

impl<const D: usize> Default for ImageGeometry<D> {
    /// Zero origin, unit spacing, identity direction.
    fn default() -> Self {
        Self {
            origin: Point::origin(),
            spacing: Spacing::repeat(1.0),
            direction: Direction::identity(),
        }
    }
}
