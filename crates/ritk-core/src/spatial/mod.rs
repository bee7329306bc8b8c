//! Spatial types for representing points, vectors, spacing, and direction matrices.
//!
//! Geometry math runs on the CPU in `f64`; these are plain nalgebra aliases
//! so every nalgebra operation is available without wrapping.

use nalgebra::{Point as NaPoint, SMatrix, SVector};

/// A position in D-dimensional physical space.
pub type Point<const D: usize> = NaPoint<f64, D>;
/// A displacement in D-dimensional physical space.
pub type Vector<const D: usize> = SVector<f64, D>;
/// Physical distance between adjacent pixels along each axis.
pub type Spacing<const D: usize> = SVector<f64, D>;
/// Orientation of the image axes; column `i` is the direction of axis `i`.
pub type Direction<const D: usize> = SMatrix<f64, D, D>;

// Common type aliases for 2D and 3D
pub type Point2 = Point<2>;
pub type Point3 = Point<3>;
pub type Vector2 = Vector<2>;
pub type Vector3 = Vector<3>;
pub type Spacing2 = Spacing<2>;
pub type Spacing3 = Spacing<3>;
pub type Direction2 = Direction<2>;
pub type Direction3 = Direction<3>;
