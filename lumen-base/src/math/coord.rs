//! Numeric types used for coordinates and related quantities.

use euclid::{Point3D, Rotation3D, Vector3D};

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

/// Scalar type of every world-space quantity.
///
/// Light and probe parameters end up in shader uniforms, which are single precision, so
/// visibility tests are computed in the same precision the shader will see.
pub type Coordinate = f32;

/// Unit-of-measure type for world-space points and vectors.
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum World {}

/// A position in world space.
pub type WorldPoint = Point3D<Coordinate, World>;

/// A displacement or direction in world space.
pub type WorldVector = Vector3D<Coordinate, World>;

/// A rotation (unit quaternion) from world space to world space.
pub type WorldRotation = Rotation3D<Coordinate, World, World>;

/// Returns `vector` scaled to unit length, or unchanged if its length is zero
/// (or already exactly one).
///
/// This differs from [`Vector3D::normalize()`] in that a zero vector stays zero
/// instead of becoming NaN, which geometric tests rely on when two directions are
/// parallel.
///
/// ```
/// # extern crate lumen_base as lumen;
/// use lumen::math::{normalize_or_zero, WorldVector};
///
/// assert_eq!(normalize_or_zero(WorldVector::new(0., 3., 0.)), WorldVector::new(0., 1., 0.));
/// assert_eq!(normalize_or_zero(WorldVector::zero()), WorldVector::zero());
/// ```
#[inline]
pub fn normalize_or_zero(vector: WorldVector) -> WorldVector {
    // Dividing by the largest component first keeps the squared length finite and
    // nonzero for any finite nonzero input.
    let largest = vector.x.abs().max(vector.y.abs()).max(vector.z.abs());
    if largest == 0.0 || !largest.is_finite() || vector.square_length() == 1.0 {
        return vector;
    }
    let scaled = vector / largest;
    scaled / scaled.length()
}

/// Returns whether `vector` has unit length, within a tolerance suitable for values
/// that have been through a few single-precision operations.
#[inline]
pub fn is_unit_vector(vector: WorldVector) -> bool {
    (vector.square_length() - 1.0).abs() < 1e-4
}
