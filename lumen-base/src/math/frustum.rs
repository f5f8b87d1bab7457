//! Planes and view frustums.

use core::fmt;

use euclid::vec3;
use manyfmt::Refmt as _;

use crate::math::{Aab, Coordinate, WorldPoint, WorldVector};
use crate::util::ConciseDebug;

/// A plane in world space, `normal · p = constant`.
///
/// The normal is not required to be of unit length, but distances computed by
/// [`Plane::pseudo_distance()`] are only true distances if it is.
#[derive(Clone, Copy, PartialEq)]
#[expect(clippy::exhaustive_structs)]
pub struct Plane {
    /// Normal vector; points toward the positive side of the plane.
    pub normal: WorldVector,
    /// Dot product of the normal with any point on the plane.
    pub constant: Coordinate,
}

impl Plane {
    /// Constructs a [`Plane`] from its equation.
    #[inline]
    pub const fn new(normal: WorldVector, constant: Coordinate) -> Self {
        Self { normal, constant }
    }

    /// Constructs the [`Plane`] that passes through `point` and has the given normal.
    #[inline]
    pub fn from_point_normal(point: WorldPoint, normal: WorldVector) -> Self {
        Self {
            normal,
            constant: normal.dot(point.to_vector()),
        }
    }

    /// Signed distance from the plane to `point`, scaled by the length of the normal.
    ///
    /// Positive on the side the normal points toward.
    #[inline]
    pub fn pseudo_distance(&self, point: WorldPoint) -> Coordinate {
        self.normal.dot(point.to_vector()) - self.constant
    }
}

impl fmt::Debug for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plane")
            .field("normal", &self.normal.refmt(&ConciseDebug))
            .field("constant", &self.constant)
            .finish()
    }
}

/// Identifies one of the six planes of a [`Frustum`].
///
/// The numeric values are the plane indices used by [`Frustum::world_plane()`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(clippy::exhaustive_enums)]
#[repr(u8)]
pub enum FrustumSide {
    /// Plane through the left edge of the view.
    Left = 0,
    /// Plane through the right edge of the view.
    Right = 1,
    /// Plane through the bottom edge of the view.
    Bottom = 2,
    /// Plane through the top edge of the view.
    Top = 3,
    /// The far clipping plane.
    Far = 4,
    /// The near clipping plane.
    Near = 5,
}

impl FrustumSide {
    /// All six sides, in index order.
    pub const ALL: [Self; 6] = [
        Self::Left,
        Self::Right,
        Self::Bottom,
        Self::Top,
        Self::Far,
        Self::Near,
    ];

    /// The index of this side's plane.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// The six world-space planes bounding what a camera can see, with normals facing
/// into the visible region.
///
/// Frustums are computed by the camera owner; this type only stores and tests
/// against them.
#[derive(Clone, Copy, PartialEq)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    /// Constructs a [`Frustum`] from its planes, indexed as per [`FrustumSide`].
    #[inline]
    pub const fn new(planes: [Plane; 6]) -> Self {
        Self { planes }
    }

    /// Constructs the frustum of an orthographic camera looking toward −Z, whose visible
    /// region is exactly `aab`.
    pub fn orthographic(aab: Aab) -> Self {
        let l = aab.lower_bounds();
        let u = aab.upper_bounds();
        Self::new([
            Plane::new(vec3(1., 0., 0.), l.x),
            Plane::new(vec3(-1., 0., 0.), -u.x),
            Plane::new(vec3(0., 1., 0.), l.y),
            Plane::new(vec3(0., -1., 0.), -u.y),
            Plane::new(vec3(0., 0., 1.), l.z),
            Plane::new(vec3(0., 0., -1.), -u.z),
        ])
    }

    /// Returns the plane with the given index, in the range `0..6`.
    ///
    /// Panics if the index is out of range.
    #[inline]
    #[track_caller]
    pub fn world_plane(&self, index: usize) -> &Plane {
        &self.planes[index]
    }

    /// Returns the plane for the given side.
    #[inline]
    pub fn plane(&self, side: FrustumSide) -> &Plane {
        &self.planes[side.index()]
    }

    /// Returns all six planes.
    #[inline]
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    /// Iterates over the planes in the order culling tests visit them:
    /// near plane first, then far, then the four sides.
    #[inline]
    pub fn culling_order(&self) -> impl Iterator<Item = &Plane> {
        self.planes.iter().rev()
    }

    /// Returns whether a sphere is at least partly on the inner side of every plane.
    ///
    /// A sphere whose surface only touches a plane from outside counts as inside.
    #[inline]
    pub fn intersects_sphere(&self, center: WorldPoint, radius: Coordinate) -> bool {
        self.culling_order()
            .all(|plane| plane.pseudo_distance(center) >= -radius)
    }
}

impl fmt::Debug for Frustum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ds = f.debug_struct("Frustum");
        for side in FrustumSide::ALL {
            let plane = self.plane(side);
            ds.field(
                match side {
                    FrustumSide::Left => "left",
                    FrustumSide::Right => "right",
                    FrustumSide::Bottom => "bottom",
                    FrustumSide::Top => "top",
                    FrustumSide::Far => "far",
                    FrustumSide::Near => "near",
                },
                plane,
            );
        }
        ds.finish()
    }
}
