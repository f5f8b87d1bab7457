use core::fmt;

use euclid::{Point3D, Vector3D};

use crate::math::{Coordinate, Plane, WorldPoint, WorldVector};

/// Axis-Aligned Box data type, used as the world bound of renderable objects.
///
/// The boundary is considered part of the box for all intersection tests.
#[derive(Copy, Clone, PartialEq)]
pub struct Aab {
    // TODO: Consider what to do about equality-but-not-equivalence of negative zero.
    lower_bounds: WorldPoint,
    upper_bounds: WorldPoint,
}

impl Aab {
    /// Constructs an [`Aab`] from individual coordinates.
    #[inline]
    #[track_caller]
    pub fn new(
        lx: Coordinate,
        hx: Coordinate,
        ly: Coordinate,
        hy: Coordinate,
        lz: Coordinate,
        hz: Coordinate,
    ) -> Self {
        Self::from_lower_upper(Point3D::new(lx, ly, lz), Point3D::new(hx, hy, hz))
    }

    /// Constructs an [`Aab`] from most-negative and most-positive corner points.
    ///
    /// Panics if the points are not in the proper order or if they are NaN.
    #[inline]
    #[track_caller]
    pub fn from_lower_upper(
        lower_bounds: impl Into<WorldPoint>,
        upper_bounds: impl Into<WorldPoint>,
    ) -> Self {
        let lower_bounds = lower_bounds.into();
        let upper_bounds = upper_bounds.into();
        match Self::checked_from_lower_upper(lower_bounds, upper_bounds) {
            Some(aab) => aab,
            None => panic!(
                "invalid AAB points that are misordered or NaN: \
                lower {lower_bounds:?} upper {upper_bounds:?}"
            ),
        }
    }

    /// Constructs an [`Aab`] from its center and its half-size on each axis.
    ///
    /// Panics if any extent is negative or NaN.
    ///
    /// ```
    /// # extern crate lumen_base as lumen;
    /// use lumen::math::{Aab, WorldPoint, WorldVector};
    ///
    /// let aab = Aab::from_center_extents(WorldPoint::new(1., 2., 3.), WorldVector::new(1., 1., 2.));
    /// assert_eq!(aab, Aab::new(0., 2., 1., 3., 1., 5.));
    /// ```
    #[inline]
    #[track_caller]
    pub fn from_center_extents(center: WorldPoint, extents: WorldVector) -> Self {
        Self::from_lower_upper(center - extents, center + extents)
    }

    /// Constructs an [`Aab`] from most-negative and most-positive corner points.
    ///
    /// Returns [`None`] if the points are not in the proper order or if they are NaN.
    pub fn checked_from_lower_upper(
        lower_bounds: WorldPoint,
        upper_bounds: WorldPoint,
    ) -> Option<Self> {
        if lower_bounds.x <= upper_bounds.x
            && lower_bounds.y <= upper_bounds.y
            && lower_bounds.z <= upper_bounds.z
        {
            Some(Self {
                lower_bounds,
                upper_bounds,
            })
        } else {
            None
        }
    }

    /// The most negative corner of the box.
    #[inline]
    pub const fn lower_bounds(&self) -> WorldPoint {
        self.lower_bounds
    }

    /// The most positive corner of the box.
    #[inline]
    pub const fn upper_bounds(&self) -> WorldPoint {
        self.upper_bounds
    }

    /// The center of the enclosed volume.
    ///
    /// ```
    /// # extern crate lumen_base as lumen;
    /// use lumen::math::{Aab, WorldPoint};
    ///
    /// let aab = Aab::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    /// assert_eq!(aab.center(), WorldPoint::new(1.5, 3.5, 5.5));
    /// ```
    #[inline]
    pub fn center(&self) -> WorldPoint {
        (self.lower_bounds + self.upper_bounds.to_vector()) * 0.5
    }

    /// Half of the size of the box on each axis.
    #[inline]
    pub fn extents(&self) -> WorldVector {
        (self.upper_bounds - self.lower_bounds) * 0.5
    }

    /// Returns whether the sphere with the given center and radius touches this box.
    ///
    /// This is Arvo's test: the squared distances by which the center lies outside the
    /// box on each axis are subtracted from the squared radius, and what remains must be
    /// strictly positive. Consequently, a sphere of radius zero never intersects,
    /// even when its center is inside the box.
    #[inline]
    pub fn intersects_sphere(&self, center: WorldPoint, radius: Coordinate) -> bool {
        let mut remaining = radius * radius;
        for (c, min, max) in [
            (center.x, self.lower_bounds.x, self.upper_bounds.x),
            (center.y, self.lower_bounds.y, self.upper_bounds.y),
            (center.z, self.lower_bounds.z, self.upper_bounds.z),
        ] {
            if c < min {
                remaining -= (c - min) * (c - min);
            } else if c > max {
                remaining -= (c - max) * (c - max);
            }
        }
        remaining > 0.0
    }

    /// Returns the point within the box that is closest to `point`.
    #[inline]
    pub fn closest_point(&self, point: WorldPoint) -> WorldPoint {
        point.clamp(self.lower_bounds, self.upper_bounds)
    }

    /// Squared distance from `point` to the nearest point of the box, or zero if the
    /// box contains the point.
    #[inline]
    pub fn distance_squared_to(&self, point: WorldPoint) -> Coordinate {
        (self.closest_point(point) - point).square_length()
    }

    /// The six planes bounding this box, with normals facing into it, in the order
    /// −Z, +Z, −Y, +Y, −X, +X (by the face each plane lies on, read as “max Z” first).
    ///
    /// A point is inside the box exactly when its [`Plane::pseudo_distance()`] is
    /// nonnegative for all six.
    pub fn inward_planes(&self) -> [Plane; 6] {
        let l = self.lower_bounds;
        let u = self.upper_bounds;
        [
            Plane::new(Vector3D::new(0., 0., -1.), -u.z),
            Plane::new(Vector3D::new(0., 0., 1.), l.z),
            Plane::new(Vector3D::new(0., -1., 0.), -u.y),
            Plane::new(Vector3D::new(0., 1., 0.), l.y),
            Plane::new(Vector3D::new(-1., 0., 0.), -u.x),
            Plane::new(Vector3D::new(1., 0., 0.), l.x),
        ]
    }
}

impl fmt::Debug for Aab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Aab {
            lower_bounds: l,
            upper_bounds: u,
        } = *self;
        f.debug_tuple("Aab")
            .field(&(l.x..=u.x))
            .field(&(l.y..=u.y))
            .field(&(l.z..=u.z))
            .finish()
    }
}

/// [`Aab`] rejects NaN values, so it can implement [`Eq`]
/// even though it contains floats.
impl Eq for Aab {}
