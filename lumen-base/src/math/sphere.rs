use core::fmt;

use manyfmt::Refmt as _;

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

use crate::math::{Aab, Coordinate, WorldPoint};
use crate::util::ConciseDebug;

/// A sphere, used as the world bound of renderable objects and as the influence region
/// of point lights.
///
/// The radius may be [`Coordinate::INFINITY`]; such a bound is considered to contain
/// everything, and light filtering skips bound tests against it.
#[derive(Clone, Copy, PartialEq)]
#[expect(clippy::exhaustive_structs)]
pub struct Sphere {
    /// Center point.
    pub center: WorldPoint,
    /// Radius; should be nonnegative.
    pub radius: Coordinate,
}

impl Sphere {
    /// Constructs a [`Sphere`].
    #[inline]
    pub const fn new(center: WorldPoint, radius: Coordinate) -> Self {
        Self { center, radius }
    }

    /// Returns whether the radius is infinite.
    #[inline]
    pub fn is_infinite(&self) -> bool {
        self.radius.is_infinite()
    }

    /// Returns whether the point lies within the sphere, including its surface.
    #[inline]
    pub fn contains(&self, point: WorldPoint) -> bool {
        (point - self.center).square_length() <= self.radius * self.radius
    }

    /// Returns whether the other sphere, given by center and radius, touches this one
    /// (touching at a single point counts).
    #[inline]
    pub fn intersects_sphere(&self, center: WorldPoint, radius: Coordinate) -> bool {
        let sum = self.radius + radius;
        (center - self.center).square_length() <= sum * sum
    }

    /// Squared distance from `point` to the surface of the sphere, or zero if the sphere
    /// contains the point.
    #[inline]
    pub fn distance_squared_to(&self, point: WorldPoint) -> Coordinate {
        let outside = ((point - self.center).length() - self.radius).max(0.0);
        outside * outside
    }
}

impl fmt::Debug for Sphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sphere")
            .field("center", &self.center.refmt(&ConciseDebug))
            .field("radius", &self.radius)
            .finish()
    }
}

/// The world-space bounding volume of a renderable object.
#[derive(Clone, Copy, Debug, PartialEq)]
#[expect(clippy::exhaustive_enums)]
pub enum Bound {
    /// An axis-aligned box.
    Box(Aab),
    /// A sphere, which may be infinite.
    Sphere(Sphere),
}

impl Bound {
    /// The center of the bound.
    #[inline]
    pub fn center(&self) -> WorldPoint {
        match self {
            Bound::Box(aab) => aab.center(),
            Bound::Sphere(sphere) => sphere.center,
        }
    }

    /// Squared distance from `point` to the nearest point of the bound,
    /// or zero if the point is within it.
    #[inline]
    pub fn distance_squared_to(&self, point: WorldPoint) -> Coordinate {
        match self {
            Bound::Box(aab) => aab.distance_squared_to(point),
            Bound::Sphere(sphere) => sphere.distance_squared_to(point),
        }
    }
}

impl From<Aab> for Bound {
    #[inline]
    fn from(value: Aab) -> Self {
        Bound::Box(value)
    }
}

impl From<Sphere> for Bound {
    #[inline]
    fn from(value: Sphere) -> Self {
        Bound::Sphere(value)
    }
}
