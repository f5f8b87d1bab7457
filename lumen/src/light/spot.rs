use core::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use core::fmt;

use euclid::{point3, vec3};
use manyfmt::Refmt as _;

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

use crate::camera::Camera;
use crate::light::{LightParameterError, check_nonnegative};
use crate::math::{
    Aab, Coordinate, Sphere, WorldPoint, WorldVector, is_unit_vector, normalize_or_zero,
};
use crate::util::{ConciseDebug, Scratch};

/// Light radiating from a point into a cone.
///
/// Within the inner angle of the cone the light is at full strength; it fades out
/// between the inner and outer angles, and reaches no farther than its range.
/// A range of zero means the light is not limited by distance.
#[derive(Clone, Copy, PartialEq)]
pub struct SpotLight {
    position: WorldPoint,
    /// Always of unit length.
    direction: WorldVector,
    inner_angle: f32,
    outer_angle: f32,
    range: Coordinate,
    /// `1 / range`, or zero when the range is zero.
    inv_range: Coordinate,
    angles: AngleParameters,
}

/// Quantities derived from the cone angles, for the cone intersection tests and
/// for shaders.
#[derive(Clone, Copy, Debug, PartialEq)]
struct AngleParameters {
    /// Cosine of the outer angle, possibly nudged down so it is distinguishable from the
    /// inner cosine after packing.
    outer_cos: f32,
    outer_sin: f32,
    outer_cos_sqr: f32,
    outer_sin_sqr: f32,
    outer_sin_rcp: f32,
    /// `trunc(cos(inner) × 1000) + outer_cos`.
    packed_cos: f32,
}

impl AngleParameters {
    fn new(inner_angle: f32, outer_angle: f32) -> Result<Self, LightParameterError> {
        let inner_cos = inner_angle.cos();
        let mut outer_cos = outer_angle.cos();

        // Angles close enough to truncate to the same value would make the inner and
        // outer cosines indistinguishable once packed.
        let packed_inner = (inner_cos * 1000.0) as i32;
        if packed_inner == (outer_cos * 1000.0) as i32 {
            outer_cos -= 0.001;
        }
        let packed_cos = packed_inner as f32 + outer_cos;
        if packed_cos == 0.0 {
            return Err(LightParameterError::DegenerateAngles);
        }

        let outer_sin = outer_angle.sin();
        Ok(Self {
            outer_cos,
            outer_sin,
            outer_cos_sqr: outer_cos * outer_cos,
            outer_sin_sqr: outer_sin * outer_sin,
            outer_sin_rcp: outer_sin.recip(),
            packed_cos,
        })
    }
}

fn check_angle(angle: f32) -> Result<f32, LightParameterError> {
    if (0.0..FRAC_PI_2).contains(&angle) {
        Ok(angle)
    } else {
        Err(LightParameterError::AngleOutOfRange(angle))
    }
}

impl SpotLight {
    /// Inner angle of a light created by [`SpotLight::default()`].
    pub const DEFAULT_INNER_ANGLE: f32 = FRAC_PI_4 / 8.0;
    /// Outer angle of a light created by [`SpotLight::default()`].
    pub const DEFAULT_OUTER_ANGLE: f32 = FRAC_PI_4 / 6.0;
    /// Range of a light created by [`SpotLight::default()`].
    pub const DEFAULT_RANGE: Coordinate = 100.0;

    /// Constructs a spot light with the default angles.
    ///
    /// Returns an error if `direction` is zero or `range` is negative.
    #[inline]
    pub fn new(
        position: WorldPoint,
        direction: WorldVector,
        range: Coordinate,
    ) -> Result<Self, LightParameterError> {
        let mut light = Self::default();
        light.set_position(position);
        light.set_direction(direction)?;
        light.set_range(range)?;
        Ok(light)
    }

    /// Sets both cone angles, builder-style.
    ///
    /// Returns an error if either angle is outside `[0, π/2)` or the pair is degenerate.
    #[inline]
    pub fn with_angles(mut self, inner: f32, outer: f32) -> Result<Self, LightParameterError> {
        let angles = AngleParameters::new(check_angle(inner)?, check_angle(outer)?)?;
        self.inner_angle = inner;
        self.outer_angle = outer;
        self.angles = angles;
        Ok(self)
    }

    /// Returns the position of the apex of the cone.
    #[inline]
    pub fn position(&self) -> WorldPoint {
        self.position
    }

    /// Moves the light.
    #[inline]
    pub fn set_position(&mut self, position: WorldPoint) {
        self.position = position;
    }

    /// Returns the unit vector along the axis of the cone.
    #[inline]
    pub fn direction(&self) -> WorldVector {
        self.direction
    }

    /// Points the light. `direction` is normalized before being stored.
    ///
    /// Returns an error, leaving the light unchanged, if `direction` is zero or NaN.
    #[inline]
    pub fn set_direction(&mut self, direction: WorldVector) -> Result<(), LightParameterError> {
        let normalized = normalize_or_zero(direction);
        if !is_unit_vector(normalized) {
            return Err(LightParameterError::ZeroDirection);
        }
        self.direction = normalized;
        Ok(())
    }

    /// Returns the range; zero if unlimited.
    #[inline]
    pub fn range(&self) -> Coordinate {
        self.range
    }

    /// Returns the reciprocal of the range, or zero if the range is zero.
    #[inline]
    pub fn inv_range(&self) -> Coordinate {
        self.inv_range
    }

    /// Sets how far the light reaches. Zero makes it unlimited.
    ///
    /// Returns an error, leaving the light unchanged, if `range` is negative or NaN.
    #[inline]
    pub fn set_range(&mut self, range: Coordinate) -> Result<(), LightParameterError> {
        let range = check_nonnegative(range, LightParameterError::NegativeRange)?;
        self.range = range;
        self.inv_range = if range != 0.0 { range.recip() } else { 0.0 };
        Ok(())
    }

    /// Returns the angle from the axis within which the light is at full strength.
    #[inline]
    pub fn inner_angle(&self) -> f32 {
        self.inner_angle
    }

    /// Sets the inner angle, in radians.
    ///
    /// Returns an error, leaving the light unchanged, if the angle is outside `[0, π/2)`
    /// or makes the packed cosine zero.
    #[inline]
    pub fn set_inner_angle(&mut self, angle: f32) -> Result<(), LightParameterError> {
        self.angles = AngleParameters::new(check_angle(angle)?, self.outer_angle)?;
        self.inner_angle = angle;
        Ok(())
    }

    /// Returns the angle from the axis beyond which the light has no effect.
    #[inline]
    pub fn outer_angle(&self) -> f32 {
        self.outer_angle
    }

    /// Sets the outer angle, in radians.
    ///
    /// Returns an error, leaving the light unchanged, if the angle is outside `[0, π/2)`
    /// or makes the packed cosine zero.
    #[inline]
    pub fn set_outer_angle(&mut self, angle: f32) -> Result<(), LightParameterError> {
        self.angles = AngleParameters::new(self.inner_angle, check_angle(angle)?)?;
        self.outer_angle = angle;
        Ok(())
    }

    /// Returns both cone angles' cosines packed into one value for shaders:
    /// the integer part is the inner cosine × 1000, truncated, and the fractional part
    /// is the outer cosine.
    #[inline]
    pub fn packed_angle_cos(&self) -> f32 {
        self.angles.packed_cos
    }

    /// Returns the cosine of the outer angle, as used by the intersection tests.
    #[inline]
    pub fn outer_angle_cos(&self) -> f32 {
        self.angles.outer_cos
    }

    /// Returns the sine of the outer angle.
    #[inline]
    pub fn outer_angle_sin(&self) -> f32 {
        self.angles.outer_sin
    }

    pub(crate) fn intersects_box(&self, aab: &Aab, scratch: &mut Scratch) -> bool {
        if self.range == 0.0 {
            return true;
        }
        if !aab.intersects_sphere(self.position, self.range) {
            return false;
        }
        let other_radius_sqr = aab.extents().square_length();
        self.cone_contains_sphere(aab.center(), other_radius_sqr.sqrt(), other_radius_sqr, scratch)
    }

    pub(crate) fn intersects_sphere(&self, sphere: &Sphere, scratch: &mut Scratch) -> bool {
        if self.range == 0.0 {
            return true;
        }
        if !sphere.intersects_sphere(self.position, self.range) {
            return false;
        }
        self.cone_contains_sphere(
            sphere.center,
            sphere.radius,
            sphere.radius * sphere.radius,
            scratch,
        )
    }

    /// Approximate cone-versus-sphere test.
    ///
    /// The comparisons must stay in exactly this order and form; results are expected to
    /// match other implementations of the same approximation bit for bit.
    fn cone_contains_sphere(
        &self,
        center: WorldPoint,
        radius: Coordinate,
        radius_sqr: Coordinate,
        scratch: &mut Scratch,
    ) -> bool {
        let [e_vec, u, d, _] = &mut scratch.vectors;

        // Apex of a cone with the same angle, pulled back far enough that it contains
        // every sphere of this radius touching the original cone.
        *e_vec = self.direction * (radius * self.angles.outer_sin_rcp);
        *u = self.position.to_vector() - *e_vec;
        *d = center.to_vector() - *u;

        let dsqr = d.dot(*d);
        let e = self.direction.dot(*d);

        if e > 0.0 && e * e >= dsqr * self.angles.outer_cos_sqr {
            *d = center - self.position;
            let dsqr = d.dot(*d);
            let e = -self.direction.dot(*d);

            if e > 0.0 && e * e >= dsqr * self.angles.outer_sin_sqr {
                // Behind the apex: only the sphere around the apex itself counts.
                dsqr <= radius_sqr
            } else {
                true
            }
        } else {
            false
        }
    }

    pub(crate) fn intersects_frustum(&self, camera: &Camera, scratch: &mut Scratch) -> bool {
        if self.range == 0.0 {
            // Unlimited range is not handled by the test below; never cull.
            return true;
        }
        let [far_point, perp, projected, _] = &mut scratch.vectors;
        *far_point = (self.position + self.direction * self.range).to_vector();
        let far_radius = (self.range / self.angles.outer_cos) * self.angles.outer_sin;

        for plane in camera.frustum().culling_order() {
            if plane.pseudo_distance(self.position) >= 0.0 {
                continue;
            }
            if plane.pseudo_distance(far_point.to_point()) >= 0.0 {
                continue;
            }
            // Both the apex and the center of the base are outside; try the point of the
            // base's rim that is farthest toward the inside of the plane.
            *perp = normalize_or_zero(self.direction.cross(plane.normal)).cross(self.direction);
            *projected = *far_point + *perp * far_radius;
            if plane.pseudo_distance(projected.to_point()) < 0.0 {
                return false;
            }
        }
        true
    }
}

/// A light at the origin pointing down −Y with a range of 100.
impl Default for SpotLight {
    #[inline]
    fn default() -> Self {
        let inner_angle = Self::DEFAULT_INNER_ANGLE;
        let outer_angle = Self::DEFAULT_OUTER_ANGLE;
        Self {
            position: point3(0., 0., 0.),
            direction: vec3(0., -1., 0.),
            inner_angle,
            outer_angle,
            range: Self::DEFAULT_RANGE,
            inv_range: Self::DEFAULT_RANGE.recip(),
            angles: match AngleParameters::new(inner_angle, outer_angle) {
                Ok(angles) => angles,
                Err(error) => unreachable!("default spot angles rejected: {error}"),
            },
        }
    }
}

impl fmt::Debug for SpotLight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotLight")
            .field("position", &self.position.refmt(&ConciseDebug))
            .field("direction", &self.direction.refmt(&ConciseDebug))
            .field("inner_angle", &self.inner_angle)
            .field("outer_angle", &self.outer_angle)
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}
