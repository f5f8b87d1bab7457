use core::fmt;

use manyfmt::Refmt as _;

use crate::camera::Camera;
use crate::light::{LightParameterError, check_nonnegative};
use crate::math::{Aab, Coordinate, Sphere, WorldPoint};
use crate::util::ConciseDebug;

/// Light radiating in all directions from a point, fading out at a radius.
///
/// A radius of zero means the light is not attenuated, so it reaches everything.
#[derive(Clone, Copy, Default, PartialEq)]
pub struct PointLight {
    position: WorldPoint,
    radius: Coordinate,
    /// `1 / radius`, or zero when the radius is zero.
    inv_radius: Coordinate,
}

impl PointLight {
    /// Constructs a light at `position` which reaches as far as `radius`.
    ///
    /// Returns an error if `radius` is negative.
    #[inline]
    pub fn new(position: WorldPoint, radius: Coordinate) -> Result<Self, LightParameterError> {
        let mut light = Self {
            position,
            ..Self::default()
        };
        light.set_radius(radius)?;
        Ok(light)
    }

    /// Returns the position of the light.
    #[inline]
    pub fn position(&self) -> WorldPoint {
        self.position
    }

    /// Moves the light.
    #[inline]
    pub fn set_position(&mut self, position: WorldPoint) {
        self.position = position;
    }

    /// Returns the radius of influence; zero if unlimited.
    #[inline]
    pub fn radius(&self) -> Coordinate {
        self.radius
    }

    /// Returns the reciprocal of the radius, or zero if the radius is zero.
    /// Shaders use this to compute attenuation.
    #[inline]
    pub fn inv_radius(&self) -> Coordinate {
        self.inv_radius
    }

    /// Sets the radius of influence. Zero makes the light unattenuated.
    ///
    /// Returns an error, leaving the light unchanged, if `radius` is negative or NaN.
    #[inline]
    pub fn set_radius(&mut self, radius: Coordinate) -> Result<(), LightParameterError> {
        let radius = check_nonnegative(radius, LightParameterError::NegativeRadius)?;
        self.radius = radius;
        self.inv_radius = if radius != 0.0 { radius.recip() } else { 0.0 };
        Ok(())
    }

    pub(crate) fn intersects_box(&self, aab: &Aab) -> bool {
        self.radius == 0.0 || aab.intersects_sphere(self.position, self.radius)
    }

    pub(crate) fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        self.radius == 0.0 || sphere.intersects_sphere(self.position, self.radius)
    }

    pub(crate) fn intersects_frustum(&self, camera: &Camera) -> bool {
        self.radius == 0.0 || camera.frustum().intersects_sphere(self.position, self.radius)
    }
}

impl fmt::Debug for PointLight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointLight")
            .field("position", &self.position.refmt(&ConciseDebug))
            .field("radius", &self.radius)
            .finish_non_exhaustive()
    }
}
