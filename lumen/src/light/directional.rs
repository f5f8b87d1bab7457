use core::fmt;

use euclid::vec3;
use manyfmt::Refmt as _;

use crate::light::LightParameterError;
use crate::math::{WorldVector, is_unit_vector, normalize_or_zero};
use crate::util::ConciseDebug;

/// Light from infinitely far away, arriving from a single direction.
///
/// It has no position, so it can affect everything.
#[derive(Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Always of unit length.
    direction: WorldVector,
}

impl DirectionalLight {
    /// Constructs a light shining along `direction`, which need not be normalized.
    ///
    /// Returns an error if `direction` is zero.
    #[inline]
    pub fn new(direction: WorldVector) -> Result<Self, LightParameterError> {
        let mut light = Self::default();
        light.set_direction(direction)?;
        Ok(light)
    }

    /// Returns the unit vector pointing in the direction the light travels.
    #[inline]
    pub fn direction(&self) -> WorldVector {
        self.direction
    }

    /// Sets the direction the light travels. It is normalized before being stored.
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
}

/// Points straight down.
impl Default for DirectionalLight {
    #[inline]
    fn default() -> Self {
        Self {
            direction: vec3(0., -1., 0.),
        }
    }
}

impl fmt::Debug for DirectionalLight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectionalLight")
            .field("direction", &self.direction.refmt(&ConciseDebug))
            .finish()
    }
}
