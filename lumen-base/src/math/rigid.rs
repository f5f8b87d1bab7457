use core::fmt;

use euclid::vec3;
use manyfmt::Refmt as _;

use crate::math::{Coordinate, WorldPoint, WorldRotation, WorldVector};

/// A transformation composed of a per-axis scale, followed by a rotation, followed by
/// a translation.
///
/// This is how an oriented box is placed in the world: the box `[-1, 1]³` is
/// stretched by `scale`, turned by `rotation`, and moved to `translation`.
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, PartialEq)]
pub struct ScaledRigid {
    /// Translation component. Applied last.
    pub translation: WorldVector,
    /// Rotation component. Applied after the scale.
    pub rotation: WorldRotation,
    /// Scale along each of the local axes. Applied first.
    pub scale: WorldVector,
}

impl ScaledRigid {
    /// The identity transform, which leaves points unchanged.
    #[inline]
    pub fn identity() -> Self {
        Self {
            translation: WorldVector::zero(),
            rotation: WorldRotation::identity(),
            scale: vec3(1., 1., 1.),
        }
    }

    /// Constructs a [`ScaledRigid`] that only performs translation.
    #[inline]
    pub fn from_translation(translation: WorldVector) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    /// The largest of the three scale factors.
    #[inline]
    pub fn max_scale(&self) -> Coordinate {
        self.scale.x.max(self.scale.y).max(self.scale.z)
    }

    /// Applies this transform to the given point.
    #[inline]
    pub fn transform_point(&self, point: WorldPoint) -> WorldPoint {
        let scaled = point.to_vector().component_mul(self.scale);
        (self.rotation.transform_vector3d(scaled) + self.translation).to_point()
    }

    /// Returns the images of the unit X, Y, and Z axes under the rotation alone.
    #[inline]
    pub fn rotation_axes(&self) -> [WorldVector; 3] {
        [
            self.rotation.transform_vector3d(vec3(1., 0., 0.)),
            self.rotation.transform_vector3d(vec3(0., 1., 0.)),
            self.rotation.transform_vector3d(vec3(0., 0., 1.)),
        ]
    }
}

impl Default for ScaledRigid {
    #[inline]
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for ScaledRigid {
    #[inline(never)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let &Self {
            translation,
            rotation,
            scale,
        } = self;
        let mut ds = f.debug_struct("ScaledRigid");
        ds.field(
            "translation",
            &translation.refmt(&crate::util::ConciseDebug),
        );
        if rotation != WorldRotation::identity() {
            ds.field("rotation", &rotation.refmt(&crate::util::ConciseDebug));
        }
        ds.field("scale", &scale.refmt(&crate::util::ConciseDebug));
        ds.finish()
    }
}
