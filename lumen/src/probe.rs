//! Influence volumes: the regions within which a light probe's environment data is valid.

use core::fmt;

use euclid::vec3;
use manyfmt::Refmt as _;

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

use crate::camera::Camera;
use crate::light::{LightParameterError, check_nonnegative};
use crate::math::{
    Aab, Bound, Coordinate, Plane, ScaledRigid, Sphere, UniformMatrix, WorldPoint, WorldRotation,
    WorldVector,
};
use crate::util::{ConciseDebug, Scratch};

#[cfg(test)]
mod tests;

/// The shape of an [`InfluenceVolume`], without its parameters.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[expect(clippy::exhaustive_enums)]
pub enum AreaType {
    /// See [`SphereVolume`].
    #[default]
    Spherical,
    /// See [`OrientedBoxVolume`].
    OrientedBox,
}

/// The region within which a light probe's environment data is valid.
#[derive(Clone, Debug, PartialEq)]
#[expect(clippy::exhaustive_enums)]
pub enum InfluenceVolume {
    /// A sphere.
    Sphere(SphereVolume),
    /// A box which may be rotated and stretched.
    OrientedBox(OrientedBoxVolume),
}

impl InfluenceVolume {
    /// Constructs a volume of the given shape with the given center and radius.
    ///
    /// An oriented box is given a uniform scale equal to `radius`, and no rotation.
    #[inline]
    pub fn new(
        area_type: AreaType,
        center: WorldPoint,
        radius: Coordinate,
    ) -> Result<Self, LightParameterError> {
        Ok(match area_type {
            AreaType::Spherical => Self::Sphere(SphereVolume::new(center, radius)?),
            AreaType::OrientedBox => Self::OrientedBox(OrientedBoxVolume::new(
                center,
                vec3(radius, radius, radius),
                WorldRotation::identity(),
            )?),
        })
    }

    /// Returns the shape of this volume.
    #[inline]
    pub fn area_type(&self) -> AreaType {
        match self {
            Self::Sphere(_) => AreaType::Spherical,
            Self::OrientedBox(_) => AreaType::OrientedBox,
        }
    }

    /// Returns the center of the volume.
    #[inline]
    pub fn center(&self) -> WorldPoint {
        match self {
            Self::Sphere(v) => v.center(),
            Self::OrientedBox(v) => v.center(),
        }
    }

    /// Moves the volume, keeping its size and orientation.
    #[inline]
    pub fn set_center(&mut self, center: WorldPoint) {
        match self {
            Self::Sphere(v) => v.set_center(center),
            Self::OrientedBox(v) => v.set_center(center),
        }
    }

    /// Returns the radius: for a sphere, its radius; for an oriented box, its largest
    /// half-extent.
    #[inline]
    pub fn radius(&self) -> Coordinate {
        match self {
            Self::Sphere(v) => v.radius(),
            Self::OrientedBox(v) => v.radius(),
        }
    }

    /// Sets the radius: for a sphere, its radius; for an oriented box, all three
    /// half-extents.
    ///
    /// Returns an error, leaving the volume unchanged, if `radius` is negative or NaN.
    #[inline]
    pub fn set_radius(&mut self, radius: Coordinate) -> Result<(), LightParameterError> {
        match self {
            Self::Sphere(v) => v.set_radius(radius),
            Self::OrientedBox(v) => v.set_radius(radius),
        }
    }

    /// Returns the placement of the volume packed for shaders.
    #[inline]
    pub fn uniform_matrix(&self) -> UniformMatrix {
        match self {
            Self::Sphere(v) => v.uniform_matrix(),
            Self::OrientedBox(v) => v.uniform_matrix(),
        }
    }

    /// Returns whether the volume overlaps `aab`.
    #[inline]
    pub fn intersects_box(&self, aab: &Aab, scratch: &mut Scratch) -> bool {
        match self {
            Self::Sphere(v) => v.intersects_box(aab),
            Self::OrientedBox(v) => v.intersects_box(aab, scratch),
        }
    }

    /// Returns whether the volume overlaps `sphere`.
    #[inline]
    pub fn intersects_sphere(&self, sphere: &Sphere, scratch: &mut Scratch) -> bool {
        match self {
            Self::Sphere(v) => v.intersects_sphere(sphere),
            Self::OrientedBox(v) => v.intersects_sphere(sphere, scratch),
        }
    }

    /// Returns whether any of the volume may be within `camera`'s view.
    #[inline]
    pub fn intersects_frustum(&self, camera: &Camera, scratch: &mut Scratch) -> bool {
        match self {
            Self::Sphere(v) => v.intersects_frustum(camera),
            Self::OrientedBox(v) => v.intersects_frustum(camera, scratch),
        }
    }

    /// Returns whether the volume overlaps `bound`, whichever shape it is.
    #[inline]
    pub fn intersects_bound(&self, bound: &Bound, scratch: &mut Scratch) -> bool {
        match bound {
            Bound::Box(aab) => self.intersects_box(aab, scratch),
            Bound::Sphere(sphere) => self.intersects_sphere(sphere, scratch),
        }
    }
}

impl From<SphereVolume> for InfluenceVolume {
    #[inline]
    fn from(value: SphereVolume) -> Self {
        Self::Sphere(value)
    }
}

impl From<OrientedBoxVolume> for InfluenceVolume {
    #[inline]
    fn from(value: OrientedBoxVolume) -> Self {
        Self::OrientedBox(value)
    }
}

// -------------------------------------------------------------------------------------------------

/// A spherical [`InfluenceVolume`].
#[derive(Clone, PartialEq)]
pub struct SphereVolume {
    center: WorldPoint,
    radius: Coordinate,
    uniform_matrix: UniformMatrix,
}

impl SphereVolume {
    /// Constructs a sphere volume.
    ///
    /// Returns an error if `radius` is negative or NaN.
    #[inline]
    pub fn new(center: WorldPoint, radius: Coordinate) -> Result<Self, LightParameterError> {
        let mut volume = Self {
            center,
            radius: 0.0,
            uniform_matrix: UniformMatrix::from_translation(center),
        };
        volume.set_radius(radius)?;
        Ok(volume)
    }

    /// Returns the center.
    #[inline]
    pub fn center(&self) -> WorldPoint {
        self.center
    }

    /// Moves the sphere.
    #[inline]
    pub fn set_center(&mut self, center: WorldPoint) {
        self.center = center;
        self.uniform_matrix.set_translation(center);
    }

    /// Returns the radius.
    #[inline]
    pub fn radius(&self) -> Coordinate {
        self.radius
    }

    /// Sets the radius.
    ///
    /// Returns an error, leaving the volume unchanged, if `radius` is negative or NaN.
    #[inline]
    pub fn set_radius(&mut self, radius: Coordinate) -> Result<(), LightParameterError> {
        self.radius = check_nonnegative(radius, LightParameterError::NegativeExtent)?;
        self.uniform_matrix.set_scale(WorldVector::splat(self.radius));
        Ok(())
    }

    /// Returns the packing of an unrotated placement at the center, scaled by the radius
    /// on every axis.
    #[inline]
    pub fn uniform_matrix(&self) -> UniformMatrix {
        self.uniform_matrix
    }

    fn intersects_box(&self, aab: &Aab) -> bool {
        aab.intersects_sphere(self.center, self.radius)
    }

    fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        sphere.intersects_sphere(self.center, self.radius)
    }

    fn intersects_frustum(&self, camera: &Camera) -> bool {
        camera.frustum().intersects_sphere(self.center, self.radius)
    }
}

impl fmt::Debug for SphereVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SphereVolume")
            .field("center", &self.center.refmt(&ConciseDebug))
            .field("radius", &self.radius)
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------

/// An [`InfluenceVolume`] shaped like a box which may be rotated and stretched.
///
/// The box is the cube `[-1, 1]³` transformed by a [`ScaledRigid`]; the scale on each
/// axis is therefore the half-extent of the box along that axis.
#[derive(Clone, PartialEq)]
pub struct OrientedBoxVolume {
    transform: ScaledRigid,
    /// Derived from `transform` by [`Self::update_matrix()`], which every setter calls.
    uniform_matrix: UniformMatrix,
}

impl OrientedBoxVolume {
    /// Constructs an oriented box volume centered on `center`, with the given
    /// half-extents along its local axes, and those axes rotated by `rotation`.
    ///
    /// Returns an error if any extent is negative or NaN.
    #[inline]
    pub fn new(
        center: WorldPoint,
        extents: WorldVector,
        rotation: WorldRotation,
    ) -> Result<Self, LightParameterError> {
        let mut volume = Self::from_transform(ScaledRigid {
            translation: center.to_vector(),
            rotation,
            scale: vec3(1., 1., 1.),
        });
        volume.set_extents(extents)?;
        Ok(volume)
    }

    fn from_transform(transform: ScaledRigid) -> Self {
        let mut volume = Self {
            transform,
            uniform_matrix: UniformMatrix::IDENTITY,
        };
        volume.update_matrix();
        volume
    }

    fn update_matrix(&mut self) {
        self.uniform_matrix = UniformMatrix::from_scaled_rigid(&self.transform);
    }

    /// Returns the transform that places the unit cube.
    #[inline]
    pub fn transform(&self) -> &ScaledRigid {
        &self.transform
    }

    /// Returns the center.
    #[inline]
    pub fn center(&self) -> WorldPoint {
        self.transform.translation.to_point()
    }

    /// Moves the box.
    #[inline]
    pub fn set_center(&mut self, center: WorldPoint) {
        self.transform.translation = center.to_vector();
        self.update_matrix();
    }

    /// Returns the rotation of the box's axes.
    #[inline]
    pub fn rotation(&self) -> WorldRotation {
        self.transform.rotation
    }

    /// Rotates the box.
    #[inline]
    pub fn set_rotation(&mut self, rotation: WorldRotation) {
        self.transform.rotation = rotation;
        self.update_matrix();
    }

    /// Returns the half-extents along the box's local axes.
    #[inline]
    pub fn extents(&self) -> WorldVector {
        self.transform.scale
    }

    /// Sets the half-extents along the box's local axes.
    ///
    /// Returns an error, leaving the volume unchanged, if any extent is negative or NaN.
    #[inline]
    pub fn set_extents(&mut self, extents: WorldVector) -> Result<(), LightParameterError> {
        for extent in extents.to_array() {
            check_nonnegative(extent, LightParameterError::NegativeExtent)?;
        }
        self.transform.scale = extents;
        self.update_matrix();
        Ok(())
    }

    /// Returns the largest half-extent.
    #[inline]
    pub fn radius(&self) -> Coordinate {
        self.transform.max_scale()
    }

    /// Makes the box a cube whose half-extents are all `radius`.
    ///
    /// Returns an error, leaving the volume unchanged, if `radius` is negative or NaN.
    #[inline]
    pub fn set_radius(&mut self, radius: Coordinate) -> Result<(), LightParameterError> {
        self.set_extents(vec3(radius, radius, radius))
    }

    /// Returns the rotation, half-extents, and center packed for shaders.
    #[inline]
    pub fn uniform_matrix(&self) -> UniformMatrix {
        self.uniform_matrix
    }

    fn load_scaled_axes<'s>(&self, scratch: &'s mut Scratch) -> &'s [WorldVector; 3] {
        for (i, axis) in scratch.axes.iter_mut().enumerate() {
            *axis = self.uniform_matrix.scaled_axis(i);
        }
        &scratch.axes
    }

    /// Returns whether any part of the box is on the inner side of `plane`.
    ///
    /// The box's extent along the plane normal is the sum of the absolute projections
    /// of its scaled axes onto the normal.
    fn inside_plane(&self, plane: &Plane, axes: &[WorldVector; 3]) -> bool {
        let [a1, a2, a3] = axes;
        let n = plane.normal;
        let radius = a1.dot(n).abs() + a2.dot(n).abs() + a3.dot(n).abs();
        let distance = plane.pseudo_distance(self.center());
        distance >= -radius
    }

    fn intersects_box(&self, aab: &Aab, scratch: &mut Scratch) -> bool {
        let axes = *self.load_scaled_axes(scratch);
        aab.inward_planes()
            .iter()
            .all(|plane| self.inside_plane(plane, &axes))
    }

    fn intersects_sphere(&self, sphere: &Sphere, scratch: &mut Scratch) -> bool {
        let closest = self.closest_point(sphere.center, scratch);
        (closest - sphere.center).square_length() <= sphere.radius * sphere.radius
    }

    fn intersects_frustum(&self, camera: &Camera, scratch: &mut Scratch) -> bool {
        let axes = *self.load_scaled_axes(scratch);
        camera
            .frustum()
            .culling_order()
            .all(|plane| self.inside_plane(plane, &axes))
    }

    /// Returns the point of the box nearest to `point`.
    fn closest_point(&self, point: WorldPoint, scratch: &mut Scratch) -> WorldPoint {
        let [offset, closest, ..] = &mut scratch.vectors;
        *offset = point - self.center();
        *closest = self.transform.translation;
        let scale = self.transform.scale.to_array();
        for (axis, extent) in self.transform.rotation_axes().into_iter().zip(scale) {
            let distance = offset.dot(axis).clamp(-extent, extent);
            *closest += axis * distance;
        }
        closest.to_point()
    }
}

impl fmt::Debug for OrientedBoxVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrientedBoxVolume")
            .field("transform", &self.transform)
            .finish_non_exhaustive()
    }
}
