use alloc::vec::Vec;
use core::fmt;

use manyfmt::Refmt as _;

use crate::camera::Camera;
use crate::light::LightParameterError;
use crate::math::{Aab, Coordinate, ShCoefficient, Sphere, UniformMatrix, WorldPoint};
use crate::probe::{AreaType, InfluenceVolume, SphereVolume};
use crate::util::{ConciseDebug, Scratch};

/// Identifies a prefiltered environment cubemap owned by the rendering backend.
///
/// This crate never looks inside the map; it only carries the handle from the baking
/// process to the shader.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(clippy::exhaustive_structs)]
pub struct CubemapHandle(pub u64);

/// Baked environment lighting for a [`LightProbe`], as produced by an external baking
/// process or read back from storage.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct EnvironmentData {
    /// Spherical-harmonics coefficients of the irradiance, lowest order first.
    /// [`None`] if they were never computed.
    pub sh_coefficients: Option<Vec<ShCoefficient>>,
    /// The prefiltered radiance cubemap.
    pub prefiltered_map: Option<CubemapHandle>,
    /// Number of mip levels in the prefiltered map.
    pub mip_count: u32,
}

impl EnvironmentData {
    /// Constructs environment data from its parts.
    #[inline]
    pub fn new(
        sh_coefficients: Option<Vec<ShCoefficient>>,
        prefiltered_map: Option<CubemapHandle>,
        mip_count: u32,
    ) -> Self {
        Self {
            sh_coefficients,
            prefiltered_map,
            mip_count,
        }
    }
}

/// Baked environment lighting, valid within an [`InfluenceVolume`].
///
/// A probe is not [ready](Self::is_ready) until its environment data has been loaded;
/// blending strategies treat a probe that is not ready as absent.
#[derive(Clone, PartialEq)]
pub struct LightProbe {
    position: WorldPoint,
    volume: InfluenceVolume,
    ready: bool,
    sh_coefficients: Vec<ShCoefficient>,
    prefiltered_map: Option<CubemapHandle>,
    mip_count: u32,
}

impl LightProbe {
    /// Number of spherical-harmonics coefficients in a complete set (third order).
    pub const SH_COEFFICIENT_COUNT: usize = 9;

    /// Constructs a probe at `position` with the given influence volume, which is moved
    /// to be centered on `position`.
    #[inline]
    pub fn new(position: WorldPoint, mut volume: InfluenceVolume) -> Self {
        volume.set_center(position);
        Self {
            position,
            volume,
            ready: false,
            sh_coefficients: Vec::new(),
            prefiltered_map: None,
            mip_count: 0,
        }
    }

    /// Returns the position of the probe.
    #[inline]
    pub fn position(&self) -> WorldPoint {
        self.position
    }

    /// Moves the probe and the center of its influence volume.
    #[inline]
    pub fn set_position(&mut self, position: WorldPoint) {
        self.position = position;
        self.volume.set_center(position);
    }

    /// Returns the influence volume.
    #[inline]
    pub fn volume(&self) -> &InfluenceVolume {
        &self.volume
    }

    /// Returns the influence volume for modification.
    ///
    /// Moving the volume this way does not move the probe.
    #[inline]
    pub fn volume_mut(&mut self) -> &mut InfluenceVolume {
        &mut self.volume
    }

    /// Returns the shape of the influence volume.
    #[inline]
    pub fn area_type(&self) -> AreaType {
        self.volume.area_type()
    }

    /// Replaces the influence volume with one of the given shape, keeping its center and
    /// radius. Does nothing if the shape is unchanged.
    #[inline]
    pub fn set_area_type(&mut self, area_type: AreaType) -> Result<(), LightParameterError> {
        if area_type != self.volume.area_type() {
            self.volume =
                InfluenceVolume::new(area_type, self.volume.center(), self.volume.radius())?;
        }
        Ok(())
    }

    /// Returns whether the environment data is available for shading.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Marks the environment data as available or not.
    #[inline]
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// Installs baked environment data.
    ///
    /// If the data lacks spherical-harmonics coefficients, the probe is left not
    /// ready and a warning is logged, since it must be baked again before it can be used.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn load_environment(&mut self, data: EnvironmentData) {
        let EnvironmentData {
            sh_coefficients,
            prefiltered_map,
            mip_count,
        } = data;
        self.prefiltered_map = prefiltered_map;
        self.mip_count = mip_count;
        match sh_coefficients {
            Some(coefficients) => {
                self.sh_coefficients = coefficients;
                self.ready = true;
            }
            None => {
                self.sh_coefficients.clear();
                self.ready = false;
                log::warn!(
                    "light probe at {:?} is missing spherical harmonics coefficients; \
                    it must be baked again before it can be used",
                    self.position.refmt(&ConciseDebug)
                );
            }
        }
    }

    /// Returns the spherical-harmonics coefficients, which are empty until loaded.
    #[inline]
    pub fn sh_coefficients(&self) -> &[ShCoefficient] {
        &self.sh_coefficients
    }

    /// Returns the prefiltered environment map, if any.
    #[inline]
    pub fn prefiltered_map(&self) -> Option<CubemapHandle> {
        self.prefiltered_map
    }

    /// Returns the number of mip levels of the prefiltered environment map.
    #[inline]
    pub fn mip_count(&self) -> u32 {
        self.mip_count
    }

    /// Returns the placement of the influence volume packed for shaders, with
    /// `mip_count + 1 / radius` stored in the bottom right element.
    #[inline]
    pub fn uniform_matrix(&self) -> UniformMatrix {
        let mut matrix = self.volume.uniform_matrix();
        matrix.set(
            3,
            3,
            self.mip_count as Coordinate + self.volume.radius().recip(),
        );
        matrix
    }

    pub(crate) fn intersects_box(&self, aab: &Aab, scratch: &mut Scratch) -> bool {
        self.volume.intersects_box(aab, scratch)
    }

    pub(crate) fn intersects_sphere(&self, sphere: &Sphere, scratch: &mut Scratch) -> bool {
        self.volume.intersects_sphere(sphere, scratch)
    }

    /// Returns whether any of the influence volume may be within `camera`'s view.
    #[inline]
    pub fn intersects_frustum(&self, camera: &Camera, scratch: &mut Scratch) -> bool {
        self.volume.intersects_frustum(camera, scratch)
    }
}

/// A probe at the origin with a spherical influence volume of radius 1, not ready.
impl Default for LightProbe {
    #[inline]
    fn default() -> Self {
        let volume = match SphereVolume::new(WorldPoint::origin(), 1.0) {
            Ok(volume) => volume,
            Err(error) => unreachable!("default probe volume rejected: {error}"),
        };
        Self::new(WorldPoint::origin(), volume.into())
    }
}

impl fmt::Debug for LightProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightProbe")
            .field("position", &self.position.refmt(&ConciseDebug))
            .field("volume", &self.volume)
            .field("ready", &self.ready)
            .field("mip_count", &self.mip_count)
            .finish_non_exhaustive()
    }
}
