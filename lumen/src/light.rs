//! Light sources, and the tests that decide whether they can affect something.

use alloc::string::String;
use core::fmt;
use core::sync::atomic::{self, AtomicU64};

use crate::camera::Camera;
use crate::math::{Aab, Bound, Coordinate, Rgba, Sphere, WorldPoint};
use crate::scene::Spatial;
use crate::util::Scratch;

mod directional;
pub use directional::DirectionalLight;
mod list;
pub use list::LightList;
mod point;
pub use point::PointLight;
mod probe;
pub use probe::{CubemapHandle, EnvironmentData, LightProbe};
mod spot;
pub use spot::SpotLight;


// -------------------------------------------------------------------------------------------------

/// Identifies a [`Light`] for the lifetime of the process.
///
/// Identity is what light filters cache per-camera results by. Cloning a [`Light`]
/// produces a light with a new identity; sharing one via
/// [`Arc`](alloc::sync::Arc) does not.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LightId(u64);

impl LightId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, atomic::Ordering::Relaxed))
    }
}

impl fmt::Debug for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LightId({})", self.0)
    }
}

/// The kind of a [`Light`], without its parameters.
///
/// The discriminants are the type ids that shaders use to tell lights apart.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(clippy::exhaustive_enums)]
#[repr(u8)]
pub enum LightType {
    /// See [`DirectionalLight`].
    Directional = 0,
    /// See [`PointLight`].
    Point = 1,
    /// See [`SpotLight`].
    Spot = 2,
    /// Uniform light with no position or direction.
    Ambient = 3,
    /// See [`LightProbe`].
    Probe = 4,
}

impl LightType {
    /// Returns the id shaders use for this kind of light.
    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }
}

/// The kind-specific parameters of a [`Light`].
#[derive(Clone, Debug, PartialEq)]
#[expect(clippy::exhaustive_enums)]
pub enum LightKind {
    /// Light from infinitely far away in one direction.
    Directional(DirectionalLight),
    /// Light radiating from a point.
    Point(PointLight),
    /// Light radiating from a point within a cone.
    Spot(SpotLight),
    /// Uniform light with no position or direction. It affects everything.
    Ambient,
    /// Baked environment lighting valid within a volume.
    Probe(LightProbe),
}

impl LightKind {
    /// Returns the kind without its parameters.
    #[inline]
    pub fn light_type(&self) -> LightType {
        match self {
            LightKind::Directional(_) => LightType::Directional,
            LightKind::Point(_) => LightType::Point,
            LightKind::Spot(_) => LightType::Spot,
            LightKind::Ambient => LightType::Ambient,
            LightKind::Probe(_) => LightType::Probe,
        }
    }
}

impl From<DirectionalLight> for LightKind {
    #[inline]
    fn from(value: DirectionalLight) -> Self {
        LightKind::Directional(value)
    }
}
impl From<PointLight> for LightKind {
    #[inline]
    fn from(value: PointLight) -> Self {
        LightKind::Point(value)
    }
}
impl From<SpotLight> for LightKind {
    #[inline]
    fn from(value: SpotLight) -> Self {
        LightKind::Spot(value)
    }
}
impl From<LightProbe> for LightKind {
    #[inline]
    fn from(value: LightProbe) -> Self {
        LightKind::Probe(value)
    }
}

// -------------------------------------------------------------------------------------------------

/// A light source in a scene.
///
/// Lights are owned by the scene graph and shared with renderable objects' light lists
/// as `Arc<Light>`. This crate never mutates a light; filters keep what they learn about
/// a light in their own caches, keyed by [`Light::id()`].
pub struct Light {
    id: LightId,
    name: Option<String>,
    color: Rgba,
    enabled: bool,
    kind: LightKind,
}

impl Light {
    /// Constructs an enabled, white, unnamed light.
    #[inline]
    pub fn new(kind: impl Into<LightKind>) -> Self {
        Self {
            id: LightId::next(),
            name: None,
            color: Rgba::WHITE,
            enabled: true,
            kind: kind.into(),
        }
    }

    /// Constructs an enabled ambient light of the given color.
    #[inline]
    pub fn ambient(color: Rgba) -> Self {
        let mut light = Self::new(LightKind::Ambient);
        light.color = color;
        light
    }

    /// Sets the color, builder-style.
    #[must_use]
    #[inline]
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Sets the name, builder-style.
    #[must_use]
    #[inline]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the identity of this light.
    #[inline]
    pub fn id(&self) -> LightId {
        self.id
    }

    /// Returns the name, if one was given.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets or clears the name.
    #[inline]
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Returns the color.
    #[inline]
    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Sets the color.
    #[inline]
    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    /// Returns whether this light is enabled. Filters skip disabled lights.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the light.
    #[inline]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns the kind-specific parameters.
    #[inline]
    pub fn kind(&self) -> &LightKind {
        &self.kind
    }

    /// Returns the kind-specific parameters for modification.
    #[inline]
    pub fn kind_mut(&mut self) -> &mut LightKind {
        &mut self.kind
    }

    /// Returns the kind of this light.
    #[inline]
    pub fn light_type(&self) -> LightType {
        self.kind.light_type()
    }

    /// Returns the probe parameters if this light is a probe.
    #[inline]
    pub fn as_probe(&self) -> Option<&LightProbe> {
        match &self.kind {
            LightKind::Probe(probe) => Some(probe),
            _ => None,
        }
    }

    /// Returns the probe parameters for modification if this light is a probe.
    #[inline]
    pub fn as_probe_mut(&mut self) -> Option<&mut LightProbe> {
        match &mut self.kind {
            LightKind::Probe(probe) => Some(probe),
            _ => None,
        }
    }

    /// Returns whether this light is a probe whose environment data is ready for use.
    #[inline]
    pub fn is_ready_probe(&self) -> bool {
        self.as_probe().is_some_and(LightProbe::is_ready)
    }

    /// Returns the world position of the light, if it has one.
    #[inline]
    pub fn position(&self) -> Option<WorldPoint> {
        match &self.kind {
            LightKind::Directional(_) | LightKind::Ambient => None,
            LightKind::Point(point) => Some(point.position()),
            LightKind::Spot(spot) => Some(spot.position()),
            LightKind::Probe(probe) => Some(probe.position()),
        }
    }

    /// Returns whether this light can illuminate any part of `aab`.
    #[inline]
    pub fn intersects_box(&self, aab: &Aab, scratch: &mut Scratch) -> bool {
        match &self.kind {
            LightKind::Directional(_) | LightKind::Ambient => true,
            LightKind::Point(point) => point.intersects_box(aab),
            LightKind::Spot(spot) => spot.intersects_box(aab, scratch),
            LightKind::Probe(probe) => probe.intersects_box(aab, scratch),
        }
    }

    /// Returns whether this light can illuminate any part of `sphere`.
    #[inline]
    pub fn intersects_sphere(&self, sphere: &Sphere, scratch: &mut Scratch) -> bool {
        match &self.kind {
            LightKind::Directional(_) | LightKind::Ambient => true,
            LightKind::Point(point) => point.intersects_sphere(sphere),
            LightKind::Spot(spot) => spot.intersects_sphere(sphere, scratch),
            LightKind::Probe(probe) => probe.intersects_sphere(sphere, scratch),
        }
    }

    /// Returns whether this light can illuminate anything `camera` sees.
    #[inline]
    pub fn intersects_frustum(&self, camera: &Camera, scratch: &mut Scratch) -> bool {
        match &self.kind {
            LightKind::Directional(_) | LightKind::Ambient => true,
            LightKind::Point(point) => point.intersects_frustum(camera),
            LightKind::Spot(spot) => spot.intersects_frustum(camera, scratch),
            LightKind::Probe(probe) => probe.intersects_frustum(camera, scratch),
        }
    }

    /// Returns the key by which lights affecting `owner` are sorted, nearest first.
    ///
    /// Lights without a position sort before all others with a key of −1. Otherwise
    /// the key is the squared distance from `owner`'s world bound to the light's
    /// position, or from its world translation if it has no bound.
    #[inline]
    pub fn distance_key(&self, owner: &dyn Spatial) -> Coordinate {
        let Some(position) = self.position() else {
            return -1.0;
        };
        match owner.world_bound() {
            Some(bound) => bound.distance_squared_to(position),
            None => (owner.world_translation() - position).square_length(),
        }
    }
}

/// Cloning produces an independent light with a new [`LightId`].
impl Clone for Light {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            id: LightId::next(),
            name: self.name.clone(),
            color: self.color,
            enabled: self.enabled,
            kind: self.kind.clone(),
        }
    }
}

impl fmt::Debug for Light {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            id,
            name,
            color,
            enabled,
            kind,
        } = self;
        let mut ds = f.debug_struct("Light");
        ds.field("id", id);
        if let Some(name) = name {
            ds.field("name", name);
        }
        ds.field("color", color);
        if !enabled {
            ds.field("enabled", enabled);
        }
        ds.field("kind", kind);
        ds.finish()
    }
}

// -------------------------------------------------------------------------------------------------

/// Reasons a light or probe parameter can be rejected.
///
/// A setter that returns this error leaves its light unchanged.
#[derive(Clone, Copy, Debug, PartialEq, displaydoc::Display)]
#[non_exhaustive]
pub enum LightParameterError {
    /// light radius must be nonnegative, not {0}
    NegativeRadius(f32),

    /// spot light range must be nonnegative, not {0}
    NegativeRange(f32),

    /// spot light angle must be at least 0 and less than π/2, not {0}
    AngleOutOfRange(f32),

    /// spot light angles produce a packed cosine of zero
    DegenerateAngles,

    /// light direction must be a nonzero vector
    ZeroDirection,

    /// probe influence volume extent must be nonnegative, not {0}
    NegativeExtent(f32),
}

impl core::error::Error for LightParameterError {}

/// Returns `Ok(value)` if it is not negative or NaN.
pub(crate) fn check_nonnegative(
    value: f32,
    error: fn(f32) -> LightParameterError,
) -> Result<f32, LightParameterError> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(error(value))
    }
}

/// Returns whether `light` can reach an object bounded by `bound`.
/// A missing or infinite bound is not tested.
pub(crate) fn intersects_bound(
    light: &Light,
    bound: Option<&Bound>,
    scratch: &mut Scratch,
) -> bool {
    match bound {
        Some(Bound::Box(aab)) => light.intersects_box(aab, scratch),
        Some(Bound::Sphere(sphere)) if !sphere.is_infinite() => {
            light.intersects_sphere(sphere, scratch)
        }
        _ => true,
    }
}
