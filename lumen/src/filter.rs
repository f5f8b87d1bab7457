//! Choosing, for each renderable object, the lights that affect it.

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use hashbrown::HashMap;

use crate::blend::{ProbeBlendingStrategy, WeightedProbeBlending};
use crate::camera::Camera;
use crate::light::{LightId, LightList, LightType, intersects_bound};
use crate::scene::Geometry;
use crate::util::ScratchPool;

#[cfg(test)]
mod tests;

/// Decides which of an object's lights are passed on to shading.
///
/// A renderer calls [`set_camera()`](Self::set_camera) whenever the view changes, then
/// [`filter_lights()`](Self::filter_lights) for every object it draws.
pub trait LightFilter: fmt::Debug {
    /// Sets the camera that subsequent filtering culls against.
    ///
    /// Anything the filter has remembered about the previous camera is forgotten.
    fn set_camera(&mut self, camera: &Camera);

    /// Appends to `output` the lights from `geometry`'s world light list which can
    /// affect it as seen by the current camera.
    ///
    /// May panic if [`set_camera()`](Self::set_camera) has never been called.
    fn filter_lights(&mut self, geometry: &dyn Geometry, output: &mut LightList);
}

// -------------------------------------------------------------------------------------------------

/// Per-camera memo of which lights intersect the view frustum.
///
/// Each light's frustum test runs at most once per camera, however many objects it
/// appears in the light list of.
#[derive(Clone, Debug, Default)]
pub struct FrustumCache {
    results: HashMap<LightId, bool>,
    /// Number of frustum tests actually run since construction.
    misses: u64,
}

impl FrustumCache {
    /// Constructs an empty cache.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the remembered result for `light`, or computes it with `test` and
    /// remembers it.
    #[inline]
    pub fn get_or_compute(&mut self, light: LightId, test: impl FnOnce() -> bool) -> bool {
        *self.results.entry(light).or_insert_with(|| {
            self.misses += 1;
            test()
        })
    }

    /// Returns the remembered result for `light`, if any.
    #[inline]
    pub fn get(&self, light: LightId) -> Option<bool> {
        self.results.get(&light).copied()
    }

    /// Forgets every result.
    #[inline]
    pub fn clear(&mut self) {
        self.results.clear();
    }

    /// Returns the number of lights with a remembered result.
    #[inline]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns whether there are no remembered results.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the number of frustum tests that have been run, as opposed to answered
    /// from memory, over the life of this cache.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

// -------------------------------------------------------------------------------------------------

/// The standard [`LightFilter`].
///
/// For each light in an object's world light list, in order, it:
///
/// 1. skips the light if it is disabled;
/// 2. skips it if it cannot be seen by the camera (remembered per camera in a
///    [`FrustumCache`]);
/// 3. skips it if it cannot reach the object's world bound (a box, or a finite sphere;
///    objects with no bound or an infinite one are not tested);
/// 4. passes a probe to the [`ProbeBlendingStrategy`], or appends any other light to the
///    output.
///
/// Finally it lets the strategy append the probes it chose.
pub struct DefaultLightFilter {
    camera: Option<Camera>,
    cache: FrustumCache,
    strategy: Box<dyn ProbeBlendingStrategy>,
    scratch: ScratchPool,
}

impl DefaultLightFilter {
    /// Constructs a filter which blends up to three probes per object, using
    /// [`WeightedProbeBlending`].
    #[inline]
    pub fn new() -> Self {
        Self::with_strategy(WeightedProbeBlending::new())
    }

    /// Constructs a filter which uses the given probe blending strategy.
    #[inline]
    pub fn with_strategy(strategy: impl ProbeBlendingStrategy + 'static) -> Self {
        Self::with_boxed_strategy(Box::new(strategy))
    }

    /// Constructs a filter which uses the given probe blending strategy.
    #[inline]
    pub fn with_boxed_strategy(strategy: Box<dyn ProbeBlendingStrategy>) -> Self {
        Self {
            camera: None,
            cache: FrustumCache::new(),
            strategy,
            scratch: ScratchPool::new(),
        }
    }

    /// Returns the camera most recently given to [`LightFilter::set_camera()`].
    #[inline]
    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    /// Returns the frustum test memo for the current camera.
    #[inline]
    pub fn frustum_cache(&self) -> &FrustumCache {
        &self.cache
    }
}

impl Default for DefaultLightFilter {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl LightFilter for DefaultLightFilter {
    #[allow(clippy::missing_inline_in_public_items)]
    fn set_camera(&mut self, camera: &Camera) {
        self.cache.clear();
        self.camera = Some(camera.clone());
    }

    #[allow(clippy::missing_inline_in_public_items)]
    fn filter_lights(&mut self, geometry: &dyn Geometry, output: &mut LightList) {
        let Some(camera) = &self.camera else {
            panic!("DefaultLightFilter::filter_lights() called before set_camera()");
        };
        let bound = geometry.world_bound();

        for light in geometry.world_light_list() {
            if !light.is_enabled() {
                continue;
            }

            let mut scratch = self.scratch.acquire();
            let in_view = self.cache.get_or_compute(light.id(), || {
                light.intersects_frustum(camera, &mut scratch)
            });
            if !in_view {
                log::trace!("{:?} culled by frustum", light.id());
                continue;
            }
            if !intersects_bound(light, bound.as_ref(), &mut scratch) {
                log::trace!("{:?} does not reach {bound:?}", light.id());
                continue;
            }
            drop(scratch);

            if light.light_type() == LightType::Probe {
                self.strategy.register_probe(Arc::clone(light));
            } else {
                output.push(Arc::clone(light));
            }
        }

        self.strategy.populate_probes(geometry, output);
    }
}

impl fmt::Debug for DefaultLightFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultLightFilter")
            .field("camera", &self.camera)
            .field("cache", &self.cache)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}
