use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use manyfmt::Refmt as _;
use ordered_float::OrderedFloat;

use crate::blend::ProbeBlendingStrategy;
use crate::camera::Camera;
use crate::filter::{DefaultLightFilter, LightFilter};
use crate::light::{Light, LightList};
use crate::math::{Bound, Coordinate, Sphere};
use crate::render::{RenderManager, SceneProcessor, ViewContext};
use crate::scene::{Geometry, Spatial};
use crate::util::{ConciseDebug, ScratchPool};

/// A probe chosen by [`PoiProbeBlendingProcessor`], and its share of the blend.
#[derive(Clone, Debug)]
pub struct BlendFactor {
    probe: Arc<Light>,
    weight: f32,
}

impl BlendFactor {
    /// Returns the probe.
    #[inline]
    pub fn probe(&self) -> &Arc<Light> {
        &self.probe
    }

    /// Returns the normalized distance factor: how far the point of interest is from the
    /// probe's inner extent towards its outer extent, divided by the sum over all
    /// candidates. Smaller is nearer.
    ///
    /// The factors of one frame sum to 1, unless a single probe was close enough to be
    /// used alone, in which case its factor is 1.
    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }
}

/// The result of the most recent [`PoiProbeBlendingProcessor::compute_probes()`],
/// shared with the blending strategy of the filter the processor installs.
#[derive(Debug, Default)]
struct PoiSelection {
    factors: Vec<BlendFactor>,
}

impl PoiSelection {
    fn current_probe(&self) -> Option<&Arc<Light>> {
        self.factors.first().map(BlendFactor::probe)
    }

    fn populate(&self, output: &mut LightList) {
        if let Some(probe) = self.current_probe()
            && probe.is_ready_probe()
        {
            output.push(Arc::clone(probe));
        }
    }
}

/// Picks probes for every object from their distances to one point of interest,
/// such as the player, instead of to each object.
///
/// While initialized, it replaces the render manager's light filter with a
/// [`DefaultLightFilter`] whose blending strategy ignores the probes each object can see
/// and instead uses [`populate_probe()`](Self::populate_probe).
///
/// Each frame, every probe in every scene of the view port that is in view and whose
/// influence volume overlaps the point of interest becomes a candidate. A probe is
/// weighted by how far the point of interest is from its center, relative to the inner
/// (half radius) and outer (radius) extent of its volume. A point of interest within a
/// probe's inner extent uses that probe alone.
///
/// Only the nearest candidate is actually used for shading; all of them are available
/// from [`blend_factors()`](Self::blend_factors).
pub struct PoiProbeBlendingProcessor {
    poi: Rc<dyn Spatial>,
    selection: Rc<RefCell<PoiSelection>>,
    previous_filter: Option<Box<dyn LightFilter>>,
    initialized: bool,
    scratch: ScratchPool,
}

impl PoiProbeBlendingProcessor {
    /// Constructs a processor using `poi` as the point of interest.
    #[inline]
    pub fn new(poi: Rc<dyn Spatial>) -> Self {
        Self {
            poi,
            selection: Rc::default(),
            previous_filter: None,
            initialized: false,
            scratch: ScratchPool::new(),
        }
    }

    /// Returns the point of interest.
    #[inline]
    pub fn poi(&self) -> &Rc<dyn Spatial> {
        &self.poi
    }

    /// Replaces the point of interest. Takes effect in the next frame.
    #[inline]
    pub fn set_poi(&mut self, poi: Rc<dyn Spatial>) {
        self.poi = poi;
    }

    /// Returns the probe chosen in the most recent frame, if any.
    #[inline]
    pub fn current_probe(&self) -> Option<Arc<Light>> {
        self.selection.borrow().current_probe().cloned()
    }

    /// Returns every candidate of the most recent frame, nearest first.
    #[inline]
    pub fn blend_factors(&self) -> Vec<BlendFactor> {
        self.selection.borrow().factors.clone()
    }

    /// Appends the current probe to `output` if there is one and it is ready.
    #[inline]
    pub fn populate_probe(&self, output: &mut LightList) {
        self.selection.borrow().populate(output);
    }

    /// Chooses the probes for the point of interest as seen by `camera`, from the probes
    /// in `scenes`' world light lists.
    ///
    /// This is called every frame by [`SceneProcessor::post_queue()`], and need only be
    /// called directly when the processor is used without a [`RenderManager`].
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn compute_probes(&mut self, camera: &Camera, scenes: &[Rc<dyn Geometry>]) {
        let mut scratch = self.scratch.acquire();
        let poi_translation = self.poi.world_translation();
        let poi_bound = self
            .poi
            .world_bound()
            .unwrap_or(Bound::Sphere(Sphere::new(poi_translation, 0.0)));

        let mut factors: Vec<BlendFactor> = Vec::new();
        let mut sum: Coordinate = 0.0;
        let mut dominant = false;

        'scan: for scene in scenes {
            for light in scene.world_light_list() {
                let Some(probe) = light.as_probe() else {
                    continue;
                };
                if !probe.intersects_frustum(camera, &mut scratch) {
                    continue;
                }
                let volume = probe.volume();
                if !volume.intersects_bound(&poi_bound, &mut scratch) {
                    continue;
                }

                let outer = volume.radius();
                if outer <= 0.0 {
                    continue;
                }
                let inner = outer * 0.5;
                let distance = (volume.center() - poi_translation).length();

                if distance < inner {
                    factors.clear();
                    factors.push(BlendFactor {
                        probe: Arc::clone(light),
                        weight: 1.0,
                    });
                    dominant = true;
                    break 'scan;
                }

                let ndf = (distance - inner) / (outer - inner);
                sum += ndf;
                factors.push(BlendFactor {
                    probe: Arc::clone(light),
                    weight: ndf,
                });
            }
        }

        if !dominant {
            factors.sort_by_key(|factor| OrderedFloat(factor.weight));
            if sum > 0.0 {
                for factor in &mut factors {
                    factor.weight /= sum;
                }
            }
        }

        log::trace!(
            "{} probe candidates for point of interest at {:?}{}",
            factors.len(),
            poi_translation.refmt(&ConciseDebug),
            if dominant { " (dominant)" } else { "" },
        );
        self.selection.borrow_mut().factors = factors;
    }
}

impl SceneProcessor for PoiProbeBlendingProcessor {
    #[allow(clippy::missing_inline_in_public_items)]
    fn initialize(&mut self, render_manager: &mut RenderManager, _view: &ViewContext<'_>) {
        let filter = DefaultLightFilter::with_strategy(PoiProbeStrategy {
            selection: Rc::clone(&self.selection),
        });
        let previous = render_manager.replace_light_filter(Box::new(filter));
        log::debug!("point of interest probe blending installed, replacing {previous:?}");
        self.previous_filter = Some(previous);
        self.initialized = true;
    }

    #[inline]
    fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[inline]
    fn post_queue(&mut self, view: &ViewContext<'_>) {
        self.compute_probes(view.camera(), view.scenes());
    }

    #[allow(clippy::missing_inline_in_public_items)]
    fn cleanup(&mut self, render_manager: &mut RenderManager) {
        if let Some(previous) = self.previous_filter.take() {
            log::debug!("point of interest probe blending removed, restoring {previous:?}");
            render_manager.replace_light_filter(previous);
        }
        self.initialized = false;
    }
}

impl fmt::Debug for PoiProbeBlendingProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoiProbeBlendingProcessor")
            .field("poi", &self.poi.world_translation().refmt(&ConciseDebug))
            .field("selection", &*self.selection.borrow())
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

/// The blending strategy of the filter installed by [`PoiProbeBlendingProcessor`].
#[derive(Debug)]
struct PoiProbeStrategy {
    selection: Rc<RefCell<PoiSelection>>,
}

impl ProbeBlendingStrategy for PoiProbeStrategy {
    fn register_probe(&mut self, _probe: Arc<Light>) {}

    fn populate_probes(&mut self, _geometry: &dyn Geometry, output: &mut LightList) {
        self.selection.borrow().populate(output);
    }
}
