//! Choosing which of the light probes that reach an object are used to shade it.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::light::{Light, LightList};
use crate::scene::Geometry;

mod poi;
pub use poi::*;


/// Resolves the probes a [`LightFilter`](crate::filter::LightFilter) found for one
/// object into the probes actually passed on to shading.
///
/// The filter calls [`register_probe()`](Self::register_probe) for each probe that
/// passed its visibility tests, in world light list order (nearest first), then
/// [`populate_probes()`](Self::populate_probes) once.
pub trait ProbeBlendingStrategy: fmt::Debug {
    /// Records a candidate probe for the object currently being filtered.
    fn register_probe(&mut self, probe: Arc<Light>);

    /// Appends the chosen probes to `output` and forgets all registered probes.
    fn populate_probes(&mut self, geometry: &dyn Geometry, output: &mut LightList);
}

/// Uses only the nearest probe, and only if it is ready.
#[derive(Clone, Debug, Default)]
pub struct NearestProbeBlending {
    registered: Vec<Arc<Light>>,
}

impl NearestProbeBlending {
    /// Constructs a strategy with no registered probes.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProbeBlendingStrategy for NearestProbeBlending {
    #[inline]
    fn register_probe(&mut self, probe: Arc<Light>) {
        self.registered.push(probe);
    }

    #[inline]
    fn populate_probes(&mut self, _geometry: &dyn Geometry, output: &mut LightList) {
        // A nearest probe that is not ready hides the others rather than being skipped.
        if let Some(nearest) = self.registered.first()
            && nearest.is_ready_probe()
        {
            output.push(Arc::clone(nearest));
        }
        self.registered.clear();
    }
}

/// Uses up to [`max_probes()`](Self::max_probes) of the nearest probes that are ready
/// and enabled, nearest first.
#[derive(Clone, Debug)]
pub struct WeightedProbeBlending {
    max_probes: usize,
    registered: Vec<Arc<Light>>,
}

impl WeightedProbeBlending {
    /// Number of probes used when not otherwise specified.
    pub const DEFAULT_MAX_PROBES: usize = 3;

    /// Constructs a strategy using up to [`Self::DEFAULT_MAX_PROBES`] probes.
    #[inline]
    pub fn new() -> Self {
        Self::with_max_probes(Self::DEFAULT_MAX_PROBES)
    }

    /// Constructs a strategy using up to `max_probes` probes.
    ///
    /// A limit of zero is allowed, and produces a strategy that never uses any probe.
    #[inline]
    pub fn with_max_probes(max_probes: usize) -> Self {
        Self {
            max_probes,
            registered: Vec::new(),
        }
    }

    /// Returns the maximum number of probes appended per object.
    #[inline]
    pub fn max_probes(&self) -> usize {
        self.max_probes
    }
}

impl Default for WeightedProbeBlending {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeBlendingStrategy for WeightedProbeBlending {
    #[inline]
    fn register_probe(&mut self, probe: Arc<Light>) {
        self.registered.push(probe);
    }

    #[inline]
    fn populate_probes(&mut self, _geometry: &dyn Geometry, output: &mut LightList) {
        output.extend(
            self.registered
                .drain(..)
                .filter(|probe| probe.is_ready_probe() && probe.is_enabled())
                .take(self.max_probes),
        );
    }
}
