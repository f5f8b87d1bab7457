use alloc::sync::Arc;
use alloc::vec::Vec;
use core::slice;

use ordered_float::OrderedFloat;

use crate::light::Light;
use crate::scene::Spatial;

/// An ordered list of lights.
///
/// Used both for the lights that may affect an object (its world light list) and for
/// the subset of those a filter decides actually do. Order matters: shaders consume
/// lights in list order, and blending strategies assume a world light list is sorted
/// nearest first.
#[derive(Clone, Debug, Default)]
pub struct LightList {
    lights: Vec<Arc<Light>>,
}

impl LightList {
    /// Constructs an empty list.
    #[inline]
    pub const fn new() -> Self {
        Self { lights: Vec::new() }
    }

    /// Appends a light.
    #[inline]
    pub fn push(&mut self, light: Arc<Light>) {
        self.lights.push(light);
    }

    /// Returns the light at `index`, if there is one.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Arc<Light>> {
        self.lights.get(index)
    }

    /// Returns the number of lights.
    #[inline]
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Returns whether the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Removes all lights, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.lights.clear();
    }

    /// Iterates over the lights in order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Arc<Light>> {
        self.lights.iter()
    }

    /// Returns the lights as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Arc<Light>] {
        &self.lights
    }

    /// Sorts the lights by [`Light::distance_key()`] relative to `owner`, nearest first.
    ///
    /// The sort is stable, so lights without a position keep their relative order at the
    /// front of the list.
    #[inline]
    pub fn sort_by_distance(&mut self, owner: &dyn Spatial) {
        self.lights
            .sort_by_cached_key(|light| OrderedFloat(light.distance_key(owner)));
    }
}

impl<'a> IntoIterator for &'a LightList {
    type Item = &'a Arc<Light>;
    type IntoIter = slice::Iter<'a, Arc<Light>>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.lights.iter()
    }
}

impl Extend<Arc<Light>> for LightList {
    #[inline]
    fn extend<T: IntoIterator<Item = Arc<Light>>>(&mut self, iter: T) {
        self.lights.extend(iter);
    }
}

impl FromIterator<Arc<Light>> for LightList {
    #[inline]
    fn from_iter<T: IntoIterator<Item = Arc<Light>>>(iter: T) -> Self {
        Self {
            lights: iter.into_iter().collect(),
        }
    }
}
