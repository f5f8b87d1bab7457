//! How this crate sees the scene graph.
//!
//! Scene graphs implement [`Spatial`] and [`Geometry`] for their nodes; [`SceneObject`]
//! is a minimal implementation for applications without one, and for tests.

use alloc::sync::Arc;

use crate::light::{Light, LightList};
use crate::math::{Bound, WorldPoint};

/// Something with a place in the world.
pub trait Spatial {
    /// Returns the world-space bounding volume, if known.
    fn world_bound(&self) -> Option<Bound>;

    /// Returns the world-space position of the object's origin.
    fn world_translation(&self) -> WorldPoint;
}

/// Something that is drawn and therefore needs to know which lights affect it.
///
/// Scene roots are also [`Geometry`]: their world light list is every light in the
/// scene.
pub trait Geometry: Spatial {
    /// Returns the lights that may affect this object, nearest first.
    ///
    /// Keeping this list sorted (for example with [`LightList::sort_by_distance()`]) is
    /// the scene graph's job; probe blending depends on it.
    fn world_light_list(&self) -> &LightList;
}

/// A renderable object, or scene root, with a fixed position, bound, and light list.
#[derive(Clone, Debug, Default)]
pub struct SceneObject {
    translation: WorldPoint,
    bound: Option<Bound>,
    lights: LightList,
}

impl SceneObject {
    /// Constructs an object at `translation` with no bound and no lights.
    #[inline]
    pub fn new(translation: WorldPoint) -> Self {
        Self {
            translation,
            bound: None,
            lights: LightList::new(),
        }
    }

    /// Sets the bound, builder-style.
    #[must_use]
    #[inline]
    pub fn with_bound(mut self, bound: impl Into<Bound>) -> Self {
        self.bound = Some(bound.into());
        self
    }

    /// Adds lights, builder-style, then sorts the light list nearest first.
    #[must_use]
    #[inline]
    pub fn with_lights(mut self, lights: impl IntoIterator<Item = Arc<Light>>) -> Self {
        self.lights.extend(lights);
        self.sort_lights();
        self
    }

    /// Moves the object. The light list is not re-sorted.
    #[inline]
    pub fn set_translation(&mut self, translation: WorldPoint) {
        self.translation = translation;
    }

    /// Replaces the bound. The light list is not re-sorted.
    #[inline]
    pub fn set_bound(&mut self, bound: Option<Bound>) {
        self.bound = bound;
    }

    /// Appends a light without re-sorting.
    #[inline]
    pub fn add_light(&mut self, light: Arc<Light>) {
        self.lights.push(light);
    }

    /// Sorts the light list nearest first, relative to this object.
    #[inline]
    pub fn sort_lights(&mut self) {
        let mut lights = core::mem::take(&mut self.lights);
        lights.sort_by_distance(self);
        self.lights = lights;
    }
}

impl Spatial for SceneObject {
    #[inline]
    fn world_bound(&self) -> Option<Bound> {
        self.bound
    }

    #[inline]
    fn world_translation(&self) -> WorldPoint {
        self.translation
    }
}

impl Geometry for SceneObject {
    #[inline]
    fn world_light_list(&self) -> &LightList {
        &self.lights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::{DirectionalLight, PointLight};
    use crate::math::Aab;
    use euclid::point3;

    fn point_light(x: f32) -> Arc<Light> {
        Arc::new(Light::new(PointLight::new(point3(x, 0., 0.), 1.).unwrap()))
    }

    #[test]
    fn with_lights_sorts_nearest_first() {
        let far = point_light(10.);
        let near = point_light(2.);
        let directional = Arc::new(Light::new(DirectionalLight::default()));
        let object = SceneObject::new(point3(0., 0., 0.))
            .with_bound(Aab::new(-1., 1., -1., 1., -1., 1.))
            .with_lights([Arc::clone(&far), Arc::clone(&near), Arc::clone(&directional)]);

        let ids: alloc::vec::Vec<_> = object.world_light_list().iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec![directional.id(), near.id(), far.id()]);
    }

    #[test]
    fn add_light_does_not_sort() {
        let far = point_light(10.);
        let near = point_light(2.);
        let mut object = SceneObject::new(point3(0., 0., 0.));
        object.add_light(Arc::clone(&far));
        object.add_light(Arc::clone(&near));
        assert_eq!(object.world_light_list().get(0).map(|l| l.id()), Some(far.id()));

        object.sort_lights();
        assert_eq!(object.world_light_list().get(0).map(|l| l.id()), Some(near.id()));
    }
}
