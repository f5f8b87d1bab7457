use alloc::sync::Arc;
use alloc::vec::Vec;

use euclid::{point3, vec3};
use pretty_assertions::assert_eq;

use super::*;
use crate::blend::NearestProbeBlending;
use crate::light::{DirectionalLight, Light, LightProbe, PointLight};
use crate::math::{Aab, Rgba, Sphere};
use crate::probe::SphereVolume;
use crate::scene::SceneObject;

fn unit_camera() -> Camera {
    Camera::orthographic(Aab::new(-1., 1., -1., 1., -1., 1.))
}

fn far_camera() -> Camera {
    Camera::orthographic(Aab::new(99., 101., -1., 1., -1., 1.))
}

fn point_light(x: f32, radius: f32) -> Arc<Light> {
    Arc::new(Light::new(PointLight::new(point3(x, 0., 0.), radius).unwrap()))
}

fn ready_probe(radius: f32) -> Arc<Light> {
    let mut probe = LightProbe::new(
        point3(0., 0., 0.),
        SphereVolume::new(point3(0., 0., 0.), radius).unwrap().into(),
    );
    probe.set_ready(true);
    Arc::new(Light::new(probe))
}

/// An object at the origin with a small box bound.
fn object_at_origin() -> SceneObject {
    SceneObject::new(point3(0., 0., 0.)).with_bound(Aab::new(-0.5, 0.5, -0.5, 0.5, -0.5, 0.5))
}

fn ids(list: &LightList) -> Vec<LightId> {
    list.iter().map(|light| light.id()).collect()
}

fn filtered(filter: &mut dyn LightFilter, geometry: &dyn Geometry) -> Vec<LightId> {
    let mut output = LightList::new();
    filter.filter_lights(geometry, &mut output);
    ids(&output)
}

#[test]
fn keeps_order_and_appends_probes_last() {
    let point = point_light(0., 2.);
    let probe = ready_probe(5.);
    let directional = Arc::new(Light::new(DirectionalLight::default()));
    let ambient = Arc::new(Light::ambient(Rgba::WHITE));
    let mut object = object_at_origin();
    for light in [&probe, &point, &directional, &ambient] {
        object.add_light(Arc::clone(light));
    }

    let mut filter = DefaultLightFilter::new();
    filter.set_camera(&unit_camera());
    assert_eq!(
        filtered(&mut filter, &object),
        vec![point.id(), directional.id(), ambient.id(), probe.id()]
    );
}

#[test]
fn frustum_test_runs_once_per_light_per_camera() {
    let point = point_light(0., 2.);
    let directional = Arc::new(Light::new(DirectionalLight::default()));
    let objects: Vec<SceneObject> = (0..3)
        .map(|_| object_at_origin().with_lights([Arc::clone(&point), Arc::clone(&directional)]))
        .collect();

    let mut filter = DefaultLightFilter::new();
    filter.set_camera(&unit_camera());
    for object in &objects {
        assert_eq!(filtered(&mut filter, object).len(), 2);
    }
    assert_eq!(filter.frustum_cache().misses(), 2);
    assert_eq!(filter.frustum_cache().len(), 2);
    assert_eq!(filter.frustum_cache().get(point.id()), Some(true));
}

#[test]
fn set_camera_invalidates_cached_results() {
    let point = point_light(0., 2.);
    let object = object_at_origin().with_lights([Arc::clone(&point)]);

    let mut filter = DefaultLightFilter::new();
    filter.set_camera(&unit_camera());
    assert_eq!(filtered(&mut filter, &object), vec![point.id()]);

    filter.set_camera(&far_camera());
    assert!(filter.frustum_cache().is_empty());
    assert_eq!(filtered(&mut filter, &object), vec![]);
    assert_eq!(filter.frustum_cache().get(point.id()), Some(false));
    assert_eq!(filter.frustum_cache().misses(), 2);

    filter.set_camera(&unit_camera());
    assert_eq!(filtered(&mut filter, &object), vec![point.id()]);
}

#[test]
fn disabled_lights_are_not_tested() {
    let mut light = Light::new(PointLight::new(point3(0., 0., 0.), 2.).unwrap());
    light.set_enabled(false);
    let light = Arc::new(light);
    let object = object_at_origin().with_lights([Arc::clone(&light)]);

    let mut filter = DefaultLightFilter::new();
    filter.set_camera(&unit_camera());
    assert_eq!(filtered(&mut filter, &object), vec![]);
    assert_eq!(filter.frustum_cache().get(light.id()), None);
}

#[test]
fn bound_dispatch() {
    // In view, but only reaches as far as x = 3.
    let point = point_light(1., 2.);
    let boxed = SceneObject::new(point3(50., 0., 0.))
        .with_bound(Aab::new(49.5, 50.5, -0.5, 0.5, -0.5, 0.5))
        .with_lights([Arc::clone(&point)]);
    let sphered = SceneObject::new(point3(50., 0., 0.))
        .with_bound(Sphere::new(point3(50., 0., 0.), 1.0))
        .with_lights([Arc::clone(&point)]);
    let infinite = SceneObject::new(point3(50., 0., 0.))
        .with_bound(Sphere::new(point3(50., 0., 0.), f32::INFINITY))
        .with_lights([Arc::clone(&point)]);
    let unbounded = SceneObject::new(point3(50., 0., 0.)).with_lights([Arc::clone(&point)]);

    let mut filter = DefaultLightFilter::new();
    filter.set_camera(&unit_camera());
    assert_eq!(filtered(&mut filter, &boxed), vec![]);
    assert_eq!(filtered(&mut filter, &sphered), vec![]);
    assert_eq!(filtered(&mut filter, &infinite), vec![point.id()]);
    assert_eq!(filtered(&mut filter, &unbounded), vec![point.id()]);
}

#[test]
fn probes_go_through_strategy() {
    let near = ready_probe(5.);
    let mut unready = LightProbe::default();
    unready.set_position(point3(0.2, 0., 0.));
    let unready = Arc::new(Light::new(unready));
    let mut object = object_at_origin();
    object.add_light(Arc::clone(&unready));
    object.add_light(Arc::clone(&near));

    let mut weighted = DefaultLightFilter::new();
    weighted.set_camera(&unit_camera());
    assert_eq!(filtered(&mut weighted, &object), vec![near.id()]);

    let mut nearest = DefaultLightFilter::with_strategy(NearestProbeBlending::new());
    nearest.set_camera(&unit_camera());
    assert_eq!(filtered(&mut nearest, &object), vec![]);
}

#[test]
fn spot_light_out_of_view_is_dropped() {
    let spot = Arc::new(Light::new(
        crate::light::SpotLight::new(point3(5., 0., 0.), vec3(1., 0., 0.), 10.).unwrap(),
    ));
    let object = object_at_origin().with_lights([Arc::clone(&spot)]);
    let mut filter = DefaultLightFilter::default();
    filter.set_camera(&unit_camera());
    assert_eq!(filtered(&mut filter, &object), vec![]);
}

#[test]
#[should_panic = "DefaultLightFilter::filter_lights() called before set_camera()"]
fn filter_without_camera() {
    let mut filter = DefaultLightFilter::new();
    filter.filter_lights(&object_at_origin(), &mut LightList::new());
}
