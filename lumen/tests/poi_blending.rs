//! Tests of [`PoiProbeBlendingProcessor`], alone and installed in a [`RenderManager`].

use std::rc::Rc;
use std::sync::Arc;

use euclid::point3;
use pretty_assertions::assert_eq;

use lumen::blend::PoiProbeBlendingProcessor;
use lumen::camera::Camera;
use lumen::light::{Light, LightId, LightList, LightProbe, PointLight};
use lumen::math::{Aab, WorldPoint};
use lumen::probe::SphereVolume;
use lumen::render::{RenderManager, SceneProcessor as _, ViewPort};
use lumen::scene::{Geometry, SceneObject};

fn wide_camera() -> Camera {
    Camera::orthographic(Aab::new(-50., 50., -50., 50., -50., 50.))
}

/// A ready probe whose influence volume has radius 10, so its inner radius is 5.
fn probe_at(position: WorldPoint) -> Arc<Light> {
    let mut probe = LightProbe::new(position, SphereVolume::new(position, 10.0).unwrap().into());
    probe.set_ready(true);
    Arc::new(Light::new(probe))
}

/// A scene root whose light list is exactly `lights`, in that order.
fn scene(lights: &[&Arc<Light>]) -> Rc<dyn Geometry> {
    let mut root = SceneObject::new(point3(0., 0., 0.));
    for &light in lights {
        root.add_light(Arc::clone(light));
    }
    Rc::new(root)
}

fn poi() -> Rc<SceneObject> {
    Rc::new(SceneObject::new(point3(0., 0., 0.)))
}

fn factor_ids(processor: &PoiProbeBlendingProcessor) -> Vec<LightId> {
    processor
        .blend_factors()
        .iter()
        .map(|factor| factor.probe().id())
        .collect()
}

#[test]
fn probe_containing_poi_is_used_alone() {
    let a = probe_at(point3(3., 0., 0.));
    let b = probe_at(point3(-7., 0., 0.));
    let c = probe_at(point3(0., 8., 0.));
    let scenes = [scene(&[&b, &c, &a])];

    let mut processor = PoiProbeBlendingProcessor::new(poi());
    processor.compute_probes(&wide_camera(), &scenes);

    assert_eq!(factor_ids(&processor), vec![a.id()]);
    assert_eq!(processor.blend_factors()[0].weight(), 1.0);
    assert_eq!(processor.current_probe().map(|p| p.id()), Some(a.id()));
}

#[test]
fn dominant_probe_stops_scan_across_scenes() {
    let a = probe_at(point3(1., 0., 0.));
    let b = probe_at(point3(-7., 0., 0.));
    let scenes = [scene(&[&a]), scene(&[&b])];

    let mut processor = PoiProbeBlendingProcessor::new(poi());
    processor.compute_probes(&wide_camera(), &scenes);
    assert_eq!(factor_ids(&processor), vec![a.id()]);
}

#[test]
fn candidates_are_normalized_and_sorted() {
    let far = probe_at(point3(0., 8., 0.));
    let near = probe_at(point3(-6., 0., 0.));
    let scenes = [scene(&[&far]), scene(&[&near])];

    let mut processor = PoiProbeBlendingProcessor::new(poi());
    processor.compute_probes(&wide_camera(), &scenes);

    let factors = processor.blend_factors();
    assert_eq!(factor_ids(&processor), vec![near.id(), far.id()]);
    let sum: f32 = factors.iter().map(|factor| factor.weight()).sum();
    assert!((sum - 1.0).abs() < 1e-5, "{factors:?}");
    assert!((factors[0].weight() - 0.25).abs() < 1e-5, "{factors:?}");
    assert_eq!(processor.current_probe().map(|p| p.id()), Some(near.id()));
}

#[test]
fn ignores_unreachable_unseen_and_other_lights() {
    let out_of_reach = probe_at(point3(0., 0., 30.));
    let nearby = probe_at(point3(0., 0., 5.));
    let point = Arc::new(Light::new(PointLight::new(point3(0., 0., 0.), 5.).unwrap()));
    let scenes = [scene(&[&out_of_reach, &nearby, &point])];
    let narrow_camera = Camera::orthographic(Aab::new(30., 40., -1., 1., -1., 1.));

    let mut processor = PoiProbeBlendingProcessor::new(poi());
    processor.compute_probes(&wide_camera(), &scenes);
    assert_eq!(factor_ids(&processor), vec![nearby.id()]);

    processor.compute_probes(&narrow_camera, &scenes);
    assert_eq!(factor_ids(&processor), vec![]);
    assert!(processor.current_probe().is_none());
}

#[test]
fn populate_probe_requires_ready() {
    let mut unready = LightProbe::new(
        point3(0., 0., 0.),
        SphereVolume::new(point3(0., 0., 0.), 10.0).unwrap().into(),
    );
    unready.set_ready(false);
    let unready = Arc::new(Light::new(unready));
    let scenes = [scene(&[&unready])];

    let mut processor = PoiProbeBlendingProcessor::new(poi());
    processor.compute_probes(&wide_camera(), &scenes);
    assert_eq!(
        processor.current_probe().map(|p| p.id()),
        Some(unready.id())
    );
    let mut output = LightList::new();
    processor.populate_probe(&mut output);
    assert!(output.is_empty());
}

#[test]
fn set_poi_moves_the_selection() {
    let a = probe_at(point3(20., 0., 0.));
    let b = probe_at(point3(-20., 0., 0.));
    let scenes = [scene(&[&a, &b])];

    let mut processor =
        PoiProbeBlendingProcessor::new(Rc::new(SceneObject::new(point3(19., 0., 0.))));
    processor.compute_probes(&wide_camera(), &scenes);
    assert_eq!(processor.current_probe().map(|p| p.id()), Some(a.id()));

    processor.set_poi(Rc::new(SceneObject::new(point3(-19., 0., 0.))));
    processor.compute_probes(&wide_camera(), &scenes);
    assert_eq!(processor.current_probe().map(|p| p.id()), Some(b.id()));
}

#[test]
fn installed_filter_gives_every_object_the_current_probe() {
    let a = probe_at(point3(3., 0., 0.));
    let b = probe_at(point3(-7., 0., 0.));
    let point = Arc::new(Light::new(PointLight::new(point3(0., 0., 0.), 5.).unwrap()));
    // The object's own light list has a different probe, which the installed filter
    // ignores in favor of the point of interest's.
    let object: Rc<dyn Geometry> = Rc::new(
        SceneObject::new(point3(0., 0., 0.))
            .with_bound(Aab::new(-1., 1., -1., 1., -1., 1.))
            .with_lights([Arc::clone(&point), Arc::clone(&b)]),
    );

    let mut render_manager = RenderManager::default();
    let mut view_port = ViewPort::new(wide_camera());
    view_port.attach_scene(scene(&[&b, &a, &point]));
    view_port.add_processor(PoiProbeBlendingProcessor::new(poi()));

    view_port.enqueue(Rc::clone(&object));
    let lists = render_manager.render_view_port(&mut view_port, 0.016);
    let ids: Vec<LightId> = lists[0].iter().map(|light| light.id()).collect();
    assert_eq!(ids, vec![point.id(), a.id()]);
    assert!(format!("{:?}", render_manager.light_filter()).contains("PoiProbeStrategy"));

    let processor = render_manager.remove_processor(&mut view_port, 0);
    assert!(!processor.is_initialized());
    assert!(format!("{:?}", render_manager.light_filter()).contains("WeightedProbeBlending"));

    view_port.enqueue(object);
    let lists = render_manager.render_view_port(&mut view_port, 0.016);
    let ids: Vec<LightId> = lists[0].iter().map(|light| light.id()).collect();
    assert_eq!(ids, vec![point.id(), b.id()]);
}
