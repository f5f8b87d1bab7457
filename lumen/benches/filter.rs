#![allow(missing_docs)]

use std::hint::black_box;
use std::rc::Rc;
use std::sync::Arc;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use euclid::{point3, vec3};

use lumen::blend::PoiProbeBlendingProcessor;
use lumen::camera::Camera;
use lumen::filter::{DefaultLightFilter, LightFilter as _};
use lumen::light::{Light, LightList, LightProbe, PointLight, SpotLight};
use lumen::math::{Aab, WorldRotation};
use lumen::probe::{InfluenceVolume, OrientedBoxVolume, SphereVolume};
use lumen::render::{RenderManager, ViewPort};
use lumen::scene::{Geometry, SceneObject};

/// A grid of point and spot lights, with a probe every few lights.
fn lights() -> Vec<Arc<Light>> {
    let mut lights = Vec::new();
    for i in 0..64 {
        let position = point3((i % 8) as f32 * 4.0 - 16.0, 0.0, (i / 8) as f32 * 4.0 - 16.0);
        let light = if i % 5 == 0 {
            let volume: InfluenceVolume = if i % 2 == 0 {
                SphereVolume::new(position, 6.0).unwrap().into()
            } else {
                OrientedBoxVolume::new(position, vec3(3., 2., 5.), WorldRotation::identity())
                    .unwrap()
                    .into()
            };
            let mut probe = LightProbe::new(position, volume);
            probe.set_ready(true);
            Light::new(probe)
        } else if i % 2 == 0 {
            Light::new(PointLight::new(position, 5.0).unwrap())
        } else {
            Light::new(SpotLight::new(position, vec3(0., -1., 0.2), 12.0).unwrap())
        };
        lights.push(Arc::new(light));
    }
    lights
}

fn objects(lights: &[Arc<Light>]) -> Vec<Rc<dyn Geometry>> {
    (0..100)
        .map(|i| {
            let center = point3((i % 10) as f32 * 3.0 - 15.0, 0.5, (i / 10) as f32 * 3.0 - 15.0);
            let object: Rc<dyn Geometry> = Rc::new(
                SceneObject::new(center)
                    .with_bound(Aab::from_center_extents(center, vec3(0.5, 0.5, 0.5)))
                    .with_lights(lights.iter().cloned()),
            );
            object
        })
        .collect()
}

pub fn filter_bench(c: &mut Criterion) {
    let lights = lights();
    let objects = objects(&lights);
    let camera = Camera::orthographic(Aab::new(-10., 10., -10., 10., -10., 10.));

    c.bench_function("filter: 100 objects, 64 lights", |b| {
        let mut filter = DefaultLightFilter::new();
        let mut output = LightList::new();
        b.iter(|| {
            filter.set_camera(black_box(&camera));
            for object in &objects {
                output.clear();
                filter.filter_lights(&**object, &mut output);
                black_box(&output);
            }
        })
    });

    c.bench_function("filter: frame with point of interest processor", |b| {
        let mut render_manager = RenderManager::default();
        let scene: Rc<dyn Geometry> =
            Rc::new(SceneObject::new(point3(0., 0., 0.)).with_lights(lights.iter().cloned()));
        let mut view_port = ViewPort::new(camera.clone());
        view_port.attach_scene(scene);
        view_port.add_processor(PoiProbeBlendingProcessor::new(Rc::new(SceneObject::new(
            point3(1., 0., 1.),
        ))));
        b.iter_batched_ref(
            || objects.clone(),
            |queue| {
                for object in queue.drain(..) {
                    view_port.enqueue(object);
                }
                black_box(render_manager.render_view_port(&mut view_port, 0.016))
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, filter_bench);
criterion_main!(benches);
