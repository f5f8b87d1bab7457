use core::f32::consts::FRAC_PI_2;

use euclid::{Angle, point3, vec3};
use pretty_assertions::assert_eq;
use rand::{Rng as _, SeedableRng as _};
use rand_xoshiro::Xoshiro256Plus;

use super::*;
use crate::light::LightProbe;

fn unit_camera() -> Camera {
    Camera::orthographic(Aab::new(-1., 1., -1., 1., -1., 1.))
}

struct BoxParameters {
    center: WorldPoint,
    extents: WorldVector,
    rotation: WorldRotation,
}

fn random_parameters(rng: &mut Xoshiro256Plus) -> BoxParameters {
    let mut r = |range: core::ops::Range<f32>| rng.random_range(range);
    BoxParameters {
        center: point3(r(-20.0..20.0), r(-20.0..20.0), r(-20.0..20.0)),
        extents: vec3(r(0.1..8.0), r(0.1..8.0), r(0.1..8.0)),
        rotation: WorldRotation::around_y(Angle::radians(r(-3.0..3.0)))
            .then(&WorldRotation::around_z(Angle::radians(r(-3.0..3.0)))),
    }
}

fn random_aab(rng: &mut Xoshiro256Plus) -> Aab {
    let mut r = |range: core::ops::Range<f32>| rng.random_range(range);
    Aab::from_center_extents(
        point3(r(-30.0..30.0), r(-30.0..30.0), r(-30.0..30.0)),
        vec3(r(0.0..10.0), r(0.0..10.0), r(0.0..10.0)),
    )
}

#[test]
fn oriented_box_setters_match_construction() {
    let mut rng = Xoshiro256Plus::seed_from_u64(1380217358271006134);
    let scratch = &mut Scratch::default();
    for _ in 0..50 {
        let before = random_parameters(&mut rng);
        let after = random_parameters(&mut rng);

        let fresh = OrientedBoxVolume::new(after.center, after.extents, after.rotation).unwrap();
        let mut updated =
            OrientedBoxVolume::new(before.center, before.extents, before.rotation).unwrap();
        updated.set_center(after.center);
        updated.set_extents(after.extents).unwrap();
        updated.set_rotation(after.rotation);

        assert_eq!(fresh.uniform_matrix(), updated.uniform_matrix());
        let fresh = InfluenceVolume::from(fresh);
        let updated = InfluenceVolume::from(updated);

        for _ in 0..20 {
            let aab = random_aab(&mut rng);
            let sphere = Sphere::new(aab.center(), aab.extents().x);
            let camera = Camera::orthographic(aab);
            assert_eq!(
                fresh.intersects_box(&aab, scratch),
                updated.intersects_box(&aab, scratch)
            );
            assert_eq!(
                fresh.intersects_sphere(&sphere, scratch),
                updated.intersects_sphere(&sphere, scratch)
            );
            assert_eq!(
                fresh.intersects_frustum(&camera, scratch),
                updated.intersects_frustum(&camera, scratch)
            );
        }
    }
}

#[test]
fn sphere_volume_predicates() {
    let volume = InfluenceVolume::from(SphereVolume::new(point3(0., 0., 0.), 2.0).unwrap());
    let scratch = &mut Scratch::default();
    assert!(volume.intersects_box(&Aab::new(1., 3., -1., 1., -1., 1.), scratch));
    assert!(!volume.intersects_box(&Aab::new(2., 3., -1., 1., -1., 1.), scratch));
    assert!(volume.intersects_sphere(&Sphere::new(point3(3., 0., 0.), 1.0), scratch));
    assert!(!volume.intersects_sphere(&Sphere::new(point3(3.5, 0., 0.), 1.0), scratch));

    let camera = unit_camera();
    let mut far = volume.clone();
    far.set_center(point3(4., 0., 0.));
    assert!(!far.intersects_frustum(&camera, scratch));
    far.set_radius(3.5).unwrap();
    assert!(far.intersects_frustum(&camera, scratch));
}

#[test]
fn oriented_box_sphere() {
    let scratch = &mut Scratch::default();
    let mut volume = InfluenceVolume::from(
        OrientedBoxVolume::new(point3(0., 0., 0.), vec3(2., 1., 1.), WorldRotation::identity())
            .unwrap(),
    );
    let beside_x = Sphere::new(point3(3., 0., 0.), 1.0);
    let above = Sphere::new(point3(0., 2.5, 0.), 1.0);
    assert!(volume.intersects_sphere(&beside_x, scratch));
    assert!(!volume.intersects_sphere(&above, scratch));

    let InfluenceVolume::OrientedBox(obb) = &mut volume else {
        unreachable!()
    };
    obb.set_rotation(WorldRotation::around_z(Angle::radians(FRAC_PI_2)));
    assert!(volume.intersects_sphere(&above, scratch));
    assert!(!volume.intersects_sphere(&beside_x, scratch));
}

#[test]
fn oriented_box_box_and_frustum() {
    let scratch = &mut Scratch::default();
    let volume = InfluenceVolume::from(
        OrientedBoxVolume::new(point3(0., 0., 0.), vec3(2., 1., 1.), WorldRotation::identity())
            .unwrap(),
    );
    assert!(volume.intersects_box(&Aab::new(1.5, 4., -1., 1., -1., 1.), scratch));
    assert!(!volume.intersects_box(&Aab::new(3., 4., -1., 1., -1., 1.), scratch));

    let camera = unit_camera();
    let wide =
        OrientedBoxVolume::new(point3(3., 0., 0.), vec3(2.5, 1., 1.), WorldRotation::identity())
            .unwrap();
    let narrow =
        OrientedBoxVolume::new(point3(3., 0., 0.), vec3(1.5, 1., 1.), WorldRotation::identity())
            .unwrap();
    assert!(InfluenceVolume::from(wide).intersects_frustum(&camera, scratch));
    assert!(!InfluenceVolume::from(narrow).intersects_frustum(&camera, scratch));
}

#[test]
fn bound_dispatch() {
    let scratch = &mut Scratch::default();
    let volume = InfluenceVolume::from(SphereVolume::new(point3(0., 0., 0.), 1.0).unwrap());
    assert!(volume.intersects_bound(&Bound::Box(Aab::new(0., 2., 0., 2., 0., 2.)), scratch));
    assert!(!volume.intersects_bound(&Bound::Box(Aab::new(5., 6., 0., 2., 0., 2.)), scratch));
    assert!(volume.intersects_bound(&Sphere::new(point3(0., 1.5, 0.), 1.0).into(), scratch));
    assert!(!volume.intersects_bound(&Sphere::new(point3(0., 2.5, 0.), 1.0).into(), scratch));
}

#[test]
fn extent_errors_leave_volume_unchanged() {
    let mut obb =
        OrientedBoxVolume::new(point3(0., 0., 0.), vec3(1., 2., 3.), WorldRotation::identity())
            .unwrap();
    let before = obb.clone();
    assert_eq!(
        obb.set_extents(vec3(1., -2., 3.)),
        Err(LightParameterError::NegativeExtent(-2.0))
    );
    assert_eq!(obb, before);
    assert_eq!(obb.radius(), 3.0);

    let mut volume = InfluenceVolume::from(SphereVolume::new(point3(0., 0., 0.), 1.0).unwrap());
    assert_eq!(
        volume.set_radius(-1.0),
        Err(LightParameterError::NegativeExtent(-1.0))
    );
    assert_eq!(volume.radius(), 1.0);
    let nan_extents = vec3(f32::NAN, 1., 1.);
    assert!(
        OrientedBoxVolume::new(point3(0., 0., 0.), nan_extents, WorldRotation::identity()).is_err()
    );
}

#[test]
fn oriented_box_uniform_matrix() {
    let obb =
        OrientedBoxVolume::new(point3(5., 6., 7.), vec3(2., 3., 4.), WorldRotation::identity())
            .unwrap();
    assert_eq!(
        obb.uniform_matrix().to_rows_array(),
        [
            [1., 0., 0., 5.],
            [0., 1., 0., 6.],
            [0., 0., 1., 7.],
            [2., 3., 4., 1.],
        ]
    );
}

#[test]
fn sphere_uniform_matrix() {
    let mut sphere = SphereVolume::new(point3(1., 2., 3.), 10.0).unwrap();
    assert_eq!(
        sphere.uniform_matrix().to_rows_array(),
        [
            [1., 0., 0., 1.],
            [0., 1., 0., 2.],
            [0., 0., 1., 3.],
            [10., 10., 10., 1.],
        ]
    );

    sphere.set_radius(2.5).unwrap();
    sphere.set_center(point3(0., 0., -1.));
    assert_eq!(
        sphere.uniform_matrix().to_rows_array(),
        [
            [1., 0., 0., 0.],
            [0., 1., 0., 0.],
            [0., 0., 1., -1.],
            [2.5, 2.5, 2.5, 1.],
        ]
    );

    // a rejected radius leaves the matrix alone
    assert!(sphere.set_radius(-1.0).is_err());
    assert_eq!(sphere.uniform_matrix().scaled_axis(0), vec3(2.5, 0., 0.));
}

#[test]
fn probe_uniform_matrix_packs_mip_count_and_radius() {
    let mut probe = LightProbe::new(
        point3(1., 2., 3.),
        SphereVolume::new(point3(0., 0., 0.), 4.0).unwrap().into(),
    );
    probe.load_environment(crate::light::EnvironmentData::new(Some(vec![]), None, 5));
    let matrix = probe.uniform_matrix();
    assert_eq!(matrix.packed_scalar(), 5.25);
    assert_eq!(
        [matrix.get(0, 3), matrix.get(1, 3), matrix.get(2, 3)],
        [1., 2., 3.]
    );
}

#[test]
fn probe_area_type_keeps_center_and_radius() {
    let mut probe = LightProbe::new(
        point3(1., 2., 3.),
        SphereVolume::new(point3(0., 0., 0.), 4.0).unwrap().into(),
    );
    assert_eq!(probe.area_type(), AreaType::Spherical);
    assert_eq!(probe.volume().center(), point3(1., 2., 3.));

    probe.set_area_type(AreaType::OrientedBox).unwrap();
    assert_eq!(probe.area_type(), AreaType::OrientedBox);
    let InfluenceVolume::OrientedBox(obb) = probe.volume() else {
        panic!("expected oriented box, got {:?}", probe.volume());
    };
    assert_eq!(obb.center(), point3(1., 2., 3.));
    assert_eq!(obb.extents(), vec3(4., 4., 4.));

    let unchanged = probe.volume().clone();
    probe.set_area_type(AreaType::OrientedBox).unwrap();
    assert_eq!(probe.volume(), &unchanged);

    probe.set_position(point3(0., 0., 0.));
    assert_eq!(probe.volume().center(), point3(0., 0., 0.));
}

#[test]
fn sphere_volume_debug() {
    let volume = SphereVolume::new(point3(1., 0., -1.), 2.0).unwrap();
    assert_eq!(
        format!("{volume:?}"),
        "SphereVolume { center: (+1.000, +0.000, -1.000), radius: 2.0 }"
    );
}
