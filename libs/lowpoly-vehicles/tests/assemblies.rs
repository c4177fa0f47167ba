//! Assembly integration tests.

use approx::assert_relative_eq;
use lowpoly_vehicles::builders::airplane::{create_airplane, AirplanePart, PartialAirplaneOptions};
use lowpoly_vehicles::builders::car::{create_car, CarOptions, CarPart, PartialCarOptions};
use lowpoly_vehicles::builders::engine::{create_engine, PartialEngineOptions};
use lowpoly_vehicles::builders::path::{create_path, PartialPathOptions};
use lowpoly_vehicles::builders::wheel::{create_wheel, PartialWheelOptions, WheelFaceCounts};
use lowpoly_vehicles::builders::wing::{create_wing, PartialWingOptions, WingOptions};
use lowpoly_vehicles::options::resolve;
use lowpoly_vehicles::{Node, Scene, SharedRandom};

fn car_with_seed(seed: u64, excluded: &[CarPart]) -> Node {
    let mut scene = Scene::new();
    let options = PartialCarOptions::default().random(SharedRandom::seeded(seed));
    create_car("car", &mut scene, options, excluded).expect("car builds")
}

#[test]
fn test_seeded_cars_repeat() {
    let a = car_with_seed(11, &CarPart::ALL);
    let b = car_with_seed(11, &CarPart::ALL);
    assert_eq!(a.names(), b.names());
    for (x, y) in a.children.iter().zip(&b.children) {
        assert_eq!(x.transform, y.transform);
        let (mx, my) = (x.mesh.as_ref().expect("leaf"), y.mesh.as_ref().expect("leaf"));
        assert_eq!(mx.vertices(), my.vertices());
        assert_eq!(mx.triangles(), my.triangles());
    }
}

#[test]
fn test_many_seeds_build_valid_cars() {
    for seed in 0..20 {
        let car = car_with_seed(seed, &[]);
        assert!(car.mesh.as_ref().expect("merged mesh").validate(), "seed {}", seed);
    }
}

#[test]
fn test_partial_car_exclusion() {
    let car = car_with_seed(5, &[CarPart::WheelFrontLeft, CarPart::LicensePlateRear]);
    let names = car.names();
    assert_eq!(names, vec!["car", "merged", "front_wheel_left", "license_plate_rear"]);
}

#[test]
fn test_airplane_and_car_share_a_scene() {
    let mut scene = Scene::new();
    let random = SharedRandom::seeded(1);
    let plane = create_airplane(
        "plane",
        &mut scene,
        PartialAirplaneOptions::default().random(random.clone()),
        &[AirplanePart::Engine, AirplanePart::EngineHolder],
    )
    .expect("airplane builds");
    let car = create_car("car", &mut scene, PartialCarOptions::default().random(random), &[]).expect("car builds");

    assert_eq!(plane.children.len(), 9);
    assert!(car.is_leaf());
    let names: Vec<&str> = scene.materials().iter().map(|m| m.name.as_str()).collect();
    assert!(names.contains(&"plane_body"));
    assert!(names.contains(&"car_body"));
}

#[test]
fn test_engine_rests_on_ground() {
    let mut scene = Scene::new();
    for scale in [0.5, 1.0, 2.0] {
        let engine = create_engine("engine", &mut scene, PartialEngineOptions::default().scale(scale))
            .expect("engine builds");
        let (min, _) = engine.mesh.bounding_box();
        assert_relative_eq!(min.y, 0.0, epsilon = 1e-9);
    }
}

#[test]
fn test_wheel_quality_sets_face_count() {
    let mut scene = Scene::new();
    for quality in [3u32, 8, 16, 40] {
        let wheel = create_wheel("wheel", &mut scene, PartialWheelOptions::default().quality(quality))
            .expect("wheel builds");
        assert_eq!(wheel.mesh.triangle_count(), WheelFaceCounts::for_quality(quality).total());
    }
}

#[test]
fn test_wing_falloff_is_clamped() {
    let mut scene = Scene::new();
    let mut wing = |falloff: f64| {
        create_wing("wing", &mut scene, PartialWingOptions::default().falloff(falloff))
            .expect("wing builds")
            .mesh
    };
    assert_eq!(wing(-3.0).vertices(), wing(0.0).vertices());
    assert_eq!(wing(7.0).vertices(), wing(1.0).vertices());
}

#[test]
fn test_path_follows_stations() {
    let mut scene = Scene::new();
    let path = create_path(
        "road",
        &mut scene,
        PartialPathOptions::default()
            .path(Some(vec![
                glam::DVec3::ZERO,
                glam::DVec3::new(0.0, 0.0, 4.0),
                glam::DVec3::new(3.0, 0.0, 8.0),
            ]))
            .width(2.0),
    )
    .expect("path builds");
    assert_eq!(path.mesh.triangle_count(), 8);
}

#[test]
fn test_empty_partial_resolves_to_defaults() {
    let defaults = WingOptions::default();
    assert_eq!(resolve(PartialWingOptions::default(), defaults.clone()), defaults);

    let car = CarOptions::default();
    assert_eq!(resolve(PartialCarOptions::default(), car.clone()), car);
}
