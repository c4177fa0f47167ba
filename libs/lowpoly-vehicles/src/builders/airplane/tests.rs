//! # Airplane Tests

use super::*;
use crate::consolidate::MERGED_NODE_NAME;
use approx::assert_relative_eq;
use std::rc::Rc;

fn options() -> PartialAirplaneOptions {
    PartialAirplaneOptions::default().random(SharedRandom::constant(0.5))
}

fn airplane(options: PartialAirplaneOptions, excluded: &[AirplanePart]) -> Node {
    let mut scene = Scene::new();
    create_airplane("plane", &mut scene, options, excluded).unwrap()
}

#[test]
fn test_nothing_excluded_is_one_solid() {
    let node = airplane(options(), &[]);
    assert_eq!(node.name, "plane");
    assert!(node.is_leaf());
    assert!(node.mesh.as_ref().unwrap().validate());
}

#[test]
fn test_everything_excluded_keeps_every_part() {
    let node = airplane(options(), &AirplanePart::ALL);
    assert!(node.mesh.is_none());
    // body, 4 wings, fin, 4 engines, 4 holders
    assert_eq!(node.children.len(), 14);
    assert!(node.find(MERGED_NODE_NAME).is_none());
    for name in ["body", "wing_main_left", "top_tail_wing", "engine_right_2", "holder_left_1"] {
        assert!(node.find(name).is_some(), "missing {}", name);
    }
}

#[test]
fn test_merge_loses_no_triangles() {
    let merged = airplane(options(), &[]);
    let split = airplane(options(), &AirplanePart::ALL);
    assert_eq!(merged.total_triangle_count(), split.total_triangle_count());
}

#[test]
fn test_engines_excluded_stay_beside_merged() {
    let node = airplane(options(), &[AirplanePart::Engine]);
    let names = node.names();
    assert_eq!(names[1], MERGED_NODE_NAME);
    assert_eq!(node.children.len(), 5);
    assert!(names.contains(&"engine_left_1"));
}

#[test]
fn test_single_engine_per_wing() {
    let node = airplane(options().engines_per_wing(1u32), &AirplanePart::ALL);
    assert_eq!(node.children.len(), 10);
}

#[test]
fn test_no_engines() {
    let node = airplane(options().engines_per_wing(0u32), &AirplanePart::ALL);
    assert_eq!(node.children.len(), 6);
}

#[test]
fn test_palette_is_complementary() {
    let mut scene = Scene::new();
    create_airplane("plane", &mut scene, options(), &[]).unwrap();
    // 0.5 * 255 rounds to step 128, its complement is step 0
    let diffuse: Vec<Color3> = scene.materials().iter().map(|m| m.diffuse).collect();
    assert!(diffuse.contains(&Color3::from_hue_step(128)));
    assert!(diffuse.contains(&Color3::from_hue_step(0)));
}

#[test]
fn test_given_body_material_reaches_engines() {
    let mut scene = Scene::new();
    let paint = scene.default_material("paint");
    let node = create_airplane(
        "plane",
        &mut scene,
        options().body_material(paint.clone()),
        &[AirplanePart::Engine],
    )
    .unwrap();
    let engine = node.find("engine_left_1").unwrap();
    assert!(Rc::ptr_eq(&engine.materials[0], &paint));
}

#[test]
fn test_main_wings_mirror_each_other() {
    let node = airplane(options(), &AirplanePart::ALL);
    let left = node.find("wing_main_left").unwrap();
    let right = node.find("wing_main_right").unwrap();
    assert_eq!(left.transform.position.x, right.transform.position.x);
    assert_relative_eq!(left.transform.position.z, -right.transform.position.z);

    let left_mesh = left.mesh.as_ref().unwrap();
    let right_mesh = right.mesh.as_ref().unwrap();
    for (l, r) in left_mesh.vertices().iter().zip(right_mesh.vertices()) {
        assert_relative_eq!(l.z, -r.z, epsilon = 1e-12);
    }
}

#[test]
fn test_fuselage_height_matches_silhouette() {
    let (mesh, height) = fuselage(AirplaneBody::B747).unwrap();
    // the middle station carries the full silhouette
    assert_relative_eq!(mesh.extend_size().y * 2.0, height, epsilon = 1e-9);
    assert_relative_eq!(height, (360.0 - 274.0) * 0.01, epsilon = 1e-12);
}

#[test]
fn test_body_types_differ() {
    let (b747, _) = fuselage(AirplaneBody::B747).unwrap();
    let (a380, _) = fuselage(AirplaneBody::A380Stretch).unwrap();
    assert_ne!(b747.vertex_count(), a380.vertex_count());
}

#[test]
fn test_engine_mounts_spread_over_span() {
    let wing = main_wing_defaults(WingBuilderVersion::V1);
    let right = engine_mounts(DVec3::ZERO, &wing, 3, Side::Right);
    let left = engine_mounts(DVec3::ZERO, &wing, 3, Side::Left);
    assert_eq!(right.len(), 3);
    assert!(right[0].z < right[1].z && right[1].z < right[2].z);
    for (l, r) in left.iter().zip(&right) {
        assert_relative_eq!(l.x, r.x, epsilon = 1e-12);
        assert_relative_eq!(l.z, -r.z, epsilon = 1e-12);
    }
}

#[test]
fn test_single_mount_at_third_of_span() {
    let wing = WingOptions {
        yaw: 0.0,
        ..main_wing_defaults(WingBuilderVersion::V1)
    };
    let mounts = engine_mounts(DVec3::ZERO, &wing, 1, Side::Right);
    assert_relative_eq!(mounts[0].z, 0.33 * 4.0, epsilon = 1e-12);
}

#[test]
fn test_tail_wing_follows_main_length() {
    let main = WingOptions {
        length: 5.0,
        ..main_wing_defaults(WingBuilderVersion::V1)
    };
    let tail = tail_wing_defaults(WingBuilderVersion::V1, &main);
    assert_relative_eq!(tail.width, 1.0);
    assert_relative_eq!(tail.length, 1.3);
}

#[test]
fn test_caller_wing_options_override_defaults() {
    let mut scene = Scene::new();
    let node = create_airplane(
        "plane",
        &mut scene,
        options().main_wing(PartialWingOptions::default().length(6.0)),
        &[AirplanePart::MainWingRight],
    )
    .unwrap();
    let right = node.find("wing_main_right").unwrap();
    let (min, max) = crate::anchors::bounds(right.mesh.as_ref().unwrap().vertices());
    // yawed by pi/8, the span still reaches well past the default length
    assert!(max.z - min.z > 5.0);
}
