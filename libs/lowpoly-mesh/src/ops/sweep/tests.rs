//! # Sweep Tests
//!
//! Tests for path frames and profile sweeps.

use super::*;
use approx::assert_relative_eq;
use glam::{DVec2, DVec3};
use std::f64::consts::PI;

fn segment() -> Vec<DVec2> {
    vec![DVec2::new(-1.0, 0.0), DVec2::new(1.0, 0.0)]
}

fn square() -> Vec<DVec2> {
    vec![
        DVec2::new(-1.0, -1.0),
        DVec2::new(1.0, -1.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(-1.0, 1.0),
    ]
}

fn straight_path(stations: usize) -> Vec<DVec3> {
    (0..stations).map(|i| DVec3::new(0.0, 0.0, i as f64)).collect()
}

// =============================================================================
// FRAME TESTS
// =============================================================================

#[test]
fn test_frames_along_z_map_profile_to_xy() {
    let frames = PathFrames::new(&straight_path(3)).unwrap();
    for frame in frames.frames() {
        assert_relative_eq!(frame.tangent.z, 1.0, epsilon = 1e-12);
        assert_relative_eq!(frame.normal.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(frame.binormal.y, 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_frames_vertical_path_uses_x_reference() {
    let frames = PathFrames::new(&[DVec3::ZERO, DVec3::Y]).unwrap();
    let frame = frames.frame(0);
    assert_relative_eq!(frame.normal.length(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(frame.normal.dot(frame.tangent), 0.0, epsilon = 1e-12);
}

#[test]
fn test_frames_stay_orthonormal_on_circle() {
    let path: Vec<DVec3> = (0..13)
        .map(|i| {
            let t = i as f64 / 12.0 * 2.0 * PI;
            DVec3::new(0.0, t.sin(), t.cos())
        })
        .collect();
    let frames = PathFrames::new(&path).unwrap();
    for frame in frames.frames() {
        assert_relative_eq!(frame.tangent.dot(frame.normal), 0.0, epsilon = 1e-9);
        assert_relative_eq!(frame.tangent.dot(frame.binormal), 0.0, epsilon = 1e-9);
        assert_relative_eq!(frame.binormal.length(), 1.0, epsilon = 1e-9);
    }
}

#[test]
fn test_frames_skip_repeated_stations() {
    let path = [DVec3::ZERO, DVec3::ZERO, DVec3::Z, DVec3::Z * 2.0];
    let frames = PathFrames::new(&path).unwrap();
    assert_relative_eq!(frames.frame(0).tangent.z, 1.0, epsilon = 1e-12);
    assert_relative_eq!(frames.total_length(), 2.0, epsilon = 1e-12);
}

#[test]
fn test_frames_reject_single_station() {
    let result = PathFrames::new(&[DVec3::ZERO]);
    assert!(matches!(result, Err(MeshError::DegeneratePath { .. })));
}

#[test]
fn test_frames_reject_coincident_stations() {
    let result = PathFrames::new(&[DVec3::ONE, DVec3::ONE]);
    assert!(matches!(result, Err(MeshError::DegeneratePath { .. })));
}

// =============================================================================
// SWEEP TESTS
// =============================================================================

#[test]
fn test_sweep_places_profile_in_frames() {
    let mesh = sweep(&segment(), &straight_path(2), &SweepParams::new()).unwrap();
    assert_eq!(mesh.vertex(0), DVec3::new(-1.0, 0.0, 0.0));
    assert_eq!(mesh.vertex(1), DVec3::new(1.0, 0.0, 0.0));
    assert_eq!(mesh.vertex(3), DVec3::new(1.0, 0.0, 1.0));
}

#[test]
fn test_sweep_quad_winding() {
    let mesh = sweep(&segment(), &straight_path(2), &SweepParams::new()).unwrap();
    assert_eq!(mesh.triangle(0), [0, 1, 2]);
    assert_eq!(mesh.triangle(1), [3, 2, 1]);
}

#[test]
fn test_sweep_open_vs_closed_shape() {
    let open = sweep(&square(), &straight_path(2), &SweepParams::new()).unwrap();
    let closed = sweep(&square(), &straight_path(2), &SweepParams::new().close_shape(true)).unwrap();
    assert_eq!(open.triangle_count(), 6);
    assert_eq!(closed.triangle_count(), 8);
    assert_eq!(open.vertex_count(), closed.vertex_count());
}

#[test]
fn test_sweep_scale_function_receives_stations() {
    let scale = |s: Station| 1.0 - s.fraction();
    let mesh = sweep(&segment(), &straight_path(3), &SweepParams::new().scale(&scale)).unwrap();
    assert_relative_eq!(mesh.vertex(2).x, -0.5, epsilon = 1e-12);
    assert_relative_eq!(mesh.vertex(4).x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(mesh.vertex(5).x, 0.0, epsilon = 1e-12);
}

#[test]
fn test_sweep_caps_add_fans() {
    let params = SweepParams::new().cap(Cap::All).close_shape(true);
    let mesh = sweep(&square(), &straight_path(2), &params).unwrap();
    // 8 side triangles plus 4 per cap
    assert_eq!(mesh.triangle_count(), 16);
    // 8 ring vertices plus centre and ring copy per cap
    assert_eq!(mesh.vertex_count(), 18);
    assert_eq!(mesh.vertex(8), DVec3::ZERO);
}

#[test]
fn test_sweep_start_and_end_caps_face_away() {
    let params = SweepParams::new().cap(Cap::All).close_shape(true);
    let mesh = sweep(&square(), &straight_path(2), &params).unwrap();
    let normal_of = |t: [u32; 3]| {
        let a = mesh.vertex(t[0]);
        (mesh.vertex(t[1]) - a).cross(mesh.vertex(t[2]) - a)
    };
    let start = normal_of(mesh.triangle(8));
    let end = normal_of(mesh.triangle(12));
    assert!(start.z < 0.0);
    assert!(end.z > 0.0);
}

#[test]
fn test_sweep_double_side_doubles_geometry() {
    let single = sweep(&square(), &straight_path(3), &SweepParams::new()).unwrap();
    let double = sweep(
        &square(),
        &straight_path(3),
        &SweepParams::new().side(SideOrientation::Double),
    )
    .unwrap();
    assert_eq!(double.triangle_count(), single.triangle_count() * 2);
    assert_eq!(double.vertex_count(), single.vertex_count() * 2);
    assert!(double.validate());
}

#[test]
fn test_sweep_back_side_reverses_winding() {
    let back = sweep(
        &segment(),
        &straight_path(2),
        &SweepParams::new().side(SideOrientation::Back),
    )
    .unwrap();
    assert_eq!(back.triangle(0), [0, 2, 1]);
}

#[test]
fn test_sweep_ccw_profile_faces_outwards() {
    let mesh = sweep(&square(), &straight_path(2), &SweepParams::new().close_shape(true)).unwrap();
    for t in mesh.triangles() {
        let a = mesh.vertex(t[0]);
        let normal = (mesh.vertex(t[1]) - a).cross(mesh.vertex(t[2]) - a);
        assert!(normal.dot(DVec3::new(a.x, a.y, 0.0)) > 0.0);
    }
}

#[test]
fn test_sweep_produces_normals() {
    let mesh = sweep(&square(), &straight_path(2), &SweepParams::new()).unwrap();
    assert_eq!(mesh.normals().unwrap().len(), mesh.vertex_count());
}

#[test]
fn test_sweep_rejects_short_profile() {
    let result = sweep(&[DVec2::ZERO], &straight_path(2), &SweepParams::new());
    assert!(matches!(result, Err(MeshError::DegenerateProfile { .. })));
}

#[test]
fn test_sweep_rejects_short_path() {
    let result = sweep(&segment(), &straight_path(1), &SweepParams::new());
    assert!(matches!(result, Err(MeshError::DegeneratePath { .. })));
}
