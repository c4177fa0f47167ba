//! # Profile Library
//!
//! Hand-authored cross sections in source pixel units, and the procedural
//! profiles (wing section, engine holder, light polygon, wheel rings) used
//! by the builders.
//!
//! Pixel profiles are flat `[x0, y0, x1, y1, ...]` lists with y growing
//! downwards. [`pixels_to_profile`] converts them to model units with y up.

use crate::anchors;
use config::constants::PROFILE_SCALE;
use glam::DVec2;
use std::f64::consts::TAU;

// =============================================================================
// PIXEL PROFILES
// =============================================================================

/// Outer cowl of the airplane engine, swept around the engine axis.
pub const ENGINE_BODY: [f64; 14] = [
    401.0, 231.0, 309.0, 202.0, 396.0, 179.0, 482.0, 167.0, 614.0, 161.0, 720.0, 165.0, 810.0,
    180.0,
];

/// Trailing lip of the engine cowl.
pub const ENGINE_RING: [f64; 16] = [
    810.0, 180.0, 825.0, 182.0, 836.0, 188.0, 840.0, 192.0, 840.0, 201.0, 832.0, 211.0, 821.0,
    215.0, 810.0, 217.0,
];

/// Side silhouette of a stretched A380-like fuselage.
pub const A380_STRETCH_BODY: [f64; 42] = [
    35.0, 293.0, 128.0, 280.0, 218.0, 274.0, 623.0, 274.0, 672.0, 274.0, 704.0, 276.0, 728.0,
    284.0, 750.0, 302.0, 760.0, 311.0, 777.0, 324.0, 780.0, 329.0, 775.0, 340.0, 760.0, 347.0,
    725.0, 353.0, 675.0, 354.0, 330.0, 359.0, 260.0, 353.0, 143.0, 334.0, 72.0, 317.0, 35.0,
    305.0, 35.0, 293.0,
];

/// Side silhouette of a B747-like fuselage.
pub const B747_BODY: [f64; 54] = [
    34.0, 297.0, 39.0, 287.0, 56.0, 283.0, 451.0, 283.0, 506.0, 279.0, 559.0, 274.0, 607.0,
    274.0, 685.0, 274.0, 709.0, 275.0, 722.0, 279.0, 737.0, 291.0, 755.0, 300.0, 776.0, 312.0,
    783.0, 318.0, 782.0, 326.0, 769.0, 336.0, 753.0, 343.0, 726.0, 350.0, 679.0, 357.0, 666.0,
    359.0, 616.0, 360.0, 295.0, 360.0, 251.0, 355.0, 44.0, 311.0, 38.0, 307.0, 34.0, 303.0,
    34.0, 297.0,
];

/// Vertical tail fin. The last point is the fin root and becomes the origin.
pub const TAIL_FIN: [f64; 10] = [55.0, 282.0, 11.0, 176.0, 56.0, 175.0, 191.0, 282.0, 55.0, 282.0];

/// Side silhouette of the car, front at low x.
pub const CAR_SILHOUETTE: [[f64; 2]; 17] = [
    [162.0, 107.0],
    [162.0, 78.0],
    [220.0, 78.0],
    [251.0, 43.0],
    [330.0, 43.0],
    [330.0, 78.0],
    [330.0, 78.0],
    [330.0, 107.0],
    [328.0, 107.0],
    [317.0, 91.0],
    [294.0, 91.0],
    [283.0, 107.0],
    [212.0, 107.0],
    [201.0, 91.0],
    [178.0, 91.0],
    [167.0, 107.0],
    [162.0, 107.0],
];

/// Converts a flat pixel list to model units, flipping y to point up.
pub fn pixels_to_profile(pixels: &[f64], scale: f64) -> Vec<DVec2> {
    pixels
        .chunks_exact(2)
        .map(|p| DVec2::new(p[0] * scale, -p[1] * scale))
        .collect()
}

/// Engine cowl profile, centred on its centroid.
pub fn engine_body_profile() -> Vec<DVec2> {
    let mut profile = pixels_to_profile(&ENGINE_BODY, PROFILE_SCALE);
    anchors::recentre(&mut profile);
    profile
}

/// Engine lip profile, centred on its centroid.
pub fn engine_ring_profile() -> Vec<DVec2> {
    let mut profile = pixels_to_profile(&ENGINE_RING, PROFILE_SCALE);
    anchors::recentre(&mut profile);
    profile
}

/// Tail fin profile with its root at the origin, pointing backwards and up.
pub fn fin_profile(scale: f64) -> Vec<DVec2> {
    let root = DVec2::new(TAIL_FIN[TAIL_FIN.len() - 2], TAIL_FIN[TAIL_FIN.len() - 1]);
    TAIL_FIN
        .chunks_exact(2)
        .map(|p| -(DVec2::new(p[0], p[1]) - root) * scale)
        .collect()
}

// =============================================================================
// PROCEDURAL PROFILES
// =============================================================================

/// Seven-point airfoil section of the given chord and thickness.
///
/// The section spans `[-width/2, 1.05 * width/2]` along x.
pub fn wing_profile(width: f64, height: f64) -> Vec<DVec2> {
    let x = width / 2.0;
    let y = height;
    vec![
        DVec2::new(-x, -y),
        DVec2::new(-x, -y / 2.0),
        DVec2::new(0.8 * x, 2.0 * y),
        DVec2::new(x, y),
        DVec2::new(1.05 * x, 0.0),
        DVec2::new(x, -y),
        DVec2::new(-x, -y),
    ]
}

/// Skewed quad joining a wing to an engine, closed back to its first point.
pub fn engine_holder_profile(width: f64, height: f64, skewing: f64, scale: f64) -> Vec<DVec2> {
    [
        DVec2::new(width * skewing, 0.0),
        DVec2::new(0.0, height),
        DVec2::new(width * 0.8, height),
        DVec2::new(width * 3.0, 0.0),
        DVec2::new(width * skewing, 0.0),
    ]
    .iter()
    .map(|p| *p * scale)
    .collect()
}

/// Regular polygon with `sides` corners, repeated first corner included.
///
/// The first corner sits half a step clockwise of +Y and the corners then
/// run counter-clockwise seen down +Z. `rotation` turns the whole polygon.
pub fn light_profile(sides: u32, radius: f64, rotation: f64) -> Vec<DVec2> {
    let n = sides as f64;
    (0..=sides)
        .map(|i| {
            let angle = i as f64 / n * -TAU + std::f64::consts::PI / n + rotation;
            DVec2::new(angle.sin() * radius, angle.cos() * radius)
        })
        .collect()
}

/// `quality - 1` points on a circle of `radius`, counter-clockwise seen down
/// +Z.
pub fn wheel_ring(quality: u32, radius: f64) -> Vec<DVec2> {
    let n = quality.saturating_sub(1);
    (0..n)
        .rev()
        .map(|i| {
            let angle = i as f64 / n as f64 * TAU;
            DVec2::new(angle.sin() * radius, angle.cos() * radius)
        })
        .collect()
}
