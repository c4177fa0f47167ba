//! # Wing Builder
//!
//! A tapered airfoil swept along a straight span, used for the main and tail
//! wings of the airplane.
//!
//! ## Placement
//!
//! The section is swept from the origin along +Z, translated so the root
//! leading edge sits at the origin, then yawed, pitched and (for left wings)
//! mirrored across Z. Each step is baked before the next one.

use crate::error::BuildError;
use crate::options::{DefaultOptions, Resolve};
use crate::profiles::wing_profile;
use crate::scene::{MaterialRef, Scene, Solid};
use config::constants::{approx_equal, clamp_unit, WING_PATH_STATIONS};
use glam::{DVec2, DVec3};
use log::{debug, trace};
use lowpoly_mesh::ops::{sweep, Cap, SideOrientation, Station, SweepParams};
use lowpoly_mesh::Transform;
use std::f64::consts::PI;

builder_version! {
    /// Versions of the wing defaults.
    WingBuilderVersion
}

creation_options! {
    /// Options for [`create_wing`].
    pub struct WingOptions / PartialWingOptions : WingBuilderVersion {
        /// Chord of the section
        width: f64,
        /// Thickness of the section
        height: f64,
        /// Span
        length: f64,
        /// Sweep angle about Y
        yaw: f64,
        /// Dihedral angle about the span axis
        pitch: f64,
        /// Root scale relative to the tip, clamped to `[0, 1]`
        falloff: f64,
        /// Build the right wing instead of the mirrored left one
        right: bool,
        /// Cross section replacing the default airfoil
        shape: Option<Vec<DVec2>>,
        material: Option<MaterialRef>,
    }
}

impl DefaultOptions for WingOptions {
    type Version = WingBuilderVersion;

    fn default_options(version: WingBuilderVersion) -> Self {
        match version {
            WingBuilderVersion::V1 => Self {
                version,
                width: 1.4,
                height: 0.061,
                length: 4.0,
                yaw: PI / 8.0,
                pitch: 0.0,
                falloff: 0.3,
                right: false,
                shape: None,
                material: None,
            },
        }
    }
}

/// Creates a wing from partial options.
///
/// # Errors
///
/// Fails when the sweep rejects the section or a zero-length span.
pub fn create_wing(
    name: &str,
    scene: &mut Scene,
    options: PartialWingOptions,
) -> Result<Solid, BuildError> {
    build_wing(name, scene, &options.resolve())
}

/// Creates a wing from complete options.
pub fn build_wing(name: &str, scene: &mut Scene, options: &WingOptions) -> Result<Solid, BuildError> {
    let falloff = clamp_falloff(options.falloff);
    let half_width = options.width / 2.0;

    let shape = match &options.shape {
        Some(shape) => shape.clone(),
        None => wing_profile(options.width, options.height),
    };
    let last = (WING_PATH_STATIONS - 1) as f64;
    let path: Vec<DVec3> = (0..WING_PATH_STATIONS)
        .map(|i| DVec3::new(0.0, 0.0, i as f64 / last * options.length))
        .collect();

    let scale = |station: Station| wing_scale(station.fraction(), falloff);
    let params = SweepParams::new()
        .scale(&scale)
        .cap(Cap::Start)
        .side(SideOrientation::Double);
    let mut mesh = sweep(&shape, &path, &params)?;

    mesh.bake(&Transform::from_position(DVec3::new(
        -half_width,
        0.0,
        -options.length,
    )));
    mesh.bake(&Transform::from_rotation(DVec3::new(0.0, PI + options.yaw, 0.0)));

    let mut tilt = Transform::from_rotation(DVec3::new(0.0, 0.0, options.pitch));
    if !options.right {
        tilt.scaling.z = -1.0;
    }
    mesh.bake(&tilt);

    let material = match &options.material {
        Some(material) => material.clone(),
        None => scene.default_material("wing"),
    };

    debug!(
        "wing '{}': {} vertices, {} triangles",
        name,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(Solid::new(name, mesh, material))
}

/// Profile scale at `fraction` of the span: `falloff` at the root, 1 at the
/// tip.
pub fn wing_scale(fraction: f64, falloff: f64) -> f64 {
    fraction + (1.0 - fraction) * falloff
}

fn clamp_falloff(falloff: f64) -> f64 {
    let clamped = clamp_unit(falloff);
    if !approx_equal(clamped, falloff) {
        trace!("wing falloff {} clamped to {}", falloff, clamped);
    }
    clamped
}
