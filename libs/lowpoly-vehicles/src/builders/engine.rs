//! # Engine Builder
//!
//! A jet engine along the X axis: a cowl and a trailing lip, each swept
//! around a full circle, plus a cone for the fan and exhaust.
//!
//! Material slots: 0 cowl, 1 lip, 2 cone.

use crate::error::BuildError;
use crate::options::{DefaultOptions, Resolve};
use crate::profiles::{engine_body_profile, engine_ring_profile};
use crate::scene::{MaterialRef, Scene, Solid};
use config::constants::{DEFAULT_CYLINDER_TESSELLATION, ENGINE_PATH_STATIONS};
use glam::DVec3;
use log::debug;
use lowpoly_mesh::ops::{sweep, SideOrientation, SweepParams};
use lowpoly_mesh::primitives::create_cylinder;
use lowpoly_mesh::{Mesh, Transform};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Offset of the lip behind the cowl.
const RING_OFFSET_X: f64 = -2.9;
const RING_SCALE: f64 = 0.88;
/// Offset of the cone centre in front of the cowl.
const CONE_OFFSET_X: f64 = 1.8;
const CONE_HEIGHT: f64 = 4.0;
const CONE_DIAMETER: f64 = 2.0;

builder_version! {
    /// Versions of the engine defaults.
    EngineBuilderVersion
}

creation_options! {
    /// Options for [`create_engine`].
    pub struct EngineOptions / PartialEngineOptions : EngineBuilderVersion {
        /// Uniform scale
        scale: f64,
        /// Additional scale along the engine axis
        length: f64,
        /// Roll about the engine axis
        angle: f64,
        body_material: Option<MaterialRef>,
        innard_material: Option<MaterialRef>,
        ring_material: Option<MaterialRef>,
    }
}

impl DefaultOptions for EngineOptions {
    type Version = EngineBuilderVersion;

    fn default_options(version: EngineBuilderVersion) -> Self {
        match version {
            EngineBuilderVersion::V1 => Self {
                version,
                scale: 1.0,
                length: 1.0,
                angle: 0.0,
                body_material: None,
                innard_material: None,
                ring_material: None,
            },
        }
    }
}

/// Creates an engine from partial options.
pub fn create_engine(
    name: &str,
    scene: &mut Scene,
    options: PartialEngineOptions,
) -> Result<Solid, BuildError> {
    build_engine(name, scene, &options.resolve())
}

/// Creates an engine from complete options.
///
/// The result has its lowest vertex at `y = 0`.
pub fn build_engine(name: &str, scene: &mut Scene, options: &EngineOptions) -> Result<Solid, BuildError> {
    let mut material = |given: &Option<MaterialRef>, fallback: &str| match given {
        Some(material) => material.clone(),
        None => scene.default_material(fallback),
    };
    let materials = vec![
        material(&options.body_material, "engine_body"),
        material(&options.ring_material, "engine_ring"),
        material(&options.innard_material, "engine_innard"),
    ];

    let path = axis_circle(ENGINE_PATH_STATIONS);
    let params = SweepParams::new()
        .side(SideOrientation::Double)
        .close_shape(true);

    let body = sweep(&engine_body_profile(), &path, &params)?;

    let mut ring = sweep(&engine_ring_profile(), &path, &params)?;
    ring.bake(&Transform {
        position: DVec3::new(RING_OFFSET_X, 0.0, 0.0),
        scaling: DVec3::splat(RING_SCALE),
        ..Transform::IDENTITY
    });

    let mut cone = create_cylinder(
        CONE_HEIGHT,
        0.0,
        CONE_DIAMETER,
        DEFAULT_CYLINDER_TESSELLATION,
    )?;
    cone.bake(&Transform {
        position: DVec3::new(CONE_OFFSET_X, 0.0, 0.0),
        rotation: DVec3::new(0.0, 0.0, -FRAC_PI_2),
        ..Transform::IDENTITY
    });

    let mut mesh = Mesh::new();
    mesh.append(&body, &[0]);
    mesh.append(&ring, &[1]);
    mesh.append(&cone, &[2]);

    mesh.bake(&Transform::from_scaling(DVec3::new(
        options.scale * options.length,
        options.scale,
        options.scale,
    )));
    mesh.bake(&Transform::from_rotation(DVec3::new(options.angle, 0.0, 0.0)));

    let (min, _) = mesh.bounding_box();
    mesh.translate(DVec3::new(0.0, -min.y, 0.0));

    debug!(
        "engine '{}': {} vertices, {} triangles",
        name,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(Solid::with_materials(name, mesh, materials))
}

/// Unit circle around the X axis, first and last station coinciding.
fn axis_circle(stations: usize) -> Vec<DVec3> {
    let last = (stations - 1) as f64;
    (0..stations)
        .map(|i| {
            let angle = i as f64 / last * TAU;
            DVec3::new(0.0, angle.sin(), angle.cos())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;
    use std::rc::Rc;

    fn engine(options: PartialEngineOptions) -> Solid {
        let mut scene = Scene::new();
        create_engine("engine", &mut scene, options).unwrap()
    }

    #[test]
    fn test_lowest_vertex_at_zero() {
        let solid = engine(PartialEngineOptions::default());
        let (min, _) = solid.mesh.bounding_box();
        assert_relative_eq!(min.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_flipped_engine_also_rests_on_zero() {
        let solid = engine(PartialEngineOptions::default().angle(PI));
        let (min, _) = solid.mesh.bounding_box();
        assert_relative_eq!(min.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_three_material_slots() {
        let mut scene = Scene::new();
        let solid = create_engine("engine", &mut scene, PartialEngineOptions::default()).unwrap();
        assert_eq!(solid.materials.len(), 3);
        assert_eq!(scene.materials().len(), 3);
        assert_eq!(solid.mesh.material_slot_count(), 3);
        // cone: 24 sides + 24 cap triangles
        assert_eq!(solid.mesh.triangles_in_slot(2), 48);
        assert!(solid.mesh.validate());
    }

    #[test]
    fn test_given_materials_used() {
        let mut scene = Scene::new();
        let paint = scene.default_material("paint");
        let options = PartialEngineOptions::default()
            .body_material(paint.clone())
            .ring_material(paint.clone());
        let solid = create_engine("engine", &mut scene, options).unwrap();
        assert!(Rc::ptr_eq(&solid.materials[0], &paint));
        assert!(Rc::ptr_eq(&solid.materials[1], &paint));
        // only the innard fell back
        assert_eq!(scene.materials().len(), 2);
    }

    #[test]
    fn test_length_stretches_axis() {
        let short = engine(PartialEngineOptions::default());
        let long = engine(PartialEngineOptions::default().length(2.0));
        let short_x = short.mesh.extend_size().x;
        let long_x = long.mesh.extend_size().x;
        assert_relative_eq!(long_x, short_x * 2.0, epsilon = 1e-9);
        assert_relative_eq!(
            long.mesh.extend_size().y,
            short.mesh.extend_size().y,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_scale_is_uniform() {
        let unit = engine(PartialEngineOptions::default());
        let half = engine(PartialEngineOptions::default().scale(0.5));
        assert_relative_eq!(
            half.mesh.extend_size().z,
            unit.mesh.extend_size().z * 0.5,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_axis_circle_closes() {
        let path = axis_circle(13);
        assert_eq!(path.len(), 13);
        assert_relative_eq!(path[0].distance(path[12]), 0.0, epsilon = 1e-12);
        assert_relative_eq!(path[3].y, 1.0, epsilon = 1e-12);
    }
}
