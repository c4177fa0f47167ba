//! # Car Light Builder
//!
//! A thin regular polygon pushed along +Z with its front face at `z = 0`.
//! The result is flat shaded.

use crate::error::BuildError;
use crate::options::{DefaultOptions, Resolve};
use crate::profiles::light_profile;
use crate::scene::{MaterialRef, Scene, Solid};
use config::constants::MIN_LIGHT_SIDES;
use glam::DVec3;
use log::debug;
use lowpoly_mesh::ops::{sweep, Cap, SideOrientation, SweepParams};

builder_version! {
    /// Versions of the car light defaults.
    CarLightBuilderVersion
}

creation_options! {
    /// Options for [`create_car_light`].
    pub struct CarLightOptions / PartialCarLightOptions : CarLightBuilderVersion {
        /// Number of polygon corners
        sides: u32,
        /// Corner distance from the centre
        radius: f64,
        /// Thickness along +Z
        depth: f64,
        /// Rotation of the polygon about its centre
        rotation: f64,
        material: Option<MaterialRef>,
    }
}

impl DefaultOptions for CarLightOptions {
    type Version = CarLightBuilderVersion;

    fn default_options(version: CarLightBuilderVersion) -> Self {
        match version {
            CarLightBuilderVersion::V1 => Self {
                version,
                sides: 4,
                radius: 0.09,
                depth: 0.009,
                rotation: 0.0,
                material: None,
            },
        }
    }
}

/// Creates a car light from partial options.
pub fn create_car_light(
    name: &str,
    scene: &mut Scene,
    options: PartialCarLightOptions,
) -> Result<Solid, BuildError> {
    build_car_light(name, scene, &options.resolve())
}

/// Creates a car light from complete options.
///
/// # Errors
///
/// [`BuildError::InvalidOption`] for fewer than three sides.
pub fn build_car_light(
    name: &str,
    scene: &mut Scene,
    options: &CarLightOptions,
) -> Result<Solid, BuildError> {
    if options.sides < MIN_LIGHT_SIDES {
        return Err(BuildError::invalid_option(
            "sides",
            format!("a light needs at least {} sides, got {}", MIN_LIGHT_SIDES, options.sides),
        ));
    }

    let shape = light_profile(options.sides, options.radius, options.rotation);
    let path = [DVec3::ZERO, DVec3::new(0.0, 0.0, options.depth)];
    let params = SweepParams::new()
        .cap(Cap::Start)
        .side(SideOrientation::Front);
    let mut mesh = sweep(&shape, &path, &params)?;
    mesh.to_flat_shaded();

    let material = match &options.material {
        Some(material) => material.clone(),
        None => scene.default_material(&format!("{}_mat", name)),
    };

    debug!("car light '{}': {} sides", name, options.sides);
    Ok(Solid::new(name, mesh, material))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn light(options: PartialCarLightOptions) -> Solid {
        let mut scene = Scene::new();
        create_car_light("light", &mut scene, options).unwrap()
    }

    #[test]
    fn test_default_square_light() {
        let solid = light(PartialCarLightOptions::default());
        // 4 wall quads + 4 cap triangles
        assert_eq!(solid.mesh.triangle_count(), 12);
        assert_eq!(solid.mesh.vertex_count(), 36);
        assert!(solid.mesh.normals().is_some());
    }

    #[test]
    fn test_depth_and_radius() {
        let solid = light(PartialCarLightOptions::default().radius(1.0).depth(0.5));
        let (min, max) = solid.mesh.bounding_box();
        assert_relative_eq!(min.z, 0.0, epsilon = 1e-12);
        assert_relative_eq!(max.z, 0.5, epsilon = 1e-12);
        // square corners sit on the diagonals
        assert_relative_eq!(max.x, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn test_cap_faces_forward() {
        let solid = light(PartialCarLightOptions::default().sides(6u32));
        let cap_start = 2 * 6;
        for t in &solid.mesh.triangles()[cap_start..] {
            let normal = solid.mesh.normals().unwrap()[t[0] as usize];
            assert_relative_eq!(normal.z, -1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_too_few_sides_rejected() {
        let mut scene = Scene::new();
        let result = create_car_light("light", &mut scene, PartialCarLightOptions::default().sides(2u32));
        assert!(matches!(result, Err(BuildError::InvalidOption { .. })));
    }

    #[test]
    fn test_fallback_material_named_after_light() {
        let mut scene = Scene::new();
        let solid = create_car_light("head", &mut scene, PartialCarLightOptions::default()).unwrap();
        assert_eq!(solid.materials[0].name, "head_mat");
    }
}
