//! # Path Builder
//!
//! A flat strip, or an open box when `height > 0`, following a polyline.
//! The profile lies in the section plane with its bottom edge on the path.

use crate::error::BuildError;
use crate::options::{DefaultOptions, Resolve};
use crate::scene::{MaterialRef, Scene, Solid};
use glam::{DVec2, DVec3};
use log::debug;
use lowpoly_mesh::ops::{sweep, SideOrientation, SweepParams};

builder_version! {
    /// Versions of the path defaults.
    PathBuilderVersion
}

creation_options! {
    /// Options for [`create_path`].
    pub struct PathOptions / PartialPathOptions : PathBuilderVersion {
        /// Stations of the ribbon; a unit segment along +Z when absent
        path: Option<Vec<DVec3>>,
        width: f64,
        /// Wall height; a flat strip when not positive
        height: f64,
        material: Option<MaterialRef>,
    }
}

impl DefaultOptions for PathOptions {
    type Version = PathBuilderVersion;

    fn default_options(version: PathBuilderVersion) -> Self {
        match version {
            PathBuilderVersion::V1 => Self {
                version,
                path: None,
                width: 1.0,
                height: 0.0,
                material: None,
            },
        }
    }
}

/// Creates a path ribbon from partial options.
pub fn create_path(
    name: &str,
    scene: &mut Scene,
    options: PartialPathOptions,
) -> Result<Solid, BuildError> {
    build_path(name, scene, &options.resolve())
}

/// Creates a path ribbon from complete options.
///
/// # Errors
///
/// Fails for a path with fewer than two stations.
pub fn build_path(name: &str, scene: &mut Scene, options: &PathOptions) -> Result<Solid, BuildError> {
    let default_path;
    let path: &[DVec3] = match &options.path {
        Some(path) => path,
        None => {
            default_path = [DVec3::ZERO, DVec3::Z];
            &default_path
        }
    };

    let shape = ribbon_profile(finite_or_zero(options.width), finite_or_zero(options.height));
    let params = SweepParams::new()
        .side(SideOrientation::Back)
        .close_shape(true);
    let mut mesh = sweep(&shape, path, &params)?;
    mesh.to_flat_shaded();

    let material = match &options.material {
        Some(material) => material.clone(),
        None => scene.default_material(&format!("{}_mat", name)),
    };

    debug!(
        "path '{}': {} stations, {} triangles",
        name,
        path.len(),
        mesh.triangle_count()
    );
    Ok(Solid::new(name, mesh, material))
}

/// Cross section of the ribbon.
pub fn ribbon_profile(width: f64, height: f64) -> Vec<DVec2> {
    let half = width / 2.0;
    if height <= 0.0 {
        vec![DVec2::new(half, 0.0), DVec2::new(-half, 0.0)]
    } else {
        vec![
            DVec2::new(-half, 0.0),
            DVec2::new(-half, height),
            DVec2::new(half, height),
            DVec2::new(half, 0.0),
        ]
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_strip_on_default_path() {
        let mut scene = Scene::new();
        let solid = create_path("road", &mut scene, PartialPathOptions::default()).unwrap();
        // the closed two-point profile walks the strip both ways
        assert_eq!(solid.mesh.triangle_count(), 4);
        let (min, max) = solid.mesh.bounding_box();
        assert_relative_eq!(max.x - min.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(max.y - min.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(max.z, 1.0, epsilon = 1e-12);
        assert_eq!(solid.materials[0].name, "road_mat");
    }

    #[test]
    fn test_walled_path() {
        let mut scene = Scene::new();
        let path = vec![DVec3::ZERO, DVec3::new(0.0, 0.0, 2.0), DVec3::new(0.0, 0.0, 5.0)];
        let options = PartialPathOptions::default()
            .path(Some(path))
            .width(2.0)
            .height(0.5);
        let solid = create_path("wall", &mut scene, options).unwrap();
        // 4 closed edges x 2 segments x 2 triangles
        assert_eq!(solid.mesh.triangle_count(), 16);
        let (min, max) = solid.mesh.bounding_box();
        assert_relative_eq!(min.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(max.y, 0.5, epsilon = 1e-12);
        assert_relative_eq!(min.x, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_profile_shapes() {
        assert_eq!(ribbon_profile(2.0, 0.0).len(), 2);
        assert_eq!(ribbon_profile(2.0, -1.0).len(), 2);
        assert_eq!(ribbon_profile(2.0, 1.0)[1], DVec2::new(-1.0, 1.0));
    }

    #[test]
    fn test_single_station_rejected() {
        let mut scene = Scene::new();
        let options = PartialPathOptions::default().path(Some(vec![DVec3::ZERO]));
        assert!(create_path("p", &mut scene, options).is_err());
    }
}
