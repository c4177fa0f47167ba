//! # Wheel Builder
//!
//! A tire tube around the Z axis closed by two hubcap discs.
//!
//! ## Topology
//!
//! With `n = quality - 1` points per ring, the tube is built from four rings
//! in order: hubcap at the front (`z = -depth/2`), tire at the front, tire
//! at the back, hubcap at the back. Consecutive rings are joined by strips
//! of `2n` triangles: the front sidewall, the tread and the back sidewall.
//! Each hubcap is a fan of `n` triangles around a centre vertex.
//!
//! Material slots: 0 tire (the tube), 1 hubcap (the two fans).

use crate::color::Color3;
use crate::error::BuildError;
use crate::options::{DefaultOptions, Resolve};
use crate::profiles::wheel_ring;
use crate::scene::{Material, MaterialRef, Scene, Solid};
use config::constants::{DEFAULT_WHEEL_QUALITY, MIN_WHEEL_QUALITY};
use glam::{DVec2, DVec3};
use log::debug;
use lowpoly_mesh::Mesh;
use serde::{Deserialize, Serialize};

pub const TIRE_COLOR: &str = "#4D4D4B";
pub const HUBCAP_COLOR: &str = "#E0E0DB";
const FALLBACK_EMISSION: f64 = 0.15;

builder_version! {
    /// Versions of the wheel defaults.
    WheelBuilderVersion
}

/// Kind of wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WheelType {
    #[default]
    Car,
}

creation_options! {
    /// Options for [`create_wheel`].
    pub struct WheelOptions / PartialWheelOptions : WheelBuilderVersion {
        wheel_type: WheelType,
        /// Outer tire radius
        radius: f64,
        /// Width along the axle
        depth: f64,
        /// Hubcap radius relative to the tire radius
        hubcap_size: f64,
        /// One more than the number of points per ring
        quality: u32,
        tire_material: Option<MaterialRef>,
        hubcap_material: Option<MaterialRef>,
    }
}

impl DefaultOptions for WheelOptions {
    type Version = WheelBuilderVersion;

    fn default_options(version: WheelBuilderVersion) -> Self {
        match version {
            WheelBuilderVersion::V1 => Self {
                version,
                wheel_type: WheelType::Car,
                radius: 1.0,
                depth: 1.0,
                hubcap_size: 0.5,
                quality: DEFAULT_WHEEL_QUALITY,
                tire_material: None,
                hubcap_material: None,
            },
        }
    }
}

/// Triangle counts of a wheel by surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelFaceCounts {
    /// Both annuli between hubcap and tire
    pub sidewall: usize,
    /// Outer band of the tire
    pub tread: usize,
    /// Both hubcap fans
    pub caps: usize,
}

impl WheelFaceCounts {
    pub fn for_quality(quality: u32) -> Self {
        let n = quality.saturating_sub(1) as usize;
        Self {
            sidewall: 4 * n,
            tread: 2 * n,
            caps: 2 * n,
        }
    }

    pub fn total(&self) -> usize {
        self.sidewall + self.tread + self.caps
    }
}

/// Creates a wheel from partial options.
pub fn create_wheel(
    name: &str,
    scene: &mut Scene,
    options: PartialWheelOptions,
) -> Result<Solid, BuildError> {
    build_wheel(name, scene, &options.resolve())
}

/// Creates a wheel from complete options.
///
/// # Errors
///
/// [`BuildError::InvalidOption`] when `quality` is below 3.
pub fn build_wheel(name: &str, scene: &mut Scene, options: &WheelOptions) -> Result<Solid, BuildError> {
    if options.quality < MIN_WHEEL_QUALITY {
        return Err(BuildError::invalid_option(
            "quality",
            format!(
                "wheel quality must be at least {}, got {}",
                MIN_WHEEL_QUALITY, options.quality
            ),
        ));
    }

    let tire_material = match &options.tire_material {
        Some(material) => material.clone(),
        None => fallback_material(scene, "tire", TIRE_COLOR, true)?,
    };
    let hubcap_material = match &options.hubcap_material {
        Some(material) => material.clone(),
        None => fallback_material(scene, "hubcap", HUBCAP_COLOR, false)?,
    };

    let tire_ring = wheel_ring(options.quality, options.radius);
    let hub_ring: Vec<DVec2> = tire_ring.iter().map(|p| *p * options.hubcap_size).collect();
    let half_depth = options.depth / 2.0;

    let tire = tire_tube(&tire_ring, &hub_ring, half_depth);
    let hubcaps = hubcap_fans(&hub_ring, half_depth);

    let mut mesh = Mesh::with_capacity(
        tire.vertex_count() + hubcaps.vertex_count(),
        tire.triangle_count() + hubcaps.triangle_count(),
    );
    mesh.append(&tire, &[0]);
    mesh.append(&hubcaps, &[1]);

    debug!(
        "wheel '{}': {} vertices, {} triangles",
        name,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(Solid::with_materials(
        name,
        mesh,
        vec![tire_material, hubcap_material],
    ))
}

fn fallback_material(
    scene: &mut Scene,
    name: &str,
    hex: &str,
    matte: bool,
) -> Result<MaterialRef, BuildError> {
    let diffuse = Color3::from_hex(hex)?;
    let mut material = Material::new(name)
        .with_diffuse(diffuse)
        .with_emissive(diffuse.scale(FALLBACK_EMISSION));
    if matte {
        material = material.with_specular(Color3::BLACK);
    }
    Ok(scene.add_material(material))
}

/// Four rings joined by three strips.
fn tire_tube(tire_ring: &[DVec2], hub_ring: &[DVec2], half_depth: f64) -> Mesh {
    let n = tire_ring.len() as u32;
    let mut mesh = Mesh::with_capacity(4 * n as usize, 6 * n as usize);

    let rings = [
        (hub_ring, -half_depth),
        (tire_ring, -half_depth),
        (tire_ring, half_depth),
        (hub_ring, half_depth),
    ];
    for (ring, z) in rings {
        for p in ring {
            mesh.add_vertex(DVec3::new(p.x, p.y, z));
        }
    }

    for i in 1..4 {
        let start = i * n;
        for j in start + 1..start + n {
            mesh.add_triangle(j - 1 - n, j, j - 1);
            mesh.add_triangle(j, j - 1 - n, j - n);
        }
    }
    for i in 1..4 {
        let start = i * n;
        let last = start + n - 1;
        mesh.add_triangle(last - n, start, last);
        mesh.add_triangle(start, last - n, start - n);
    }

    mesh.compute_normals();
    mesh
}

/// Front fan facing -Z, back fan facing +Z.
fn hubcap_fans(hub_ring: &[DVec2], half_depth: f64) -> Mesh {
    let n = hub_ring.len() as u32;
    let mut mesh = Mesh::with_capacity(2 * (n as usize + 1), 2 * n as usize);

    let front = mesh.add_vertex(DVec3::new(0.0, 0.0, -half_depth));
    for p in hub_ring {
        mesh.add_vertex(DVec3::new(p.x, p.y, -half_depth));
    }
    for i in 2..=n {
        mesh.add_triangle(front, front + i, front + i - 1);
    }
    mesh.add_triangle(front, front + 1, front + n);

    let back = mesh.add_vertex(DVec3::new(0.0, 0.0, half_depth));
    for p in hub_ring {
        mesh.add_vertex(DVec3::new(p.x, p.y, half_depth));
    }
    for i in 2..=n {
        mesh.add_triangle(back + i, back, back + i - 1);
    }
    mesh.add_triangle(back + 1, back, back + n);

    mesh.compute_normals();
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wheel(options: PartialWheelOptions) -> Solid {
        let mut scene = Scene::new();
        create_wheel("wheel", &mut scene, options).unwrap()
    }

    fn face_normal(mesh: &Mesh, t: [u32; 3]) -> DVec3 {
        let a = mesh.vertex(t[0]);
        (mesh.vertex(t[1]) - a).cross(mesh.vertex(t[2]) - a)
    }

    #[test]
    fn test_face_counts_default_quality() {
        let solid = wheel(PartialWheelOptions::default());
        let counts = WheelFaceCounts::for_quality(16);
        assert_eq!(counts.sidewall, 60);
        assert_eq!(counts.caps, 30);
        assert_eq!(solid.mesh.triangle_count(), counts.total());
        assert_eq!(solid.mesh.triangles_in_slot(0), counts.sidewall + counts.tread);
        assert_eq!(solid.mesh.triangles_in_slot(1), counts.caps);
    }

    #[test]
    fn test_face_counts_hold_for_any_quality() {
        for quality in [3, 4, 7, 32] {
            let solid = wheel(PartialWheelOptions::default().quality(quality));
            let counts = WheelFaceCounts::for_quality(quality);
            assert_eq!(solid.mesh.triangle_count(), counts.total());
            assert_eq!(solid.mesh.triangles_in_slot(1), 2 * (quality as usize - 1));
            assert!(solid.mesh.validate());
        }
    }

    #[test]
    fn test_quality_below_three_rejected() {
        let mut scene = Scene::new();
        let result = create_wheel("wheel", &mut scene, PartialWheelOptions::default().quality(2u32));
        assert!(matches!(result, Err(BuildError::InvalidOption { .. })));
    }

    #[test]
    fn test_extents() {
        let solid = wheel(PartialWheelOptions::default().radius(2.0).depth(0.5));
        let (min, max) = solid.mesh.bounding_box();
        assert_relative_eq!(max.y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(min.z, -0.25, epsilon = 1e-12);
        assert_relative_eq!(max.z, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_tread_faces_outwards() {
        let solid = wheel(PartialWheelOptions::default());
        let n = 15;
        // the tread is the second strip
        for t in &solid.mesh.triangles()[2 * n..4 * n] {
            let a = solid.mesh.vertex(t[0]);
            let normal = face_normal(&solid.mesh, *t);
            assert!(normal.dot(DVec3::new(a.x, a.y, 0.0)) > 0.0);
        }
    }

    #[test]
    fn test_hubcaps_face_away() {
        let solid = wheel(PartialWheelOptions::default());
        let caps = &solid.mesh.triangles()[90..];
        for (k, t) in caps.iter().enumerate() {
            let normal = face_normal(&solid.mesh, *t);
            if k < 15 {
                assert!(normal.z < 0.0);
            } else {
                assert!(normal.z > 0.0);
            }
        }
    }

    #[test]
    fn test_fallback_materials() {
        let mut scene = Scene::new();
        let solid = create_wheel("wheel", &mut scene, PartialWheelOptions::default()).unwrap();
        assert_eq!(scene.materials().len(), 2);
        assert_eq!(solid.materials[0].specular, Color3::BLACK);
        assert_eq!(solid.materials[0].diffuse, Color3::from_hex(TIRE_COLOR).unwrap());
        assert_relative_eq!(
            solid.materials[1].emissive.r,
            solid.materials[1].diffuse.r * 0.15,
            epsilon = 1e-12
        );
    }
}
