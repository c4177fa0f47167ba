//! # Cylinder Primitive
//!
//! Generates mesh for cylinder and cone shapes standing on the Y axis,
//! centred on the origin.

use crate::error::MeshError;
use crate::mesh::Mesh;
use glam::DVec3;
use std::f64::consts::TAU;

/// Creates a cylinder or cone mesh.
///
/// # Arguments
///
/// * `height` - Height along the Y axis, centred on the origin
/// * `diameter_top` - Diameter at y = h/2 (0 for an apex)
/// * `diameter_bottom` - Diameter at y = -h/2 (0 for an apex)
/// * `tessellation` - Number of segments around the circumference
///
/// # Example
///
/// ```rust
/// use lowpoly_mesh::primitives::create_cylinder;
///
/// // Regular cylinder
/// let mesh = create_cylinder(10.0, 5.0, 5.0, 32).unwrap();
///
/// // Cone pointing up
/// let cone = create_cylinder(10.0, 0.0, 5.0, 32).unwrap();
/// ```
pub fn create_cylinder(
    height: f64,
    diameter_top: f64,
    diameter_bottom: f64,
    tessellation: u32,
) -> Result<Mesh, MeshError> {
    if height <= 0.0 {
        return Err(MeshError::invalid_parameter(format!(
            "Cylinder height must be positive: {}",
            height
        )));
    }

    if diameter_top < 0.0 || diameter_bottom < 0.0 {
        return Err(MeshError::invalid_parameter(format!(
            "Cylinder diameters must be non-negative: top={}, bottom={}",
            diameter_top, diameter_bottom
        )));
    }

    if diameter_top == 0.0 && diameter_bottom == 0.0 {
        return Err(MeshError::degenerate(
            "Cylinder must have at least one non-zero diameter",
        ));
    }

    if tessellation < 3 {
        return Err(MeshError::invalid_parameter(format!(
            "Cylinder tessellation must be at least 3: {}",
            tessellation
        )));
    }

    let radius_top = diameter_top / 2.0;
    let radius_bottom = diameter_bottom / 2.0;
    let (y_bottom, y_top) = (-height / 2.0, height / 2.0);
    let segments = tessellation;

    let mut mesh = Mesh::new();

    let ring = |mesh: &mut Mesh, radius: f64, y: f64| -> Vec<u32> {
        if radius > 0.0 {
            (0..segments)
                .map(|j| {
                    let theta = TAU * j as f64 / segments as f64;
                    mesh.add_vertex(DVec3::new(radius * theta.cos(), y, radius * theta.sin()))
                })
                .collect()
        } else {
            vec![mesh.add_vertex(DVec3::new(0.0, y, 0.0))]
        }
    };

    let bottom = ring(&mut mesh, radius_bottom, y_bottom);
    let top = ring(&mut mesh, radius_top, y_top);

    // Side faces, outward facing
    for j in 0..segments as usize {
        let j_next = (j + 1) % segments as usize;
        match (bottom.len() > 1, top.len() > 1) {
            (true, true) => {
                mesh.add_triangle(bottom[j], top[j_next], bottom[j_next]);
                mesh.add_triangle(bottom[j], top[j], top[j_next]);
            }
            (true, false) => mesh.add_triangle(bottom[j], top[0], bottom[j_next]),
            (false, true) => mesh.add_triangle(bottom[0], top[j], top[j_next]),
            (false, false) => {}
        }
    }

    // Caps on their own vertices so they shade flat
    if radius_bottom > 0.0 {
        add_cap(&mut mesh, radius_bottom, y_bottom, segments, false);
    }
    if radius_top > 0.0 {
        add_cap(&mut mesh, radius_top, y_top, segments, true);
    }

    mesh.compute_normals();
    Ok(mesh)
}

fn add_cap(mesh: &mut Mesh, radius: f64, y: f64, segments: u32, facing_up: bool) {
    let centre = mesh.add_vertex(DVec3::new(0.0, y, 0.0));
    let base = mesh.vertex_count() as u32;
    for j in 0..segments {
        let theta = TAU * j as f64 / segments as f64;
        mesh.add_vertex(DVec3::new(radius * theta.cos(), y, radius * theta.sin()));
    }
    for j in 0..segments {
        let a = base + j;
        let b = base + (j + 1) % segments;
        if facing_up {
            mesh.add_triangle(centre, b, a);
        } else {
            mesh.add_triangle(centre, a, b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cylinder_basic() {
        let mesh = create_cylinder(10.0, 5.0, 5.0, 32).unwrap();
        assert_eq!(mesh.triangle_count(), 32 * 2 + 32 * 2);
        assert!(mesh.validate());
    }

    #[test]
    fn test_cylinder_centered_on_y() {
        let mesh = create_cylinder(10.0, 4.0, 4.0, 32).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_relative_eq!(min.y, -5.0, epsilon = 1e-12);
        assert_relative_eq!(max.y, 5.0, epsilon = 1e-12);
        assert_relative_eq!(max.x, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cone_apex_on_top() {
        let mesh = create_cylinder(4.0, 0.0, 2.0, 24).unwrap();
        // 24 sides plus the bottom cap
        assert_eq!(mesh.triangle_count(), 48);
        let top = mesh.vertices().iter().filter(|v| v.y > 1.99).count();
        assert_eq!(top, 1);
    }

    #[test]
    fn test_side_faces_point_outwards() {
        let mesh = create_cylinder(2.0, 2.0, 2.0, 8).unwrap();
        for t in &mesh.triangles()[..16] {
            let a = mesh.vertex(t[0]);
            let n = (mesh.vertex(t[1]) - a).cross(mesh.vertex(t[2]) - a);
            assert!(n.dot(DVec3::new(a.x, 0.0, a.z)) > 0.0);
        }
    }

    #[test]
    fn test_cylinder_invalid_height() {
        assert!(create_cylinder(0.0, 5.0, 5.0, 32).is_err());
    }

    #[test]
    fn test_cylinder_both_diameters_zero() {
        assert!(create_cylinder(10.0, 0.0, 0.0, 32).is_err());
    }

    #[test]
    fn test_cylinder_too_few_segments() {
        assert!(create_cylinder(10.0, 5.0, 5.0, 2).is_err());
    }
}
