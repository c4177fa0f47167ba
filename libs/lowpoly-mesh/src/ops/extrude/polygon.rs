//! # Flat Polygon Extrusion
//!
//! Triangulates a [`Polygon2D`] (holes included) with ear clipping and lays
//! it in the XZ plane facing +Y. A positive depth adds a bottom face at
//! `y = -depth` and side walls around every contour.

use super::{signed_area, Polygon2D};
use crate::error::MeshError;
use crate::mesh::Mesh;
use crate::ops::sweep::SideOrientation;
use glam::{DVec2, DVec3};

/// Parameters for [`extrude_polygon`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PolygonExtrudeParams {
    /// Thickness below the face; 0 for a flat face
    pub depth: f64,
    /// Emitted faces
    pub side: SideOrientation,
}

/// Builds a (possibly thick) polygon mesh.
///
/// # Errors
///
/// - [`MeshError::DegenerateGeometry`] for an outer contour with fewer than
///   three points
/// - [`MeshError::InvalidParameter`] for a negative depth
/// - [`MeshError::Triangulation`] when ear clipping fails
///
/// # Example
///
/// ```rust
/// use lowpoly_mesh::ops::extrude::{extrude_polygon, Polygon2D, PolygonExtrudeParams};
/// use glam::DVec2;
///
/// let square = Polygon2D::new(vec![
///     DVec2::new(0.0, 0.0),
///     DVec2::new(1.0, 0.0),
///     DVec2::new(1.0, 1.0),
///     DVec2::new(0.0, 1.0),
/// ]);
/// let mesh = extrude_polygon(&square, &PolygonExtrudeParams::default()).unwrap();
/// assert_eq!(mesh.triangle_count(), 2);
/// ```
pub fn extrude_polygon(polygon: &Polygon2D, params: &PolygonExtrudeParams) -> Result<Mesh, MeshError> {
    if polygon.vertex_count() < 3 {
        return Err(MeshError::degenerate("Polygon must have at least 3 vertices"));
    }
    if params.depth < 0.0 || params.depth.is_nan() {
        return Err(MeshError::invalid_parameter(format!(
            "polygon depth must be non-negative: {}",
            params.depth
        )));
    }

    let face = triangulate(polygon)?;
    let points: Vec<DVec2> = polygon
        .outer
        .iter()
        .chain(polygon.holes.iter().flatten())
        .copied()
        .collect();

    let mut mesh = Mesh::with_capacity(points.len() * 2, face.len() * 2);

    for p in &points {
        mesh.add_vertex(DVec3::new(p.x, 0.0, p.y));
    }
    for tri in &face {
        mesh.add_triangle(tri[0], tri[1], tri[2]);
    }

    if params.depth > 0.0 {
        let base = mesh.vertex_count() as u32;
        for p in &points {
            mesh.add_vertex(DVec3::new(p.x, -params.depth, p.y));
        }
        for tri in &face {
            mesh.add_triangle(tri[0] + base, tri[2] + base, tri[1] + base);
        }

        add_walls(&mut mesh, &polygon.outer, params.depth, false);
        for hole in &polygon.holes {
            add_walls(&mut mesh, hole, params.depth, true);
        }
    }

    params.side.apply(&mut mesh);
    log::trace!(
        "extrude_polygon: {} points, {} holes, depth {} -> {} triangles",
        points.len(),
        polygon.holes.len(),
        params.depth,
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Ear-clips the polygon; every triangle is wound to face +Y.
fn triangulate(polygon: &Polygon2D) -> Result<Vec<[u32; 3]>, MeshError> {
    let mut coords = Vec::with_capacity(polygon.total_vertex_count() * 2);
    let mut hole_indices = Vec::with_capacity(polygon.holes.len());

    for p in &polygon.outer {
        coords.extend_from_slice(&[p.x, p.y]);
    }
    for hole in &polygon.holes {
        hole_indices.push(coords.len() / 2);
        for p in hole {
            coords.extend_from_slice(&[p.x, p.y]);
        }
    }

    let indices = earcutr::earcut(&coords, &hole_indices, 2)
        .map_err(|e| MeshError::triangulation(format!("{:?}", e)))?;
    if indices.is_empty() {
        log::debug!("ear clipping produced no triangles for {} points", coords.len() / 2);
    }

    let point = |i: usize| DVec2::new(coords[i * 2], coords[i * 2 + 1]);

    Ok(indices
        .chunks_exact(3)
        .map(|t| {
            let (a, b, c) = (point(t[0]), point(t[1]), point(t[2]));
            // y component of (b - a) x (c - a) with (u, v) -> (x, z)
            let facing = (b.y - a.y) * (c.x - a.x) - (b.x - a.x) * (c.y - a.y);
            if facing < 0.0 {
                [t[0] as u32, t[2] as u32, t[1] as u32]
            } else {
                [t[0] as u32, t[1] as u32, t[2] as u32]
            }
        })
        .collect())
}

/// Side walls around one contour, facing away from the solid.
fn add_walls(mesh: &mut Mesh, contour: &[DVec2], depth: f64, is_hole: bool) {
    let ccw = signed_area(contour) > 0.0;
    // Interior lies left of a counter-clockwise contour
    let outward_is_right = ccw != is_hole;

    let n = contour.len();
    for i in 0..n {
        let p = contour[i];
        let q = contour[(i + 1) % n];
        if p == q {
            continue;
        }

        let top_p = mesh.add_vertex(DVec3::new(p.x, 0.0, p.y));
        let top_q = mesh.add_vertex(DVec3::new(q.x, 0.0, q.y));
        let bot_p = mesh.add_vertex(DVec3::new(p.x, -depth, p.y));
        let bot_q = mesh.add_vertex(DVec3::new(q.x, -depth, q.y));

        if outward_is_right {
            mesh.add_triangle(top_p, top_q, bot_p);
            mesh.add_triangle(top_q, bot_q, bot_p);
        } else {
            mesh.add_triangle(top_p, bot_p, top_q);
            mesh.add_triangle(top_q, bot_p, bot_q);
        }
    }
}
