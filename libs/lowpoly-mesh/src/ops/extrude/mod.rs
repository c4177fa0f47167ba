//! # Polygon Extrusion
//!
//! Flat polygon meshes in the XZ plane:
//! - **Polygon2D**: outer contour plus holes, coordinates are (x, z)
//! - **extrude_polygon**: triangulate the face at y = 0, optionally give it
//!   thickness downwards

mod polygon;


pub use polygon::{extrude_polygon, PolygonExtrudeParams};

use glam::{DVec2, DVec3};

/// A 2D polygon lying in the XZ plane.
///
/// Point `(u, v)` maps to world `(u, 0, v)`.
#[derive(Debug, Clone, Default)]
pub struct Polygon2D {
    /// Outer boundary vertices
    pub outer: Vec<DVec2>,
    /// Holes, each a closed contour inside the outer boundary
    pub holes: Vec<Vec<DVec2>>,
}

impl Polygon2D {
    /// Creates a new polygon from outer boundary vertices.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lowpoly_mesh::ops::extrude::Polygon2D;
    /// use glam::DVec2;
    ///
    /// let square = Polygon2D::new(vec![
    ///     DVec2::new(0.0, 0.0),
    ///     DVec2::new(1.0, 0.0),
    ///     DVec2::new(1.0, 1.0),
    ///     DVec2::new(0.0, 1.0),
    /// ]);
    /// assert_eq!(square.vertex_count(), 4);
    /// ```
    pub fn new(outer: Vec<DVec2>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Creates a polygon with holes.
    pub fn with_holes(outer: Vec<DVec2>, holes: Vec<Vec<DVec2>>) -> Self {
        Self { outer, holes }
    }

    /// Builds a polygon from points already in the XZ plane; y is dropped.
    pub fn from_xz(outer: &[DVec3], holes: &[Vec<DVec3>]) -> Self {
        let flatten = |points: &[DVec3]| points.iter().map(|p| DVec2::new(p.x, p.z)).collect();
        Self {
            outer: flatten(outer),
            holes: holes.iter().map(|h| flatten(h)).collect(),
        }
    }

    /// Returns the number of vertices in the outer boundary.
    pub fn vertex_count(&self) -> usize {
        self.outer.len()
    }

    /// Number of vertices over the outer boundary and every hole.
    pub fn total_vertex_count(&self) -> usize {
        self.outer.len() + self.holes.iter().map(Vec::len).sum::<usize>()
    }

    /// Returns true if the polygon has holes.
    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }

    /// Translates the polygon by the given offset.
    pub fn translate(&mut self, offset: DVec2) {
        for vertex in &mut self.outer {
            *vertex += offset;
        }
        for hole in &mut self.holes {
            for vertex in hole {
                *vertex += offset;
            }
        }
    }
}

/// Signed area of a closed contour; positive when counter-clockwise.
pub(crate) fn signed_area(contour: &[DVec2]) -> f64 {
    let n = contour.len();
    (0..n)
        .map(|i| {
            let a = contour[i];
            let b = contour[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        * 0.5
}
