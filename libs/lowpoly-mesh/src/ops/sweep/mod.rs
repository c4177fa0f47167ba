//! # Sweep
//!
//! Sweeps a 2D profile along a 3D path, producing a ribbon of quads between
//! consecutive stations with optional end caps.
//!
//! ## Placement
//!
//! At station `i` a profile point `(x, y)` lands at
//! `path[i] + (normal * x + binormal * y) * scale(i)`, using the frames from
//! [`PathFrames`].
//!
//! ## Topology
//!
//! - Vertices are ring-major: all profile points of station 0, then station 1...
//! - Adjacent profile points `j, j+1` on stations `i, i+1` form a quad split
//!   into two triangles. With `close_shape` the last profile point also
//!   connects back to the first.
//! - A counter-clockwise profile swept forward faces outwards; caps face
//!   away from the path.
//! - Caps are triangle fans to the barycentre of the end ring, on their own
//!   copy of the ring vertices.

mod frames;

#[cfg(test)]
mod tests;

pub use frames::{Frame, PathFrames};

use crate::error::MeshError;
use crate::mesh::Mesh;
use config::constants::MIN_PROFILE_POINTS;
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Which path ends receive a cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cap {
    /// Open at both ends
    #[default]
    None,
    /// Cap at the first station
    Start,
    /// Cap at the last station
    End,
    /// Cap at both ends
    All,
}

impl Cap {
    fn has_start(self) -> bool {
        matches!(self, Cap::Start | Cap::All)
    }

    fn has_end(self) -> bool {
        matches!(self, Cap::End | Cap::All)
    }
}

/// Which faces of generated geometry are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SideOrientation {
    /// Faces as generated
    #[default]
    Front,
    /// Faces with reversed winding
    Back,
    /// Both, the back copy appended after the front faces
    Double,
}

impl SideOrientation {
    /// Applies the orientation to a freshly generated single-sided mesh.
    ///
    /// Normals are computed from the topology before any back copy is made.
    pub fn apply(self, mesh: &mut Mesh) {
        match self {
            SideOrientation::Front => mesh.compute_normals(),
            SideOrientation::Back => {
                mesh.reverse_winding();
                mesh.compute_normals();
            }
            SideOrientation::Double => {
                mesh.compute_normals();
                mesh.double_sided();
            }
        }
    }
}

/// Position of one station along the path, handed to the scale function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Station {
    /// Station index
    pub index: usize,
    /// Total number of stations
    pub count: usize,
    /// Cumulative arc length up to this station
    pub distance: f64,
}

impl Station {
    /// Index as a fraction of the path, 0 at the start and 1 at the end.
    pub fn fraction(&self) -> f64 {
        if self.count <= 1 {
            0.0
        } else {
            self.index as f64 / (self.count - 1) as f64
        }
    }
}

/// Parameters for [`sweep`].
#[derive(Default)]
pub struct SweepParams<'a> {
    /// Per-station profile scale; 1 when absent
    pub scale: Option<&'a dyn Fn(Station) -> f64>,
    /// End caps
    pub cap: Cap,
    /// Emitted faces
    pub side: SideOrientation,
    /// Connect the last profile point back to the first
    pub close_shape: bool,
}

impl<'a> SweepParams<'a> {
    /// Default parameters: unit scale, no caps, front faces, open profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-station scale function.
    pub fn scale(mut self, scale: &'a dyn Fn(Station) -> f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Sets the caps.
    pub fn cap(mut self, cap: Cap) -> Self {
        self.cap = cap;
        self
    }

    /// Sets the side orientation.
    pub fn side(mut self, side: SideOrientation) -> Self {
        self.side = side;
        self
    }

    /// Closes the profile.
    pub fn close_shape(mut self, close_shape: bool) -> Self {
        self.close_shape = close_shape;
        self
    }
}

impl std::fmt::Debug for SweepParams<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SweepParams")
            .field("scale", &self.scale.map(|_| "fn"))
            .field("cap", &self.cap)
            .field("side", &self.side)
            .field("close_shape", &self.close_shape)
            .finish()
    }
}

/// Sweeps `shape` along `path`.
///
/// # Errors
///
/// - [`MeshError::DegenerateProfile`] for a profile with fewer than two points
/// - [`MeshError::DegeneratePath`] for a path with fewer than two stations
///
/// # Example
///
/// ```rust
/// use lowpoly_mesh::ops::sweep::{sweep, SweepParams};
/// use glam::{DVec2, DVec3};
///
/// let shape = [DVec2::new(-1.0, 0.0), DVec2::new(1.0, 0.0)];
/// let path = [DVec3::ZERO, DVec3::Z];
/// let mesh = sweep(&shape, &path, &SweepParams::new()).unwrap();
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.triangle_count(), 2);
/// ```
pub fn sweep(shape: &[DVec2], path: &[DVec3], params: &SweepParams<'_>) -> Result<Mesh, MeshError> {
    if shape.len() < MIN_PROFILE_POINTS {
        return Err(MeshError::degenerate_profile(format!(
            "profile needs at least {} points, got {}",
            MIN_PROFILE_POINTS,
            shape.len()
        )));
    }

    let frames = PathFrames::new(path)?;
    let rings = place_rings(shape, path, &frames, params);
    let mesh = build_sweep_mesh(&rings, shape.len(), params);
    log::trace!(
        "sweep: {} profile points x {} stations, {:?} -> {} triangles",
        shape.len(),
        path.len(),
        params.cap,
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Positions every profile point at every station.
fn place_rings(
    shape: &[DVec2],
    path: &[DVec3],
    frames: &PathFrames,
    params: &SweepParams<'_>,
) -> Vec<Vec<DVec3>> {
    let count = path.len();
    path.iter()
        .zip(frames.frames())
        .enumerate()
        .map(|(index, (station, frame))| {
            let scale = params.scale.map_or(1.0, |f| {
                f(Station {
                    index,
                    count,
                    distance: frames.distance(index),
                })
            });
            shape
                .iter()
                .map(|p| *station + (frame.normal * p.x + frame.binormal * p.y) * scale)
                .collect()
        })
        .collect()
}

fn build_sweep_mesh(rings: &[Vec<DVec3>], ring_len: usize, params: &SweepParams<'_>) -> Mesh {
    let edges = if params.close_shape { ring_len } else { ring_len - 1 };
    let cap_count = usize::from(params.cap.has_start()) + usize::from(params.cap.has_end());

    let mut mesh = Mesh::with_capacity(
        rings.len() * ring_len + cap_count * (ring_len + 1),
        (rings.len() - 1) * edges * 2 + cap_count * edges,
    );

    for ring in rings {
        for p in ring {
            mesh.add_vertex(*p);
        }
    }

    let n = ring_len as u32;
    for i in 0..(rings.len() as u32 - 1) {
        for j in 0..edges as u32 {
            let j_next = (j + 1) % n;
            let a = i * n + j;
            let b = i * n + j_next;
            let c = (i + 1) * n + j;
            let d = (i + 1) * n + j_next;
            mesh.add_triangle(a, b, c);
            mesh.add_triangle(d, c, b);
        }
    }

    if params.cap.has_start() {
        add_cap(&mut mesh, &rings[0], edges, false);
    }
    if params.cap.has_end() {
        add_cap(&mut mesh, &rings[rings.len() - 1], edges, true);
    }

    params.side.apply(&mut mesh);
    mesh
}

/// Fans `ring` to its barycentre on fresh vertices.
fn add_cap(mesh: &mut Mesh, ring: &[DVec3], edges: usize, at_end: bool) {
    let barycentre = ring.iter().copied().sum::<DVec3>() / ring.len() as f64;
    let centre = mesh.add_vertex(barycentre);
    let base = mesh.vertex_count() as u32;
    for p in ring {
        mesh.add_vertex(*p);
    }

    let n = ring.len() as u32;
    for j in 0..edges as u32 {
        let a = base + j;
        let b = base + (j + 1) % n;
        if at_end {
            mesh.add_triangle(centre, a, b);
        } else {
            mesh.add_triangle(centre, b, a);
        }
    }
}
