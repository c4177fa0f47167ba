//! # Path Frames
//!
//! Tangent / normal / binormal frames along a polyline.
//!
//! The first normal is chosen from the first tangent against a fixed
//! reference direction; every later normal is carried from the previous
//! binormal so the frame rotates minimally along the path.

use crate::error::MeshError;
use config::constants::{approx_zero, AXIS_ALIGNMENT_EPSILON, MIN_PATH_STATIONS};
use glam::DVec3;

/// A local coordinate frame at one path station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Direction of travel
    pub tangent: DVec3,
    /// Profile x axis
    pub normal: DVec3,
    /// Profile y axis
    pub binormal: DVec3,
}

/// Frames and cumulative distances for every station of a path.
#[derive(Debug, Clone)]
pub struct PathFrames {
    frames: Vec<Frame>,
    distances: Vec<f64>,
}

impl PathFrames {
    /// Computes frames along `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::DegeneratePath`] when the path has fewer than two
    /// stations or all stations coincide.
    pub fn new(path: &[DVec3]) -> Result<Self, MeshError> {
        if path.len() < MIN_PATH_STATIONS {
            return Err(MeshError::degenerate_path(format!(
                "path needs at least {} stations, got {}",
                MIN_PATH_STATIONS,
                path.len()
            )));
        }

        let last = path.len() - 1;
        let first_dir = first_non_null(path, 0)
            .ok_or_else(|| MeshError::degenerate_path("all path stations coincide"))?;

        let mut tangents = Vec::with_capacity(path.len());
        tangents.push(first_dir.normalize());
        for i in 1..last {
            let prev = prev_non_null(path, i).unwrap_or(DVec3::ZERO);
            let next = first_non_null(path, i).unwrap_or(prev);
            tangents.push((prev + next).normalize_or_zero());
        }
        let last_dir = last_non_null(path).unwrap_or(first_dir);
        tangents.push(last_dir.normalize_or_zero());

        let t0 = tangents[0];
        let reference = reference_direction(t0);
        let n0 = t0.cross(reference).normalize_or_zero();
        let b0 = t0.cross(n0).normalize_or_zero();

        let mut frames = Vec::with_capacity(path.len());
        frames.push(Frame {
            tangent: t0,
            normal: n0,
            binormal: b0,
        });

        for tangent in tangents.into_iter().skip(1) {
            let prev = frames[frames.len() - 1];
            let carried = prev.binormal.cross(tangent);
            let normal = if carried.length_squared() > 0.0 {
                carried.normalize()
            } else {
                prev.normal
            };
            let binormal = tangent.cross(normal).normalize_or_zero();
            frames.push(Frame {
                tangent,
                normal,
                binormal,
            });
        }

        let mut distances = Vec::with_capacity(path.len());
        let mut total = 0.0;
        distances.push(total);
        for pair in path.windows(2) {
            total += pair[1].distance(pair[0]);
            distances.push(total);
        }

        Ok(Self { frames, distances })
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; construction rejects empty paths.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// All frames in station order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frame at a station.
    pub fn frame(&self, index: usize) -> Frame {
        self.frames[index]
    }

    /// Cumulative arc length at a station.
    pub fn distance(&self, index: usize) -> f64 {
        self.distances[index]
    }

    /// Total arc length of the path.
    pub fn total_length(&self) -> f64 {
        self.distances.last().copied().unwrap_or(0.0)
    }
}

/// Reference direction for the first normal.
///
/// Down (-Y) unless the tangent is vertical, then +X unless the tangent runs
/// along X, then +Z.
fn reference_direction(tangent: DVec3) -> DVec3 {
    if (tangent.y.abs() - 1.0).abs() > AXIS_ALIGNMENT_EPSILON {
        DVec3::NEG_Y
    } else if (tangent.x.abs() - 1.0).abs() > AXIS_ALIGNMENT_EPSILON {
        DVec3::X
    } else {
        DVec3::Z
    }
}

/// First non-zero step forward from station `i`.
fn first_non_null(path: &[DVec3], i: usize) -> Option<DVec3> {
    path[i + 1..]
        .iter()
        .map(|p| *p - path[i])
        .find(|d| !approx_zero(d.length()))
}

/// First non-zero step backward into station `i`.
fn prev_non_null(path: &[DVec3], i: usize) -> Option<DVec3> {
    path[..i]
        .iter()
        .rev()
        .map(|p| path[i] - *p)
        .find(|d| !approx_zero(d.length()))
}

/// Last non-zero step into the final station.
fn last_non_null(path: &[DVec3]) -> Option<DVec3> {
    prev_non_null(path, path.len() - 1)
}
