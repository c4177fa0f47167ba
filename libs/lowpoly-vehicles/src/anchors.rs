//! # Anchors
//!
//! Point math shared by the composers: centroids, extents, axle midpoints
//! and the quarter turn that stands a silhouette authored in the XZ plane
//! up into the XY plane.

use glam::{DMat4, DVec2, DVec3};
use std::f64::consts::FRAC_PI_2;

/// Mean of the points; zero for an empty slice.
pub fn centroid(points: &[DVec2]) -> DVec2 {
    if points.is_empty() {
        return DVec2::ZERO;
    }
    points.iter().copied().sum::<DVec2>() / points.len() as f64
}

/// Moves the points so their centroid is the origin. Returns the old
/// centroid.
pub fn recentre(points: &mut [DVec2]) -> DVec2 {
    let centre = centroid(points);
    for p in points.iter_mut() {
        *p -= centre;
    }
    centre
}

/// Distance between the highest and lowest point.
pub fn vertical_extent(points: &[DVec2]) -> f64 {
    let (low, high) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), p| {
            (low.min(p.y), high.max(p.y))
        });
    if low > high {
        0.0
    } else {
        high - low
    }
}

/// Axis-aligned bounds of a point set; zero box for an empty slice.
pub fn bounds(points: &[DVec3]) -> (DVec3, DVec3) {
    let Some(first) = points.first().copied() else {
        return (DVec3::ZERO, DVec3::ZERO);
    };
    points
        .iter()
        .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)))
}

pub fn midpoint(a: DVec3, b: DVec3) -> DVec3 {
    (a + b) * 0.5
}

/// Quarter turn about X by -90 degrees: `(x, y, z)` becomes `(x, z, -y)`.
pub fn stand_up_matrix() -> DMat4 {
    DMat4::from_rotation_x(-FRAC_PI_2)
}

/// Applies [`stand_up_matrix`] to a point.
pub fn stand_up(point: DVec3) -> DVec3 {
    stand_up_matrix().transform_point3(point)
}

/// Drops y of a point authored in the XZ plane.
pub fn xz(point: DVec3) -> DVec2 {
    DVec2::new(point.x, point.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_recentre_returns_old_centroid() {
        let mut points = vec![DVec2::new(1.0, 1.0), DVec2::new(3.0, 5.0)];
        let centre = recentre(&mut points);
        assert_eq!(centre, DVec2::new(2.0, 3.0));
        assert_eq!(points[0], DVec2::new(-1.0, -2.0));
    }

    #[test]
    fn test_vertical_extent() {
        let points = [DVec2::new(0.0, -1.0), DVec2::new(5.0, 2.5), DVec2::new(1.0, 0.0)];
        assert_relative_eq!(vertical_extent(&points), 3.5, epsilon = 1e-12);
        assert_eq!(vertical_extent(&[]), 0.0);
    }

    #[test]
    fn test_bounds() {
        let (min, max) = bounds(&[DVec3::new(1.0, -2.0, 3.0), DVec3::new(-1.0, 4.0, 0.0)]);
        assert_eq!(min, DVec3::new(-1.0, -2.0, 0.0));
        assert_eq!(max, DVec3::new(1.0, 4.0, 3.0));
    }

    #[test]
    fn test_stand_up_maps_z_to_y() {
        let p = stand_up(DVec3::new(2.0, 0.0, 3.0));
        assert_relative_eq!(p.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 3.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-12);

        let q = stand_up(DVec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(q.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(
            midpoint(DVec3::ZERO, DVec3::new(2.0, 4.0, -2.0)),
            DVec3::new(1.0, 2.0, -1.0)
        );
    }
}
