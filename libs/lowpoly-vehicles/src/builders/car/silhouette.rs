//! # Car Silhouette
//!
//! The side outline of the car in the XZ plane (x forward to back, z up),
//! reshaped by randomly drawn proportions.
//!
//! After shaping, the outline is centred on x, its lowest point sits at
//! `z = 0` and it is then lifted by three quarters of the wheel radius.
//! The axle points are taken before that lift, so wheels stand on `z = 0`.

use crate::anchors::{bounds, midpoint, stand_up};
use crate::profiles::CAR_SILHOUETTE;
use crate::random::SharedRandom;
use config::constants::PROFILE_SCALE;
use glam::DVec3;
use lowpoly_mesh::Mesh;

const HOOD: [usize; 3] = [0, 1, 16];
const WINDSHIELD: [usize; 1] = [2];
const FRONT_TIRES: [usize; 4] = [12, 13, 14, 15];
const BACK_SEATS: [usize; 4] = [4, 5, 6, 7];
const BACK_WINDOW: [usize; 1] = [5];
const TRUNK: [usize; 2] = [6, 7];
const BACK_TIRES: [usize; 4] = [8, 9, 10, 11];
const BODY: [usize; 6] = [1, 2, 3, 4, 5, 6];

/// Outline segments left open in the skin for the windshield and the rear
/// window.
const GLAZED_SEGMENTS: [usize; 2] = [2, 4];

/// Wheel radius is the axle to wheel-arch distance divided by this.
const WHEEL_ARCH_RATIO: f64 = 1.6;
const BODY_LIFT_RATIO: f64 = 0.75;

/// Randomly drawn shape offsets of one car.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proportions {
    pub hood: f64,
    pub windshield: f64,
    pub front_tire: f64,
    pub back_seat: f64,
    pub trunk: f64,
    pub back_window: f64,
    pub back_tire: f64,
    pub tire_size: f64,
    pub body: f64,
}

impl Proportions {
    /// Takes six draws: hood, windshield, back seat, trunk, back window and
    /// body height, in that order. Each offset is bounded by the one it
    /// depends on.
    pub fn draw(random: &SharedRandom, max_hood_offset: f64, max_back_seat_offset: f64) -> Self {
        let hood = random.next() * max_hood_offset;
        let windshield = random.next() * hood;
        let back_seat = random.next() * max_back_seat_offset;
        let trunk = random.next() * hood;
        let back_window = random.next() * trunk;
        let tire_size = 0.5 + (hood + trunk) * 0.7;
        let body = tire_size * 0.1 + random.next() * 0.2;
        Self {
            hood,
            windshield,
            front_tire: hood - 0.2,
            back_seat,
            trunk,
            back_window,
            back_tire: -0.05 + back_seat,
            tire_size,
            body,
        }
    }
}

/// The shaped outline and the anchors derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Silhouette {
    pub points: Vec<DVec3>,
    /// Front axle, outline space
    pub front_axle: DVec3,
    /// Rear axle, outline space
    pub rear_axle: DVec3,
    pub wheel_size: f64,
}

impl Silhouette {
    pub fn new(proportions: &Proportions) -> Self {
        let p = proportions;
        let mut points: Vec<DVec3> = CAR_SILHOUETTE
            .iter()
            .map(|[x, y]| DVec3::new(x * PROFILE_SCALE, 0.0, -y * PROFILE_SCALE))
            .collect();

        shift_x(&mut points, &HOOD, -p.hood);
        shift_x(&mut points, &WINDSHIELD, -p.windshield);
        shift_x(&mut points, &FRONT_TIRES, -p.front_tire);
        shift_x(&mut points, &BACK_SEATS, p.back_seat);
        shift_x(&mut points, &BACK_WINDOW, p.back_window);
        shift_x(&mut points, &TRUNK, p.trunk);
        shift_x(&mut points, &BACK_TIRES, p.back_tire);
        for i in BODY {
            points[i].z += p.body;
        }
        for arch in [FRONT_TIRES, BACK_TIRES] {
            open_wheel_arch(&mut points, arch, p.tire_size);
        }

        let (min, max) = bounds(&points);
        let centre = (min + max) * 0.5;
        let ground = (max.z - min.z) / 2.0;
        for point in &mut points {
            *point -= centre;
            point.z += ground;
        }

        let front_axle = midpoint(points[FRONT_TIRES[0]], points[FRONT_TIRES[3]]);
        let rear_axle = midpoint(points[BACK_TIRES[0]], points[BACK_TIRES[3]]);
        let wheel_size = front_axle.distance(points[FRONT_TIRES[1]]) / WHEEL_ARCH_RATIO;

        for point in &mut points {
            point.z += wheel_size * BODY_LIFT_RATIO;
        }

        Self {
            points,
            front_axle,
            rear_axle,
            wheel_size,
        }
    }

    /// Top front corner of the hood, stood up into XY.
    pub fn hood_head(&self) -> DVec3 {
        stand_up(self.points[HOOD[1]])
    }

    /// Top back corner of the trunk, stood up into XY.
    pub fn trunk_head(&self) -> DVec3 {
        stand_up(self.points[TRUNK[0]])
    }

    /// Height of the hood front.
    pub fn hood_length(&self) -> f64 {
        self.points[HOOD[0]].distance(self.points[HOOD[1]])
    }

    /// Length of the roof between the windshield top and the rear window
    /// top.
    pub fn window_width(&self) -> f64 {
        (self.points[3].x - self.points[5].x).abs()
    }

    /// The band of width `width` around the outline, open over the glazed
    /// segments. Lies in the outline plane, flat shaded.
    pub fn skin(&self, width: f64) -> Mesh {
        let half = width / 2.0;
        let mut mesh = Mesh::with_capacity(self.points.len() * 2, (self.points.len() - 1) * 2);
        for p in &self.points {
            mesh.add_vertex(DVec3::new(p.x, p.y - half, p.z));
            mesh.add_vertex(DVec3::new(p.x, p.y + half, p.z));
        }
        for i in 0..self.points.len() - 1 {
            if GLAZED_SEGMENTS.contains(&i) {
                continue;
            }
            let j = (2 * i) as u32;
            mesh.add_triangle(j, j + 3, j + 1);
            mesh.add_triangle(j, j + 2, j + 3);
        }
        mesh.compute_normals();
        mesh.to_flat_shaded();
        mesh
    }
}

fn shift_x(points: &mut [DVec3], indices: &[usize], offset: f64) {
    for &i in indices {
        points[i].x += offset;
    }
}

/// Narrows the arch opening at the bottom and raises its top corners.
fn open_wheel_arch(points: &mut [DVec3], arch: [usize; 4], tire_size: f64) {
    let step = tire_size / 20.0;
    points[arch[0]].x += step;
    points[arch[3]].x -= step;
    points[arch[1]].x += step;
    points[arch[2]].x -= step;
    points[arch[1]].z += tire_size / 10.0;
    points[arch[2]].z += tire_size / 10.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn half() -> Proportions {
        Proportions::draw(&SharedRandom::constant(0.5), 1.0, 1.0)
    }

    #[test]
    fn test_offsets_chain() {
        let p = half();
        assert_relative_eq!(p.hood, 0.5);
        assert_relative_eq!(p.windshield, 0.25);
        assert_relative_eq!(p.back_seat, 0.5);
        assert_relative_eq!(p.trunk, 0.25);
        assert_relative_eq!(p.back_window, 0.125);
        assert_relative_eq!(p.tire_size, 1.025);
        assert_relative_eq!(p.body, 0.2025);
        assert_relative_eq!(p.front_tire, 0.3);
    }

    #[test]
    fn test_six_draws() {
        let random = SharedRandom::sequence(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7]);
        Proportions::draw(&random, 1.0, 1.0);
        assert_relative_eq!(random.next(), 0.7);
    }

    #[test]
    fn test_outline_rests_above_ground() {
        let s = Silhouette::new(&half());
        let (min, _) = bounds(&s.points);
        assert_relative_eq!(min.z, s.wheel_size * 0.75, epsilon = 1e-12);
        assert_relative_eq!(s.front_axle.z, 0.0, epsilon = 1e-12);
        assert_relative_eq!(s.rear_axle.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_outline_centred_on_x() {
        let s = Silhouette::new(&half());
        let (min, max) = bounds(&s.points);
        assert_relative_eq!(min.x, -max.x, epsilon = 1e-12);
        assert!(s.front_axle.x < s.rear_axle.x);
    }

    #[test]
    fn test_skin_skips_glazing() {
        let s = Silhouette::new(&half());
        let skin = s.skin(1.0);
        assert_eq!(skin.triangle_count(), 28);
        let (min, max) = skin.bounding_box();
        assert_relative_eq!(min.y, -0.5, epsilon = 1e-12);
        assert_relative_eq!(max.y, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_heads_stand_up() {
        let s = Silhouette::new(&half());
        let hood = s.hood_head();
        assert_relative_eq!(hood.x, s.points[1].x);
        assert_relative_eq!(hood.y, s.points[1].z, epsilon = 1e-12);
        assert_relative_eq!(hood.z, 0.0, epsilon = 1e-12);
        assert!(s.hood_length() > 0.0);
    }
}
