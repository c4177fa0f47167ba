//! # Car Windows
//!
//! Three side window cutouts in the outline plane and the two sloped
//! windshield panes with their frames.
//!
//! The cutouts are inset from the outline by the frame size `sz`. Where an
//! edge runs along the sloped windshield or rear window, the inset is
//! stretched by the inverse sine of the slope so the frame keeps the same
//! visible thickness. The pane frames are built flat in local XZ and tilted
//! about Z by the slope angle of the glazed outline segment.

use glam::DVec3;
use std::f64::consts::FRAC_PI_2;

/// The frame size is the roof length divided by a value in this range.
const FRAME_DIVISOR_MIN: f64 = 35.0;
const FRAME_DIVISOR_SPAN: f64 = 15.0;

/// Side window cutouts and the measures the panes are derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowCutouts {
    /// Triangle behind the windshield
    pub front: Vec<DVec3>,
    /// Quad under the front half of the roof
    pub middle: Vec<DVec3>,
    /// Quad under the back half of the roof, ending at the rear window
    pub rear: Vec<DVec3>,
    /// Frame size
    pub frame: f64,
    /// Length of the windshield slope
    pub windshield_length: f64,
    /// Length of the rear window slope
    pub rear_window_length: f64,
    /// Tilt of the windshield pane about Z
    pub windshield_angle: f64,
    /// Tilt of the rear window pane about Z
    pub rear_window_angle: f64,
}

impl WindowCutouts {
    /// The three cutouts, front to back.
    pub fn holes(&self) -> Vec<Vec<DVec3>> {
        vec![self.front.clone(), self.middle.clone(), self.rear.clone()]
    }
}

/// Cuts the windows out of an outline, using `draw` for the frame size.
///
/// Reads outline points 2 to 5: windshield bottom, windshield top, rear
/// window top, rear window bottom.
pub fn cut_windows(points: &[DVec3], window_width: f64, draw: f64) -> WindowCutouts {
    let flat = |p: DVec3| DVec3::new(p.x, 0.0, p.z);
    let (p2, p3, p4, p5) = (points[2], points[3], points[4], points[5]);

    let mut front = vec![flat(p2), flat(p3), DVec3::new(p3.x, 0.0, p2.z)];
    let windshield_length = front[0].distance(front[1]);

    let sz = window_width / (FRAME_DIVISOR_MIN + draw * FRAME_DIVISOR_SPAN);

    // windshield slope: run, rise and hypotenuse
    let run = front[0].distance(front[2]);
    let rise = front[2].distance(front[1]);
    let slope = front[0].distance(front[1]);
    let sin = run / slope;
    let stretch = 1.0 / sin;
    let windshield_sin = rise / slope;

    front[0].x += (stretch * sz) * (sin / (rise / slope));
    front[1].z -= stretch * sz;

    let half = window_width / 2.0;
    let mut middle = vec![
        DVec3::new(p3.x, 0.0, p3.z),
        DVec3::new(p3.x, 0.0, p2.z),
        DVec3::new(p3.x + half, 0.0, p2.z),
        DVec3::new(p3.x + half, 0.0, p3.z),
    ];
    middle[0].x += sz;
    middle[1].x += sz;
    middle[0].z -= sz;
    middle[3].z -= sz;

    let mut rear = vec![
        DVec3::new(p3.x + half, 0.0, p3.z),
        DVec3::new(p3.x + half, 0.0, p2.z),
        flat(p5),
        flat(p4),
    ];
    let rear_window_length = rear[2].distance(rear[3]);

    // rear window slope: run, height and hypotenuse
    let rear_run = (rear[2] - rear[3]).x;
    let height = rear[0].distance(rear[1]);
    let rear_slope = rear_window_length;
    let rear_sin = height / rear_slope;
    let rear_stretch = 1.0 / rear_sin;
    let rear_cos = rear_run / rear_slope;

    rear[0].z -= sz;
    rear[3].z -= sz;
    rear[0].x += sz;
    rear[1].x += sz;
    rear[2].x -= rear_stretch * sz;
    rear[3].x -= (rear_stretch * sz) - (sz / height) * rear_run;

    // sill: raise the bottom edges by half a frame
    let sill = sz / 2.0 * rear_sin;

    front[0].x += sill / rise * run;
    front[0].z += sill;
    front[2].z += sill;

    middle[1].z += sill;
    middle[2].z += sill;

    rear[2].x -= sill / height * rear_run;
    rear[1].z += sill;
    rear[2].z += sill;

    WindowCutouts {
        front,
        middle,
        rear,
        frame: sz,
        windshield_length,
        rear_window_length,
        windshield_angle: windshield_sin.asin(),
        rear_window_angle: -FRAC_PI_2 + rear_cos.asin(),
    }
}

/// A flat rectangle `length` long and `width` wide in local XZ, starting at
/// `x = 0` and centred on `z = 0`.
pub fn pane_frame(length: f64, width: f64) -> Vec<DVec3> {
    let half = width / 2.0;
    vec![
        DVec3::new(0.0, 0.0, -half),
        DVec3::new(length, 0.0, -half),
        DVec3::new(length, 0.0, half),
        DVec3::new(0.0, 0.0, half),
    ]
}

/// The glass inside a [`pane_frame`], inset by half a frame on three sides
/// and by `lead` at `x = 0`.
pub fn pane_glass(length: f64, width: f64, frame: f64, lead: f64) -> Vec<DVec3> {
    let inset = width / 2.0 - frame / 2.0;
    vec![
        DVec3::new(lead, 0.0, -inset),
        DVec3::new(length - frame / 2.0, 0.0, -inset),
        DVec3::new(length - frame / 2.0, 0.0, inset),
        DVec3::new(lead, 0.0, inset),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::car::silhouette::{Proportions, Silhouette};
    use crate::random::SharedRandom;
    use approx::assert_relative_eq;

    fn cutouts(draw: f64) -> (Silhouette, WindowCutouts) {
        let silhouette = Silhouette::new(&Proportions::draw(&SharedRandom::constant(0.5), 1.0, 1.0));
        let windows = cut_windows(&silhouette.points, silhouette.window_width(), draw);
        (silhouette, windows)
    }

    #[test]
    fn test_frame_size_range() {
        let (s, low) = cutouts(0.0);
        let (_, high) = cutouts(1.0);
        assert_relative_eq!(low.frame, s.window_width() / 35.0);
        assert_relative_eq!(high.frame, s.window_width() / 50.0);
    }

    #[test]
    fn test_cutouts_inside_outline() {
        let (s, w) = cutouts(0.5);
        let (min, max) = crate::anchors::bounds(&s.points);
        for point in w.front.iter().chain(&w.middle).chain(&w.rear) {
            assert!(point.x > min.x && point.x < max.x);
            assert!(point.z > min.z && point.z < max.z);
        }
    }

    #[test]
    fn test_windshield_angle_matches_slope() {
        let (s, w) = cutouts(0.5);
        let rise = s.points[3].z - s.points[2].z;
        assert_relative_eq!(w.windshield_angle.sin() * w.windshield_length, rise, epsilon = 1e-12);
        assert!(w.windshield_angle > 0.0 && w.windshield_angle < FRAC_PI_2);
    }

    #[test]
    fn test_rear_window_points_down() {
        let (_, w) = cutouts(0.5);
        assert!(w.rear_window_angle < 0.0);
        assert!(w.rear_window_angle >= -FRAC_PI_2);
    }

    #[test]
    fn test_glass_inside_frame() {
        let frame = pane_frame(2.0, 1.0);
        let glass = pane_glass(2.0, 1.0, 0.1, 0.05);
        assert_eq!(frame[2], DVec3::new(2.0, 0.0, 0.5));
        assert_relative_eq!(glass[0].x, 0.05);
        assert_relative_eq!(glass[1].x, 1.95);
        assert_relative_eq!(glass[2].z, 0.45);
    }
}
