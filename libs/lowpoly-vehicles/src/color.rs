//! # Colors
//!
//! Linear RGB colors in `[0, 1]` per channel, parsed from `#RRGGBB` strings
//! or generated from an 8-bit hue wheel.

use crate::error::BuildError;
use crate::random::RandomSource;
use config::constants::HUE_WHEEL_STEPS;
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color3 {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color3 {
    pub const BLACK: Color3 = Color3::new(0.0, 0.0, 0.0);
    pub const WHITE: Color3 = Color3::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Parses `#RRGGBB`.
    ///
    /// # Errors
    ///
    /// [`BuildError::InvalidColor`] when the string is not a `#` followed by
    /// six hex digits.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lowpoly_vehicles::Color3;
    ///
    /// let white = Color3::from_hex("#FFFFFF").unwrap();
    /// assert_eq!(white, Color3::WHITE);
    /// assert!(Color3::from_hex("FFFFFF").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, BuildError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| BuildError::invalid_color(hex, "missing '#' prefix"))?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(BuildError::invalid_color(hex, "expected six hex digits"));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| BuildError::invalid_color(hex, e.to_string()))
        };
        Ok(Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Color from hue in degrees, saturation and value in `[0, 1]`.
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let chroma = value * saturation;
        let h = hue.rem_euclid(360.0) / 60.0;
        let x = chroma * (1.0 - ((h % 2.0) - 1.0).abs());

        let (r, g, b) = match h {
            h if h < 1.0 => (chroma, x, 0.0),
            h if h < 2.0 => (x, chroma, 0.0),
            h if h < 3.0 => (0.0, chroma, x),
            h if h < 4.0 => (0.0, x, chroma),
            h if h < 5.0 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        let m = value - chroma;
        Self::new(r + m, g + m, b + m)
    }

    /// Fully saturated, full value color at a step of the 8-bit hue wheel.
    pub fn from_hue_step(step: u32) -> Self {
        let degrees = (step % HUE_WHEEL_STEPS) as f64 * 360.0 / HUE_WHEEL_STEPS as f64;
        Self::from_hsv(degrees, 1.0, 1.0)
    }

    /// Random color, one draw per channel in r, g, b order.
    pub fn random(random: &mut dyn RandomSource) -> Self {
        let r = random.next_f64();
        let g = random.next_f64();
        let b = random.next_f64();
        Self::new(r, g, b)
    }

    /// Every channel multiplied by `factor`.
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }
}

impl Mul<f64> for Color3 {
    type Output = Color3;

    fn mul(self, factor: f64) -> Color3 {
        self.scale(factor)
    }
}

/// Step on the opposite side of the 8-bit hue wheel.
pub fn complementary_hue_step(step: u32) -> u32 {
    (step + HUE_WHEEL_STEPS / 2) % HUE_WHEEL_STEPS
}
