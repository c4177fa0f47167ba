//! # Configuration Constants
//!
//! Centralized constants for the vehicle generators. All profile scales,
//! sweep station counts, tessellation parameters and precision values are
//! defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Scaling**: Source-pixel to model-unit conversion factors
//! - **Stations**: Number of stations on procedural sweep paths
//! - **Tessellation**: Default segment counts and their lower bounds

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for determining if two floating-point values are "equal" within
/// numerical tolerance.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Minimum triangle area below which a triangle counts as degenerate.
///
/// Swept parts taper to a point (wing roots with zero falloff, airplane body
/// ends), so the kernel tolerates such triangles; `Mesh::validate` reports
/// them.
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-12;

/// Tolerance used by path frame computation to decide whether a tangent is
/// aligned with a coordinate axis.
pub const AXIS_ALIGNMENT_EPSILON: f64 = 1e-3;

// =============================================================================
// SCALING CONSTANTS
// =============================================================================

/// Conversion factor from source pixels to model units for body, engine and
/// car silhouettes.
///
/// # Example
///
/// ```rust
/// use config::constants::PROFILE_SCALE;
///
/// let pixels = [401.0, 231.0];
/// let units = [pixels[0] * PROFILE_SCALE, -pixels[1] * PROFILE_SCALE];
/// assert!((units[0] - 4.01).abs() < 1e-12);
/// ```
pub const PROFILE_SCALE: f64 = 0.01;

/// Conversion factor from source pixels to model units for the vertical tail
/// fin profile.
pub const FIN_PROFILE_SCALE: f64 = 0.008;

/// Conversion factor applied to the engine holder (pylon) profile, which is
/// authored in holder-parameter units rather than pixels.
pub const ENGINE_HOLDER_SCALE: f64 = 0.1;

// =============================================================================
// STATION CONSTANTS
// =============================================================================

/// Minimum number of points a sweep profile needs.
pub const MIN_PROFILE_POINTS: usize = 2;

/// Minimum number of stations a sweep path needs.
pub const MIN_PATH_STATIONS: usize = 2;

/// Number of stations on the airplane body sweep path.
///
/// The body bulges and tapers sinusoidally over these stations.
pub const BODY_PATH_STATIONS: usize = 13;

/// Number of stations on the circular engine cowl and ring paths.
pub const ENGINE_PATH_STATIONS: usize = 13;

/// Number of stations on a wing sweep path (root and tip).
pub const WING_PATH_STATIONS: usize = 2;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Default wheel quality (number of ring points plus one).
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_WHEEL_QUALITY, MIN_WHEEL_QUALITY};
///
/// assert!(DEFAULT_WHEEL_QUALITY >= MIN_WHEEL_QUALITY);
/// ```
pub const DEFAULT_WHEEL_QUALITY: u32 = 16;

/// Smallest wheel quality that still produces a closed ring.
pub const MIN_WHEEL_QUALITY: u32 = 3;

/// Smallest number of sides for a car light polygon.
pub const MIN_LIGHT_SIDES: u32 = 3;

/// Default tessellation of cylinders and cones.
pub const DEFAULT_CYLINDER_TESSELLATION: u32 = 24;

/// Number of steps on the hue wheel used for generated palettes.
///
/// A hue is an 8-bit value; the complementary hue is half a wheel away.
pub const HUE_WHEEL_STEPS: u32 = 256;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Clamps a value into the unit interval `[0, 1]`.
///
/// NaN clamps to 0.
///
/// # Example
///
/// ```rust
/// use config::constants::clamp_unit;
///
/// assert_eq!(clamp_unit(-1.0), 0.0);
/// assert_eq!(clamp_unit(2.0), 1.0);
/// assert_eq!(clamp_unit(0.3), 0.3);
/// ```
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
