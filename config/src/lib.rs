//! # Config Crate
//!
//! Centralized configuration constants for the low-poly vehicle pipeline.
//! Profile unit scales, station counts, tessellation defaults and numeric
//! tolerances are defined here so the kernel and the builders agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{PROFILE_SCALE, BODY_PATH_STATIONS};
//!
//! // Hand-authored profiles are drawn in source pixels
//! let model_units = 280.0 * PROFILE_SCALE;
//! assert!((model_units - 2.8).abs() < 1e-12);
//! assert_eq!(BODY_PATH_STATIONS, 13);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Author-Time Values**: Scales match the units profiles were drawn in
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
