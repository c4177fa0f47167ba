//! # Primitives
//!
//! Mesh generation for built-in solids.

pub mod cylinder;

pub use cylinder::create_cylinder;
