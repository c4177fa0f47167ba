//! # Low-Poly Mesh
//!
//! Geometry kernel for procedurally generated low-poly vehicles.
//!
//! ## Architecture
//!
//! ```text
//! profiles + paths → ops::sweep ─┐
//! polygons → ops::extrude ───────┼→ Mesh (bake / merge / flat shade) → f32 buffers
//! primitives::create_cylinder ───┘
//! ```
//!
//! ## Conventions
//!
//! - Right-handed coordinates, Y up
//! - Counter-clockwise triangles face the viewer
//! - Angles in radians; rotations apply yaw (Y), pitch (X), roll (Z)
//!
//! ## Usage
//!
//! ```rust
//! use lowpoly_mesh::ops::{sweep, Cap, SweepParams};
//! use glam::{DVec2, DVec3};
//!
//! let shape = [DVec2::new(-1.0, 0.0), DVec2::new(0.0, 1.0), DVec2::new(1.0, 0.0)];
//! let path = [DVec3::ZERO, DVec3::new(0.0, 0.0, 2.0)];
//! let mesh = sweep(&shape, &path, &SweepParams::new().cap(Cap::All)).unwrap();
//! assert!(mesh.validate());
//! ```

pub mod error;
pub mod mesh;
pub mod ops;
pub mod primitives;
pub mod transform;

pub use error::MeshError;
pub use mesh::{Mesh, SubMesh};
pub use transform::{rotation_yaw_pitch_roll, Transform};
