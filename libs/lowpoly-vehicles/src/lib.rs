//! # Low-Poly Vehicles
//!
//! Procedural low-poly airplanes, cars and their parts, built on the
//! [`lowpoly_mesh`] kernel.
//!
//! ## Architecture
//!
//! ```text
//! Partial options ──resolve──→ Options
//!                                 │
//! profiles + random proportions ──┼─→ part builders (wing, engine, wheel, light, path)
//!                                 │            │
//!                                 │     anchors / transforms
//!                                 │            │
//!                                 └─→ composers (airplane, car) ──→ consolidate ──→ Node
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use lowpoly_vehicles::builders::car::{create_car, PartialCarOptions};
//! use lowpoly_vehicles::random::SharedRandom;
//! use lowpoly_vehicles::Scene;
//!
//! let mut scene = Scene::new();
//! let options = PartialCarOptions::default().random(SharedRandom::seeded(7));
//! let car = create_car("car", &mut scene, options, &[]).unwrap();
//! assert!(car.mesh.is_some());
//! ```

#[macro_use]
pub mod options;

pub mod anchors;
pub mod builders;
pub mod color;
pub mod consolidate;
pub mod error;
pub mod profiles;
pub mod random;
pub mod scene;

pub use color::Color3;
pub use consolidate::{consolidate, Part};
pub use error::BuildError;
pub use options::{DefaultOptions, Resolve};
pub use random::{RandomSource, SharedRandom};
pub use scene::{Material, MaterialRef, Node, Scene, Solid};
