//! # Builders
//!
//! One entry point per buildable thing. Part builders return a [`Solid`];
//! the airplane and car composers return a [`Node`] tree.
//!
//! Every builder takes a name, the [`Scene`] that receives its materials and
//! a partial options record resolved against the builder's defaults.
//!
//! [`Solid`]: crate::scene::Solid
//! [`Node`]: crate::scene::Node
//! [`Scene`]: crate::scene::Scene

pub mod airplane;
pub mod car;
pub mod car_light;
pub mod engine;
pub mod path;
pub mod wheel;
pub mod wing;
