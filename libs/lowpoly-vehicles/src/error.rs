//! # Build Errors
//!
//! Error types for vehicle and part builders.

use lowpoly_mesh::MeshError;
use thiserror::Error;

/// Errors that can occur while building a vehicle or part.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    /// Geometry kernel rejected the input
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// Color string that is not `#RRGGBB`
    #[error("Invalid color '{value}': {message}")]
    InvalidColor { value: String, message: String },

    /// Option value a builder cannot work with
    #[error("Invalid option '{option}': {message}")]
    InvalidOption { option: String, message: String },
}

impl BuildError {
    /// Creates an invalid color error.
    pub fn invalid_color(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidColor {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid option error.
    pub fn invalid_option(option: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            message: message.into(),
        }
    }
}
