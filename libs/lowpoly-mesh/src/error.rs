//! # Mesh Errors
//!
//! Error types for mesh generation operations.

use thiserror::Error;

/// Errors that can occur during mesh generation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// Sweep profile with too few points
    #[error("Degenerate profile: {message}")]
    DegenerateProfile { message: String },

    /// Sweep path with too few (or only coincident) stations
    #[error("Degenerate path: {message}")]
    DegeneratePath { message: String },

    /// Degenerate geometry
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Polygon triangulation failed
    #[error("Triangulation failed: {message}")]
    Triangulation { message: String },

    /// Parameter outside the range an operation accepts
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },
}

impl MeshError {
    /// Creates a degenerate profile error.
    pub fn degenerate_profile(message: impl Into<String>) -> Self {
        Self::DegenerateProfile {
            message: message.into(),
        }
    }

    /// Creates a degenerate path error.
    pub fn degenerate_path(message: impl Into<String>) -> Self {
        Self::DegeneratePath {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates a triangulation error.
    pub fn triangulation(message: impl Into<String>) -> Self {
        Self::Triangulation {
            message: message.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }
}
