//! # Transforms
//!
//! Position / rotation / scaling triples as used by scene nodes, and the
//! world matrix they compose to.
//!
//! Rotation is Euler angles in radians applied as yaw (Y), then pitch (X),
//! then roll (Z); the world matrix is `T * R * S`.

use glam::{DMat4, DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

/// Position, Euler rotation and scaling of a part.
///
/// # Example
///
/// ```rust
/// use lowpoly_mesh::Transform;
/// use glam::DVec3;
///
/// let t = Transform::from_position(DVec3::new(1.0, 0.0, 0.0));
/// let p = t.matrix().transform_point3(DVec3::ZERO);
/// assert_eq!(p, DVec3::new(1.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation
    pub position: DVec3,
    /// Euler angles (x = pitch, y = yaw, z = roll)
    pub rotation: DVec3,
    /// Per-axis scale; a negative component mirrors
    pub scaling: DVec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The transform that leaves geometry untouched.
    pub const IDENTITY: Self = Self {
        position: DVec3::ZERO,
        rotation: DVec3::ZERO,
        scaling: DVec3::ONE,
    };

    /// Pure translation.
    pub fn from_position(position: DVec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Pure rotation.
    pub fn from_rotation(rotation: DVec3) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    /// Pure scaling.
    pub fn from_scaling(scaling: DVec3) -> Self {
        Self {
            scaling,
            ..Self::IDENTITY
        }
    }

    /// Rotation as a quaternion (yaw, then pitch, then roll).
    pub fn rotation_quat(&self) -> DQuat {
        DQuat::from_euler(EulerRot::YXZ, self.rotation.y, self.rotation.x, self.rotation.z)
    }

    /// World matrix `T * R * S`.
    pub fn matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(self.scaling, self.rotation_quat(), self.position)
    }

    /// True when applying the transform is a no-op.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// True when the transform mirrors (odd number of negative scales).
    pub fn is_mirroring(&self) -> bool {
        self.scaling.x * self.scaling.y * self.scaling.z < 0.0
    }
}

/// Rotation matrix from yaw (Y), pitch (X) and roll (Z).
pub fn rotation_yaw_pitch_roll(yaw: f64, pitch: f64, roll: f64) -> DMat4 {
    DMat4::from_quat(DQuat::from_euler(EulerRot::YXZ, yaw, pitch, roll))
}
