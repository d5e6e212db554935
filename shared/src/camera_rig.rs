//! Third-person camera boom geometry

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::player::CAMERA_ARM_LENGTH;

/// Keeps the camera this far in front of whatever blocked the boom
pub const BOOM_PROBE_MARGIN: f32 = 0.1;

/// Spring arm that holds the follow camera behind the character
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraBoom {
    /// Distance behind the pivot
    pub arm_length: f32,
    /// Pivot height above the character's center
    pub pivot_height: f32,
}

impl Default for CameraBoom {
    fn default() -> Self {
        Self {
            arm_length: CAMERA_ARM_LENGTH,
            pivot_height: 0.6,
        }
    }
}

impl CameraBoom {
    pub fn pivot(&self, character: Vec3) -> Vec3 {
        character + Vec3::Y * self.pivot_height
    }

    /// Camera transform for a boom rotated by `control`.
    ///
    /// `blocked_at` is the distance along the arm at which something was hit,
    /// if anything; the camera is pulled in front of it.
    pub fn camera_transform(
        &self,
        pivot: Vec3,
        control: Quat,
        blocked_at: Option<f32>,
    ) -> Transform {
        let length = match blocked_at {
            Some(hit) if hit < self.arm_length => (hit - BOOM_PROBE_MARGIN).max(0.0),
            _ => self.arm_length,
        };
        // Camera looks down -Z, so "behind" is local +Z.
        let translation = pivot + control * Vec3::Z * length;
        Transform::from_translation(translation).with_rotation(control)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unblocked_arm_sits_behind_pivot() {
        let boom = CameraBoom::default();
        let transform = boom.camera_transform(Vec3::ZERO, Quat::IDENTITY, None);
        assert!((transform.translation - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-5);
        assert_eq!(transform.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_blocked_arm_is_shortened() {
        let boom = CameraBoom::default();
        let transform = boom.camera_transform(Vec3::ZERO, Quat::IDENTITY, Some(1.0));
        assert!((transform.translation.z - (1.0 - BOOM_PROBE_MARGIN)).abs() < 1e-5);

        // A hit past the arm end changes nothing
        let far = boom.camera_transform(Vec3::ZERO, Quat::IDENTITY, Some(10.0));
        assert!((far.translation.z - boom.arm_length).abs() < 1e-5);
    }

    #[test]
    fn test_arm_rotates_with_control() {
        let boom = CameraBoom::default();
        // Yaw of +90 degrees faces -X, so the camera sits on +X
        let control = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let transform = boom.camera_transform(Vec3::ZERO, control, None);
        assert!((transform.translation - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-4);
    }
}
