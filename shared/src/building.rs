//! Building piece definitions for the build mode system
//!
//! Defines which pieces can be previewed, their dimensions, and where the
//! preview sits relative to the character.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Build mode variant currently selected by a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BuildMode {
    #[default]
    None,
    Wall,
    Floor,
    Stairs,
}

/// Every selectable (non-`None`) build mode
pub const ALL_BUILD_MODES: &[BuildMode] = &[BuildMode::Wall, BuildMode::Floor, BuildMode::Stairs];

impl BuildMode {
    /// Building piece previewed while this mode is active
    pub fn piece(&self) -> Option<BuildPiece> {
        match self {
            BuildMode::None => None,
            BuildMode::Wall => Some(BuildPiece {
                mode: *self,
                display_name: "Wall",
                // Long side runs along local Z; the 90 degree yaw turns it across the view.
                size: Vec3::new(0.2, 3.0, 4.0),
                color: Color::srgba(0.3, 0.6, 0.9, 0.45),
                placement: PreviewPlacement {
                    forward: 2.5,
                    up: 0.54,
                    yaw_offset: std::f32::consts::FRAC_PI_2,
                    pitch: 0.0,
                },
            }),
            BuildMode::Floor => Some(BuildPiece {
                mode: *self,
                display_name: "Floor",
                size: Vec3::new(4.0, 0.2, 4.0),
                color: Color::srgba(0.3, 0.9, 0.5, 0.45),
                placement: PreviewPlacement {
                    forward: 2.5,
                    up: -0.96,
                    yaw_offset: 0.0,
                    pitch: 0.0,
                },
            }),
            BuildMode::Stairs => Some(BuildPiece {
                mode: *self,
                display_name: "Stairs",
                size: Vec3::new(4.0, 0.2, 5.6),
                color: Color::srgba(0.9, 0.7, 0.3, 0.45),
                placement: PreviewPlacement {
                    forward: 2.5,
                    up: 0.54,
                    yaw_offset: 0.0,
                    pitch: std::f32::consts::FRAC_PI_4,
                },
            }),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        self.piece().map_or("None", |piece| piece.display_name)
    }
}

/// Definition of a previewable building piece
#[derive(Debug, Clone, PartialEq)]
pub struct BuildPiece {
    pub mode: BuildMode,
    pub display_name: &'static str,
    /// Box dimensions in meters (local X, Y, Z)
    pub size: Vec3,
    /// Preview tint
    pub color: Color,
    pub placement: PreviewPlacement,
}

/// Where a preview sits relative to the character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewPlacement {
    /// Distance in front of the character
    pub forward: f32,
    /// Offset along world up from the character's center
    pub up: f32,
    /// Yaw added to the character's facing (radians)
    pub yaw_offset: f32,
    /// Tilt around the piece's local X axis (radians)
    pub pitch: f32,
}

impl PreviewPlacement {
    /// World transform of the preview for a character at `actor`.
    pub fn transform_for(&self, actor: &Transform) -> Transform {
        let translation =
            actor.translation + actor.forward().as_vec3() * self.forward + Vec3::Y * self.up;
        let rotation = actor.rotation
            * Quat::from_rotation_y(self.yaw_offset)
            * Quat::from_rotation_x(self.pitch);
        Transform::from_translation(translation).with_rotation(rotation)
    }
}
