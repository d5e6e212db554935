//! Third-person follow camera
//!
//! The camera hangs off a [`CameraBoom`] on the player and is rotated by the
//! control rotation, not by the character's facing. The boom is shortened
//! when level geometry sits between the character and the camera.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use shared::{CameraBoom, ControlRotation};

use crate::character::{CharacterSet, LocalPlayer};

/// Marker for the camera on the end of the boom
#[derive(Component)]
pub struct FollowCamera;

pub struct FollowCameraPlugin;

impl Plugin for FollowCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, update_follow_camera.after(CharacterSet::Move));
    }
}

/// Place the camera on the end of the player's boom
pub fn update_follow_camera(
    rapier_context: ReadRapierContext,
    player_query: Query<
        (Entity, &Transform, &CameraBoom, &ControlRotation),
        (With<LocalPlayer>, Without<FollowCamera>),
    >,
    mut camera_query: Query<&mut Transform, (With<FollowCamera>, Without<LocalPlayer>)>,
) {
    let Ok((player, player_transform, boom, control)) = player_query.single() else {
        return;
    };
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let pivot = boom.pivot(player_transform.translation);
    let rotation = control.quat();
    let arm_direction = rotation * Vec3::Z;

    // Probe from the pivot toward the arm end; a missing context just means no pull-in.
    let blocked_at = rapier_context.single().ok().and_then(|context| {
        let filter = QueryFilter::default()
            .exclude_collider(player)
            .exclude_sensors();
        context
            .cast_ray(pivot, arm_direction, boom.arm_length, true, filter)
            .map(|(_, toi)| toi)
    });

    *camera_transform = boom.camera_transform(pivot, rotation, blocked_at);
}
