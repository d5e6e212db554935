//! Player character: look, movement, jump and sprint
//!
//! Input actions are relayed into the shared movement rules; Rapier's
//! kinematic character controller resolves the capsule against the world.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use shared::movement::land;
use shared::{
    move_forward, move_right, step_character, turn_at_rate, CharacterMotion, ControlRotation,
    LookSettings, MovementSettings, PendingMovement, SpeedPreset,
};

use crate::config::ActiveConfig;
use crate::debug_text::ScreenMessages;
use crate::input::{GatherActions, PlayerActions};

/// Marker for the locally controlled character
#[derive(Component)]
pub struct LocalPlayer;

/// Movement tuning attached to a character
#[derive(Component, Debug, Clone, Copy)]
pub struct CharacterMovement(pub MovementSettings);

/// Ordering for the per-frame character pipeline
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CharacterSet {
    /// Input applied to control rotation and movement state
    Input,
    /// Character stepped and handed to the physics backend
    Move,
}

pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (GatherActions, CharacterSet::Input, CharacterSet::Move).chain(),
        );

        app.add_systems(
            Update,
            (apply_look_input, apply_move_input, handle_jump_input, handle_sprint_input)
                .in_set(CharacterSet::Input),
        );
        app.add_systems(
            Update,
            (read_ground_contact, move_character)
                .chain()
                .in_set(CharacterSet::Move),
        );
    }
}

/// Mouse and rate-based look input onto the control rotation
pub fn apply_look_input(
    actions: Res<PlayerActions>,
    config: Res<ActiveConfig>,
    time: Res<Time>,
    mut players: Query<&mut ControlRotation, With<LocalPlayer>>,
) {
    let Ok(mut control) = players.single_mut() else {
        return;
    };
    let look: &LookSettings = &config.0.look;
    let dt = time.delta_secs();

    control.add_yaw_input(actions.turn * look.mouse_sensitivity);
    control.add_pitch_input(actions.look_up * look.mouse_sensitivity);
    control.add_yaw_input(turn_at_rate(actions.turn_rate, look.base_turn_rate, dt));
    control.add_pitch_input(turn_at_rate(actions.look_up_rate, look.base_look_up_rate, dt));
}

/// Movement axes relative to the control yaw
pub fn apply_move_input(
    actions: Res<PlayerActions>,
    mut players: Query<(&ControlRotation, &mut PendingMovement), With<LocalPlayer>>,
) {
    let Ok((control, mut pending)) = players.single_mut() else {
        return;
    };
    move_forward(pending.as_mut(), control, actions.move_forward);
    move_right(pending.as_mut(), control, actions.move_right);
}

/// Jump on press, stop jumping on release
pub fn handle_jump_input(
    actions: Res<PlayerActions>,
    mut players: Query<&mut CharacterMotion, With<LocalPlayer>>,
) {
    let Ok(mut motion) = players.single_mut() else {
        return;
    };
    if actions.jump_pressed {
        motion.jump();
    }
    if actions.jump_released {
        motion.stop_jumping();
    }
}

/// Sprint while the sprint key is held
pub fn handle_sprint_input(
    actions: Res<PlayerActions>,
    mut messages: ResMut<ScreenMessages>,
    mut players: Query<(&mut CharacterMotion, &CharacterMovement), With<LocalPlayer>>,
) {
    let Ok((mut motion, movement)) = players.single_mut() else {
        return;
    };
    if actions.sprint_pressed {
        motion.speed_preset = SpeedPreset::Sprint;
        messages.push(format!("Sprinting ({} m/s)", movement.0.max_speed(SpeedPreset::Sprint)));
    }
    if actions.sprint_released {
        motion.speed_preset = SpeedPreset::Walk;
        messages.push(format!("Walking ({} m/s)", movement.0.max_speed(SpeedPreset::Walk)));
    }
}

/// Pick up last frame's ground contact from the physics backend
pub fn read_ground_contact(
    mut characters: Query<(&mut CharacterMotion, &KinematicCharacterControllerOutput)>,
) {
    for (mut motion, output) in characters.iter_mut() {
        land(&mut motion, output.grounded);
    }
}

/// Step every character and request the move from Rapier
pub fn move_character(
    time: Res<Time>,
    mut characters: Query<(
        &CharacterMovement,
        &mut CharacterMotion,
        &mut PendingMovement,
        &mut KinematicCharacterController,
        &mut Transform,
    )>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    for (movement, mut motion, mut pending, mut controller, mut transform) in
        characters.iter_mut()
    {
        let input = pending.consume();
        let translation = step_character(&movement.0, &mut motion, input, dt);
        controller.translation = Some(translation);
        transform.rotation = motion.facing();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    fn world_with_player(actions: PlayerActions) -> (World, Entity) {
        let mut world = World::new();
        let mut time = Time::<()>::default();
        time.advance_by(Duration::from_millis(500));
        world.insert_resource(time);
        world.insert_resource(actions);
        world.insert_resource(ActiveConfig::default());
        world.init_resource::<ScreenMessages>();
        let player = world
            .spawn((
                LocalPlayer,
                ControlRotation::default(),
                PendingMovement::default(),
                CharacterMotion::default(),
                CharacterMovement(MovementSettings::default()),
            ))
            .id();
        (world, player)
    }

    #[test]
    fn test_move_axes_fill_pending_movement() {
        let (mut world, player) = world_with_player(PlayerActions {
            move_forward: 1.0,
            ..default()
        });
        world.run_system_once(apply_move_input).unwrap();

        let pending = world.get::<PendingMovement>(player).unwrap();
        assert!((pending.0 - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_rate_input_scales_with_time() {
        let (mut world, player) = world_with_player(PlayerActions {
            turn_rate: 1.0,
            ..default()
        });
        world.run_system_once(apply_look_input).unwrap();

        // 45 deg/s for half a second, turning right
        let control = world.get::<ControlRotation>(player).unwrap();
        assert!((control.yaw + 22.5f32.to_radians()).abs() < 1e-5);
    }

    #[test]
    fn test_sprint_press_and_release() {
        let (mut world, player) = world_with_player(PlayerActions {
            sprint_pressed: true,
            ..default()
        });
        world.run_system_once(handle_sprint_input).unwrap();
        assert_eq!(world.get::<CharacterMotion>(player).unwrap().speed_preset, SpeedPreset::Sprint);

        world.insert_resource(PlayerActions {
            sprint_released: true,
            ..default()
        });
        world.run_system_once(handle_sprint_input).unwrap();
        assert_eq!(world.get::<CharacterMotion>(player).unwrap().speed_preset, SpeedPreset::Walk);
        assert_eq!(world.resource::<ScreenMessages>().len(), 2);
    }

    #[test]
    fn test_jump_press_sets_request() {
        let (mut world, player) = world_with_player(PlayerActions {
            jump_pressed: true,
            ..default()
        });
        world.run_system_once(handle_jump_input).unwrap();
        assert!(world.get::<CharacterMotion>(player).unwrap().jump_requested);
    }
}
