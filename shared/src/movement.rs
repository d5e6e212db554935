//! Character movement rules
//!
//! Control rotation, movement input accumulation, and the per-tick
//! character step. Collision is resolved by the physics backend; this module
//! only decides the translation the character wants to make.
//!
//! In Bevy: +X is right, +Y is up, -Z is forward.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::player::{
    AIR_CONTROL, GRAVITY, JUMP_VELOCITY, MOVE_ACCEL, MOVE_BRAKE, ROTATION_RATE_DEG, SPRINT_SPEED,
    WALK_SPEED,
};

/// Pitch stays just short of straight up/down
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// View rotation owned by the player's controller.
///
/// The camera follows this; the character body turns toward its movement
/// direction instead.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlRotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl ControlRotation {
    /// Positive turns right.
    pub fn add_yaw_input(&mut self, delta: f32) {
        self.yaw = wrap_angle(self.yaw - delta);
    }

    /// Positive looks up.
    pub fn add_pitch_input(&mut self, delta: f32) {
        self.pitch = (self.pitch + delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Forward on the ground plane (pitch ignored)
    pub fn flat_forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Right on the ground plane (pitch ignored)
    pub fn flat_right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }
}

/// Anything that accepts directional movement input
pub trait MovementInputSink {
    fn add_movement_input(&mut self, direction: Vec3, scale: f32);
}

/// Movement input accumulated during one tick
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct PendingMovement(pub Vec3);

impl PendingMovement {
    /// Take the accumulated input, clamped to unit length.
    pub fn consume(&mut self) -> Vec3 {
        std::mem::take(&mut self.0).clamp_length_max(1.0)
    }
}

impl MovementInputSink for PendingMovement {
    fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        self.0 += direction * scale;
    }
}

/// Forward/backward axis relative to the control yaw
pub fn move_forward(sink: &mut impl MovementInputSink, control: &ControlRotation, value: f32) {
    if value != 0.0 {
        sink.add_movement_input(control.flat_forward(), value);
    }
}

/// Right/left axis relative to the control yaw
pub fn move_right(sink: &mut impl MovementInputSink, control: &ControlRotation, value: f32) {
    if value != 0.0 {
        sink.add_movement_input(control.flat_right(), value);
    }
}

/// Angle for this frame from a rate input: `rate * base_rate_deg * dt`
/// degrees, returned in radians.
pub fn turn_at_rate(rate: f32, base_rate_deg: f32, delta_seconds: f32) -> f32 {
    (rate * base_rate_deg * delta_seconds).to_radians()
}

/// Max speed presets toggled by the sprint key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedPreset {
    #[default]
    Walk,
    Sprint,
}

/// Tunable movement parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub jump_velocity: f32,
    pub air_control: f32,
    /// Degrees per second
    pub rotation_rate: f32,
    pub gravity: f32,
    pub acceleration: f32,
    pub braking: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            walk_speed: WALK_SPEED,
            sprint_speed: SPRINT_SPEED,
            jump_velocity: JUMP_VELOCITY,
            air_control: AIR_CONTROL,
            rotation_rate: ROTATION_RATE_DEG,
            gravity: GRAVITY,
            acceleration: MOVE_ACCEL,
            braking: MOVE_BRAKE,
        }
    }
}

impl MovementSettings {
    pub fn max_speed(&self, preset: SpeedPreset) -> f32 {
        match preset {
            SpeedPreset::Walk => self.walk_speed,
            SpeedPreset::Sprint => self.sprint_speed,
        }
    }
}

/// Per-character movement state
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct CharacterMotion {
    pub velocity: Vec3,
    pub grounded: bool,
    /// Body yaw in radians
    pub facing_yaw: f32,
    pub speed_preset: SpeedPreset,
    /// Set by the jump press, cleared on release or once the jump starts
    pub jump_requested: bool,
}

impl CharacterMotion {
    pub fn jump(&mut self) {
        self.jump_requested = true;
    }

    pub fn stop_jumping(&mut self) {
        self.jump_requested = false;
    }

    pub fn facing(&self) -> Quat {
        Quat::from_rotation_y(self.facing_yaw)
    }
}

/// Step the character one tick.
///
/// - Accelerates horizontal velocity toward `input * max_speed`
///   (air control scales acceleration while airborne)
/// - Starts a pending jump when grounded
/// - Applies gravity
/// - Turns the facing toward the movement direction at the rotation rate
///
/// Returns the translation to hand to the collision backend.
pub fn step_character(
    settings: &MovementSettings,
    motion: &mut CharacterMotion,
    input: Vec3,
    dt: f32,
) -> Vec3 {
    let input = Vec3::new(input.x, 0.0, input.z).clamp_length_max(1.0);
    let has_input = input.length_squared() > 0.0;

    // --- Horizontal velocity ---
    let desired = input * settings.max_speed(motion.speed_preset);
    let mut horiz = Vec3::new(motion.velocity.x, 0.0, motion.velocity.z);

    let mut accel = if has_input {
        settings.acceleration
    } else {
        settings.braking
    };
    if !motion.grounded {
        accel = if has_input {
            accel * settings.air_control
        } else {
            0.0
        };
    }

    let delta = desired - horiz;
    let max_change = accel * dt;
    let delta_len = delta.length();
    if delta_len <= max_change {
        horiz = desired;
    } else if delta_len > 0.0 {
        horiz += delta * (max_change / delta_len);
    }
    motion.velocity.x = horiz.x;
    motion.velocity.z = horiz.z;

    // --- Jump ---
    if motion.jump_requested && motion.grounded {
        motion.velocity.y = settings.jump_velocity;
        motion.grounded = false;
        motion.jump_requested = false;
    }

    // --- Gravity ---
    if motion.grounded {
        motion.velocity.y = motion.velocity.y.min(0.0);
    }
    motion.velocity.y += settings.gravity * dt;

    // --- Facing ---
    if has_input {
        let target = yaw_of(input);
        let max_step = settings.rotation_rate.to_radians() * dt;
        motion.facing_yaw = rotate_toward(motion.facing_yaw, target, max_step);
    }

    motion.velocity * dt
}

/// Feed back the collision backend's ground contact after a step.
pub fn land(motion: &mut CharacterMotion, grounded: bool) {
    motion.grounded = grounded;
    if grounded && motion.velocity.y < 0.0 {
        motion.velocity.y = 0.0;
    }
}

/// Yaw whose flat forward is `direction`
fn yaw_of(direction: Vec3) -> f32 {
    (-direction.x).atan2(-direction.z)
}

/// Move `current` toward `target` by at most `max_step`, the short way around.
fn rotate_toward(current: f32, target: f32, max_step: f32) -> f32 {
    let diff = wrap_angle(target - current);
    if diff.abs() <= max_step {
        wrap_angle(target)
    } else {
        wrap_angle(current + max_step * diff.signum())
    }
}

/// Wrap to (-PI, PI]
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped == -PI {
        PI
    } else {
        wrapped
    }
}
