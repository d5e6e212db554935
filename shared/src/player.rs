//! Player-related constants
//!
//! World units are meters.

/// Capsule radius
pub const PLAYER_RADIUS: f32 = 0.42;

/// Capsule half height, hemispheres included
pub const PLAYER_HALF_HEIGHT: f32 = 0.96;

/// Walking max speed (units per second)
pub const WALK_SPEED: f32 = 3.0;

/// Sprinting max speed (units per second)
pub const SPRINT_SPEED: f32 = 12.0;

/// Upward velocity applied when a jump starts
pub const JUMP_VELOCITY: f32 = 6.0;

/// Fraction of ground acceleration available while airborne
pub const AIR_CONTROL: f32 = 0.2;

/// How fast the character turns toward its movement direction (degrees per second)
pub const ROTATION_RATE_DEG: f32 = 540.0;

/// Gravity in m/s^2 (negative Y)
pub const GRAVITY: f32 = -9.81;

/// Horizontal acceleration in m/s^2
pub const MOVE_ACCEL: f32 = 20.48;

/// Horizontal deceleration with no input, in m/s^2
pub const MOVE_BRAKE: f32 = 20.48;

/// Turn rate for rate-based yaw input (degrees per second at full deflection)
pub const BASE_TURN_RATE: f32 = 45.0;

/// Look-up rate for rate-based pitch input (degrees per second at full deflection)
pub const BASE_LOOK_UP_RATE: f32 = 45.0;

/// Mouse sensitivity for look (radians per pixel)
pub const MOUSE_SENSITIVITY: f32 = 0.003;

/// Distance the follow camera sits behind the character
pub const CAMERA_ARM_LENGTH: f32 = 3.0;

/// Reach of the pickup line trace
pub const PICKUP_RANGE: f32 = 5.0;

/// Spawn position for the player (above the ground to prevent clipping)
pub const SPAWN_POSITION: [f32; 3] = [0.0, 2.0, 0.0];
