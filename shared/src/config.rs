//! Character tuning loaded at startup
//!
//! Every field has a default, so a config file only needs the values it
//! changes.

use serde::{Deserialize, Serialize};

use crate::camera_rig::CameraBoom;
use crate::movement::MovementSettings;
use crate::player::{BASE_LOOK_UP_RATE, BASE_TURN_RATE, MOUSE_SENSITIVITY, PICKUP_RANGE};

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub version: u32,
    pub movement: MovementSettings,
    pub camera: CameraBoom,
    pub look: LookSettings,
    /// Reach of the pickup trace in meters
    pub pickup_range: f32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            movement: MovementSettings::default(),
            camera: CameraBoom::default(),
            look: LookSettings::default(),
            pickup_range: PICKUP_RANGE,
        }
    }
}

impl CharacterConfig {
    /// Reject values that would make the character unusable.
    pub fn validate(&self) -> Result<(), String> {
        if self.version != CONFIG_VERSION {
            return Err(format!(
                "Unsupported config version {} (expected {})",
                self.version, CONFIG_VERSION
            ));
        }

        let movement = &self.movement;
        let look = &self.look;
        let fields = [
            ("walk_speed", movement.walk_speed),
            ("sprint_speed", movement.sprint_speed),
            ("jump_velocity", movement.jump_velocity),
            ("air_control", movement.air_control),
            ("rotation_rate", movement.rotation_rate),
            ("gravity", movement.gravity),
            ("acceleration", movement.acceleration),
            ("braking", movement.braking),
            ("arm_length", self.camera.arm_length),
            ("pivot_height", self.camera.pivot_height),
            ("base_turn_rate", look.base_turn_rate),
            ("base_look_up_rate", look.base_look_up_rate),
            ("mouse_sensitivity", look.mouse_sensitivity),
            ("pickup_range", self.pickup_range),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(format!("{name} must be a finite number, got {value}"));
            }
        }

        positive("walk_speed", movement.walk_speed)?;
        positive("sprint_speed", movement.sprint_speed)?;
        positive("pickup_range", self.pickup_range)?;
        not_negative("jump_velocity", movement.jump_velocity)?;
        not_negative("rotation_rate", movement.rotation_rate)?;
        not_negative("acceleration", movement.acceleration)?;
        not_negative("braking", movement.braking)?;
        not_negative("arm_length", self.camera.arm_length)?;
        not_negative("base_turn_rate", look.base_turn_rate)?;
        not_negative("base_look_up_rate", look.base_look_up_rate)?;
        if !(0.0..=1.0).contains(&movement.air_control) {
            return Err(format!(
                "air_control must be between 0 and 1, got {}",
                movement.air_control
            ));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f32) -> Result<(), String> {
    if value <= 0.0 {
        return Err(format!("{name} must be positive, got {value}"));
    }
    Ok(())
}

fn not_negative(name: &str, value: f32) -> Result<(), String> {
    if value < 0.0 {
        return Err(format!("{name} must not be negative, got {value}"));
    }
    Ok(())
}

/// View rotation tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookSettings {
    /// Degrees per second at full rate input
    pub base_turn_rate: f32,
    /// Degrees per second at full rate input
    pub base_look_up_rate: f32,
    /// Radians per pixel of mouse motion
    pub mouse_sensitivity: f32,
}

impl Default for LookSettings {
    fn default() -> Self {
        Self {
            base_turn_rate: BASE_TURN_RATE,
            base_look_up_rate: BASE_LOOK_UP_RATE,
            mouse_sensitivity: MOUSE_SENSITIVITY,
        }
    }
}
