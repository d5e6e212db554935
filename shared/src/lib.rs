//! Game rules shared by the client and its tests
//!
//! Everything here is plain data and functions over `bevy::math` types; the
//! Bevy plugins that drive them live in the client.

pub mod build_mode;
pub mod building;
pub mod camera_rig;
pub mod config;
pub mod movement;
pub mod player;
pub mod trace;

pub use build_mode::{BuildModeController, BuildModeState, BuildTransition, PreviewSpawner};
pub use building::{BuildMode, BuildPiece, PreviewPlacement, ALL_BUILD_MODES};
pub use camera_rig::CameraBoom;
pub use config::{CharacterConfig, LookSettings, CONFIG_VERSION};
pub use movement::{
    move_forward, move_right, step_character, turn_at_rate, CharacterMotion, ControlRotation,
    MovementInputSink, MovementSettings, PendingMovement, SpeedPreset,
};
pub use player::*;
pub use trace::{trace_for_pickup, PickupOutcome, TraceHit, TraceService, WeaponPickup};
