//! Third-person builder client - character controller with build mode
//!
//! Bevy 0.17 / bevy_rapier3d 0.32

mod build_mode;
mod camera;
mod character;
mod config;
mod debug_text;
mod input;
mod pickup;
mod world;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier3d::prelude::*;

use config::ActiveConfig;

fn main() {
    let asset_path = config::get_asset_path();

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "FortBuild".to_string(),
                    resolution: WindowResolution::new(1280, 720),
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                file_path: asset_path.to_string_lossy().to_string(),
                ..default()
            }),
    );

    // Physics: collision resolution for the character and ray queries
    app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default());

    // Loaded after DefaultPlugins so fallbacks are logged
    app.insert_resource(ActiveConfig(config::load_or_default(&asset_path)));

    // Input registration, then everything that consumes it
    app.add_plugins(input::PlayerInputPlugin);
    app.add_plugins(debug_text::ScreenMessagesPlugin);
    app.add_plugins(character::CharacterPlugin);
    app.add_plugins(camera::FollowCameraPlugin);
    app.add_plugins(build_mode::BuildModePlugin);
    app.add_plugins(pickup::PickupPlugin);

    app.add_systems(Startup, world::spawn_world);

    info!("Starting client");
    app.run();
}
