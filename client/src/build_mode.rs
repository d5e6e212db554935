//! Build mode system for previewing building pieces
//!
//! X toggles the wall, F the floor, C the stairs; Escape leaves build mode.
//! While a piece is selected its translucent preview is respawned in front of
//! the player every frame.

use bevy::prelude::*;
use shared::{
    BuildMode, BuildModeController, BuildPiece, BuildTransition, PreviewSpawner, ALL_BUILD_MODES,
};
use std::collections::HashMap;

use crate::character::{CharacterSet, LocalPlayer};
use crate::debug_text::ScreenMessages;
use crate::input::PlayerActions;

/// Plugin for the build mode system
pub struct BuildModePlugin;

impl Plugin for BuildModePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PreviewAssets>();

        app.add_systems(Startup, (setup_preview_assets, spawn_build_mode_ui));

        app.add_systems(
            Update,
            (
                toggle_build_mode.in_set(CharacterSet::Input),
                update_build_preview.after(CharacterSet::Move),
                despawn_orphaned_previews,
                update_build_mode_ui,
            ),
        );
    }
}

/// Build mode state and preview owned by a player
#[derive(Component, Debug, Default)]
pub struct PlayerBuild(pub BuildModeController<Entity>);

/// Marker for a preview entity
#[derive(Component, Debug, Clone, Copy)]
pub struct BuildPreview {
    pub mode: BuildMode,
    /// Player whose controller owns this preview
    pub owner: Entity,
}

/// Pre-generated meshes and materials for previews
#[derive(Resource, Default)]
pub struct PreviewAssets {
    pub pieces: HashMap<BuildMode, (Handle<Mesh>, Handle<StandardMaterial>)>,
}

/// Marker for the build mode status line
#[derive(Component)]
pub struct BuildModeUI;

/// Spawns previews through `Commands`
pub struct CommandsPreviewSpawner<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    assets: &'a PreviewAssets,
    owner: Entity,
}

impl<'a, 'w, 's> CommandsPreviewSpawner<'a, 'w, 's> {
    pub fn new(
        commands: &'a mut Commands<'w, 's>,
        assets: &'a PreviewAssets,
        owner: Entity,
    ) -> Self {
        Self {
            commands,
            assets,
            owner,
        }
    }
}

impl PreviewSpawner for CommandsPreviewSpawner<'_, '_, '_> {
    type Handle = Entity;

    fn spawn_preview(&mut self, piece: &BuildPiece, transform: Transform) -> Entity {
        let mut entity = self.commands.spawn((
            BuildPreview {
                mode: piece.mode,
                owner: self.owner,
            },
            transform,
        ));
        if let Some((mesh, material)) = self.assets.pieces.get(&piece.mode) {
            entity.insert((Mesh3d(mesh.clone()), MeshMaterial3d(material.clone())));
        }
        entity.id()
    }

    fn despawn_preview(&mut self, handle: Entity) {
        if let Ok(mut entity) = self.commands.get_entity(handle) {
            entity.despawn();
        }
    }
}

/// Build translucent box meshes for every piece
fn setup_preview_assets(
    mut assets: ResMut<PreviewAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for mode in ALL_BUILD_MODES {
        let Some(piece) = mode.piece() else {
            continue;
        };
        let mesh = meshes.add(Cuboid::from_size(piece.size));
        let material = materials.add(StandardMaterial {
            base_color: piece.color,
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        });
        assets.pieces.insert(*mode, (mesh, material));
    }
}

/// Apply build toggles from this frame's actions
pub fn toggle_build_mode(
    mut commands: Commands,
    actions: Res<PlayerActions>,
    assets: Res<PreviewAssets>,
    mut messages: ResMut<ScreenMessages>,
    mut players: Query<(Entity, &mut PlayerBuild), With<LocalPlayer>>,
) {
    let Ok((player, mut build)) = players.single_mut() else {
        return;
    };
    let mut spawner = CommandsPreviewSpawner::new(&mut commands, &assets, player);

    let toggles = [
        (actions.show_wall, BuildMode::Wall, "x key pressed"),
        (actions.show_floor, BuildMode::Floor, "f key pressed"),
        (actions.show_stairs, BuildMode::Stairs, "c key pressed"),
    ];
    for (pressed, mode, key_message) in toggles {
        if !pressed {
            continue;
        }
        messages.push(key_message);
        let transition = build.0.toggle_mode(mode, &mut spawner);
        match transition {
            BuildTransition::Entered(mode) => info!("Build mode enabled: {}", mode.display_name()),
            BuildTransition::Switched { from, to } => {
                info!("Build mode switched: {} -> {}", from.display_name(), to.display_name())
            }
            BuildTransition::Exited(mode) => {
                info!("Build mode disabled (was {})", mode.display_name())
            }
        }
    }

    if actions.exit_build && build.0.in_build_mode() {
        build.0.exit(&mut spawner);
        info!("Build mode disabled");
    }
}

/// Respawn each player's preview in front of them
pub fn update_build_preview(
    mut commands: Commands,
    time: Res<Time>,
    assets: Res<PreviewAssets>,
    mut players: Query<(Entity, &Transform, &mut PlayerBuild)>,
) {
    let dt = time.delta_secs();
    for (player, transform, mut build) in players.iter_mut() {
        // Idle players are left unmarked so Changed<PlayerBuild> stays quiet
        if build.0.state().previewed_piece().is_none() {
            continue;
        }
        let mut spawner = CommandsPreviewSpawner::new(&mut commands, &assets, player);
        build.0.on_tick(dt, transform, &mut spawner);
    }
}

/// Despawn previews whose owner no longer exists
fn despawn_orphaned_previews(
    mut commands: Commands,
    previews: Query<(Entity, &BuildPreview)>,
    owners: Query<(), With<PlayerBuild>>,
) {
    for (entity, preview) in previews.iter() {
        if !owners.contains(preview.owner) {
            commands.entity(entity).despawn();
        }
    }
}

fn spawn_build_mode_ui(mut commands: Commands) {
    commands.spawn((
        BuildModeUI,
        Text::new(""),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.9, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(16.0),
            left: Val::Px(16.0),
            ..default()
        },
    ));
}

/// Show the active build mode
fn update_build_mode_ui(
    players: Query<&PlayerBuild, (With<LocalPlayer>, Changed<PlayerBuild>)>,
    mut ui_query: Query<&mut Text, With<BuildModeUI>>,
) {
    let Ok(build) = players.single() else {
        return;
    };
    let Ok(mut text) = ui_query.single_mut() else {
        return;
    };
    **text = if build.0.in_build_mode() {
        format!(
            "BUILD: {}  [X] Wall  [F] Floor  [C] Stairs  [Esc] Exit",
            build.0.active_mode().display_name()
        )
    } else {
        String::new()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn world_with_player() -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(Time::<()>::default());
        world.init_resource::<PreviewAssets>();
        world.init_resource::<ScreenMessages>();
        world.init_resource::<PlayerActions>();
        let player = world
            .spawn((LocalPlayer, PlayerBuild::default(), Transform::from_xyz(0.0, 1.0, 0.0)))
            .id();
        (world, player)
    }

    fn previews(world: &mut World) -> Vec<(Entity, BuildPreview, Transform)> {
        world
            .query::<(Entity, &BuildPreview, &Transform)>()
            .iter(world)
            .map(|(entity, preview, transform)| (entity, *preview, *transform))
            .collect()
    }

    fn press(world: &mut World, actions: PlayerActions) {
        world.insert_resource(actions);
        world.run_system_once(toggle_build_mode).unwrap();
        world.insert_resource(PlayerActions::default());
    }

    fn show_wall() -> PlayerActions {
        PlayerActions {
            show_wall: true,
            ..default()
        }
    }

    #[test]
    fn test_idle_tick_spawns_nothing() {
        let (mut world, _) = world_with_player();
        world.run_system_once(update_build_preview).unwrap();
        world.run_system_once(update_build_preview).unwrap();
        assert!(previews(&mut world).is_empty());
    }

    #[test]
    fn test_idle_tick_leaves_build_unchanged() {
        let (mut world, player) = world_with_player();
        world.run_system_once(update_build_preview).unwrap();
        let before = world.entity(player).get_ref::<PlayerBuild>().unwrap().last_changed();

        world.run_system_once(update_build_preview).unwrap();
        let after = world.entity(player).get_ref::<PlayerBuild>().unwrap().last_changed();
        assert_eq!(before, after);

        press(&mut world, show_wall());
        world.run_system_once(update_build_preview).unwrap();
        let building = world.entity(player).get_ref::<PlayerBuild>().unwrap().last_changed();
        assert_ne!(after, building);
    }

    #[test]
    fn test_wall_preview_replaced_every_tick() {
        let (mut world, player) = world_with_player();
        press(&mut world, show_wall());

        world.run_system_once(update_build_preview).unwrap();
        let first = previews(&mut world);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].1.mode, BuildMode::Wall);
        assert_eq!(first[0].1.owner, player);
        assert!((first[0].2.translation - Vec3::new(0.0, 1.54, -2.5)).length() < 1e-5);

        world.run_system_once(update_build_preview).unwrap();
        let second = previews(&mut world);
        assert_eq!(second.len(), 1);
        assert_ne!(first[0].0, second[0].0);
    }

    #[test]
    fn test_second_toggle_clears_preview() {
        let (mut world, player) = world_with_player();
        press(&mut world, show_wall());
        world.run_system_once(update_build_preview).unwrap();
        press(&mut world, show_wall());

        assert!(previews(&mut world).is_empty());
        let build = world.get::<PlayerBuild>(player).unwrap();
        assert!(!build.0.in_build_mode());
        assert_eq!(build.0.active_mode(), BuildMode::None);
    }

    #[test]
    fn test_escape_leaves_build_mode() {
        let (mut world, player) = world_with_player();
        press(
            &mut world,
            PlayerActions {
                show_floor: true,
                ..default()
            },
        );
        world.run_system_once(update_build_preview).unwrap();
        press(
            &mut world,
            PlayerActions {
                exit_build: true,
                ..default()
            },
        );

        assert!(previews(&mut world).is_empty());
        assert!(!world.get::<PlayerBuild>(player).unwrap().0.in_build_mode());
    }

    #[test]
    fn test_previews_of_removed_player_are_despawned() {
        let (mut world, player) = world_with_player();
        press(&mut world, show_wall());
        world.run_system_once(update_build_preview).unwrap();

        world.despawn(player);
        world.run_system_once(despawn_orphaned_previews).unwrap();
        assert!(previews(&mut world).is_empty());
    }
}
