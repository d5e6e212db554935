//! World setup
//!
//! Spawns the ground, lights, a few props to walk into and pick up, the
//! player character and its follow camera.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use shared::{
    CharacterMotion, ControlRotation, PendingMovement, WeaponPickup, PLAYER_HALF_HEIGHT,
    PLAYER_RADIUS, SPAWN_POSITION,
};

use crate::build_mode::PlayerBuild;
use crate::camera::FollowCamera;
use crate::character::{CharacterMovement, LocalPlayer};
use crate::config::ActiveConfig;

/// Half extent of the square ground plane
const GROUND_HALF_SIZE: f32 = 50.0;

/// Static crates scattered around the spawn (position, half extents)
const CRATES: &[([f32; 3], [f32; 3])] = &[
    ([4.0, 0.5, -6.0], [0.5, 0.5, 0.5]),
    ([-5.0, 1.0, -3.0], [1.0, 1.0, 1.0]),
    ([0.0, 1.5, -12.0], [3.0, 1.5, 0.3]),
];

/// Weapons lying on the ground
const WEAPONS: &[(&str, [f32; 3])] = &[
    ("Rifle", [2.0, 0.15, -4.0]),
    ("Pistol", [-2.0, 0.15, 3.0]),
];

pub fn spawn_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<ActiveConfig>,
) {
    // --- Ground ---
    let ground_size = GROUND_HALF_SIZE * 2.0;
    commands.spawn((
        Name::new("Ground"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(ground_size, ground_size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.45, 0.55, 0.35),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::default(),
        Collider::cuboid(GROUND_HALF_SIZE, 0.05, GROUND_HALF_SIZE),
    ));

    // --- Lights ---
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.9, 0.4, 0.0)),
    ));

    // --- Props ---
    let crate_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.4, 0.25),
        ..default()
    });
    for (index, (position, half_extents)) in CRATES.iter().enumerate() {
        let half = Vec3::from_array(*half_extents);
        commands.spawn((
            Name::new(format!("Crate {}", index + 1)),
            Mesh3d(meshes.add(Cuboid::from_size(half * 2.0))),
            MeshMaterial3d(crate_material.clone()),
            Transform::from_translation(Vec3::from_array(*position)),
            Collider::cuboid(half.x, half.y, half.z),
        ));
    }

    let weapon_mesh = meshes.add(Cuboid::new(0.55, 0.12, 0.18));
    let weapon_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.2, 0.22),
        metallic: 0.35,
        perceptual_roughness: 0.45,
        ..default()
    });
    for (name, position) in WEAPONS {
        commands.spawn((
            Name::new(*name),
            WeaponPickup,
            Mesh3d(weapon_mesh.clone()),
            MeshMaterial3d(weapon_material.clone()),
            Transform::from_translation(Vec3::from_array(*position)),
            Collider::cuboid(0.275, 0.06, 0.09),
        ));
    }

    // --- Player ---
    let config = &config.0;
    let cylinder_half = PLAYER_HALF_HEIGHT - PLAYER_RADIUS;
    commands.spawn((
        (
            LocalPlayer,
            Name::new("Player"),
            Mesh3d(meshes.add(Capsule3d::new(PLAYER_RADIUS, cylinder_half * 2.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.8, 0.75, 0.6),
                ..default()
            })),
            Transform::from_translation(Vec3::from_array(SPAWN_POSITION)),
        ),
        (
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(cylinder_half, PLAYER_RADIUS),
            KinematicCharacterController {
                snap_to_ground: Some(CharacterLength::Absolute(0.2)),
                ..default()
            },
        ),
        (
            ControlRotation::default(),
            PendingMovement::default(),
            CharacterMotion::default(),
            CharacterMovement(config.movement),
            config.camera,
            PlayerBuild::default(),
        ),
    ));

    // --- Camera ---
    commands.spawn((FollowCamera, Camera3d::default(), Transform::default()));

    info!("World spawned");
}
