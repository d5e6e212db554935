//! Pickup system - trace forward for interactable objects with the E key
//!
//! Reports what the trace hit on screen. Nothing is attached to the
//! character yet.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use shared::{trace_for_pickup, PickupOutcome, TraceHit, TraceService, WeaponPickup};

use crate::character::{CharacterSet, LocalPlayer};
use crate::config::ActiveConfig;
use crate::debug_text::ScreenMessages;
use crate::input::PlayerActions;

/// Plugin for the pickup system
pub struct PickupPlugin;

impl Plugin for PickupPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, handle_pickup_input.in_set(CharacterSet::Input));
    }
}

/// Rapier-backed line traces against solid colliders
pub struct RapierTraces<'a, 'w> {
    context: &'a RapierContext<'w>,
}

impl<'a, 'w> RapierTraces<'a, 'w> {
    pub fn new(context: &'a RapierContext<'w>) -> Self {
        Self { context }
    }
}

impl TraceService for RapierTraces<'_, '_> {
    fn line_trace(&self, start: Vec3, end: Vec3, ignore: Entity) -> Option<TraceHit> {
        let offset = end - start;
        let length = offset.length();
        if length <= f32::EPSILON {
            return None;
        }
        let direction = offset / length;
        let filter = QueryFilter::default()
            .exclude_collider(ignore)
            .exclude_sensors();

        self.context
            .cast_ray(start, direction, length, true, filter)
            .map(|(entity, distance)| TraceHit { entity, distance })
    }
}

/// Trace in front of the player when the pickup key is pressed
fn handle_pickup_input(
    actions: Res<PlayerActions>,
    config: Res<ActiveConfig>,
    rapier_context: ReadRapierContext,
    players: Query<(Entity, &Transform), With<LocalPlayer>>,
    weapons: Query<(), With<WeaponPickup>>,
    names: Query<&Name>,
    mut messages: ResMut<ScreenMessages>,
) {
    if !actions.pick_up_item {
        return;
    }
    messages.push("e key pressed");

    let Ok((player, transform)) = players.single() else {
        return;
    };
    let Ok(context) = rapier_context.single() else {
        return;
    };

    let traces = RapierTraces::new(&context);
    let outcome = trace_for_pickup(&traces, player, transform, config.0.pickup_range, |entity| {
        weapons.contains(entity)
    });

    let describe = |hit: &TraceHit| {
        names
            .get(hit.entity)
            .map(|name| name.as_str().to_string())
            .unwrap_or_else(|_| format!("{:?}", hit.entity))
    };

    match outcome {
        PickupOutcome::Nothing => {}
        PickupOutcome::Weapon(hit) => {
            messages.push("Weapon in reach");
            messages.push(format!("Found {} ({:.1} m)", describe(&hit), hit.distance));
        }
        PickupOutcome::Found(hit) => {
            messages.push(format!("Found {} ({:.1} m)", describe(&hit), hit.distance));
        }
    }
}
