//! Line traces for interaction
//!
//! The physics backend implements [`TraceService`]; the pickup rules here only
//! decide what a hit means.

use bevy::prelude::*;

/// Marker for entities that can be picked up as a weapon
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeaponPickup;

/// First thing a line trace hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceHit {
    pub entity: Entity,
    pub distance: f32,
}

/// Ray query against static world geometry
pub trait TraceService {
    /// Trace from `start` to `end`, ignoring `ignore`. Returns the closest hit.
    fn line_trace(&self, start: Vec3, end: Vec3, ignore: Entity) -> Option<TraceHit>;
}

/// What a pickup trace found
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickupOutcome {
    Nothing,
    Found(TraceHit),
    Weapon(TraceHit),
}

/// Trace `range` meters along `actor`'s facing and classify the hit.
pub fn trace_for_pickup(
    traces: &impl TraceService,
    actor: Entity,
    actor_transform: &Transform,
    range: f32,
    is_weapon: impl Fn(Entity) -> bool,
) -> PickupOutcome {
    let start = actor_transform.translation;
    let end = start + actor_transform.forward().as_vec3() * range;

    match traces.line_trace(start, end, actor) {
        None => PickupOutcome::Nothing,
        Some(hit) if is_weapon(hit.entity) => PickupOutcome::Weapon(hit),
        Some(hit) => PickupOutcome::Found(hit),
    }
}
