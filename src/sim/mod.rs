//! The per-frame simulation step, split into its passes. All functions here
//! are crate-internal; the only caller is
//! [`PhysicsCoordinator::step`](crate::coordinator::PhysicsCoordinator::step).

mod collision;
mod edges;
mod integrate;

pub(crate) use collision::resolve_collisions;
pub(crate) use edges::sense_edges;
pub(crate) use integrate::{clear_accelerations, clear_pulses, integrate};

pub(crate) use collision::Aabb;

use hecs::Entity;

/// Which side of the supporting platform a grounded entity is close to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSide {
    Left,
    Right,
}

/// Transition events produced by a step. Fired on state *changes* only, never
/// re-fired every frame, so downstream consumers (animation, audio) are not
/// flooded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    Landed(Entity),
    LeftGround(Entity),
    EdgeApproached { entity: Entity, side: EdgeSide },
    EdgeCleared { entity: Entity, side: EdgeSide },
}
