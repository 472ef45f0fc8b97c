//! Coordinator layer: the only doorway to kinematic state.
//!
//! [`PhysicsCoordinator`] owns the world and is the single writer of position
//! and velocity. [`MovementCoordinator`] arbitrates competing movement
//! requests before they become physics commands. Both are constructed up
//! front and passed explicitly to whoever needs them — there are no ambient
//! singletons and no late-bound references.

mod error;
mod movement;
mod physics;

pub use error::PhysicsError;
pub use movement::{
    MoveKind, MoveStatus, MovementCoordinator, MovementRequest, MovementResponse, Priority,
    RejectReason,
};
pub use physics::PhysicsCoordinator;

use crate::sim::SimEvent;

/// Advance the whole core one fixed step: flush this tick's arbitrated
/// movement winners into the command queue, run the simulation step, then
/// reopen arbitration for the next tick. Returns the step's events.
pub fn run_tick(
    physics: &mut PhysicsCoordinator,
    movement: &mut MovementCoordinator,
    dt: f32,
) -> Vec<SimEvent> {
    movement.close_window();
    movement.flush_into(physics);
    physics.step(dt);
    movement.open_window();
    physics.drain_events()
}
