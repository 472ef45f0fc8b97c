//! Platformer physics and movement-coordination core.
//!
//! The simulation owns all kinematic state. Position and velocity live inside
//! the [`PhysicsCoordinator`](coordinator::PhysicsCoordinator)'s world and are
//! mutated exclusively by the per-frame step; everything else (player control,
//! animation, camera) observes them through the coordinator's query surface
//! and requests changes through queued commands or the
//! [`MovementCoordinator`](coordinator::MovementCoordinator).
//!
//! The coordinator API is async-shaped even though the current implementation
//! completes synchronously within the tick — that seam is where a dedicated
//! physics thread would slot in later without touching call sites. Resolve the
//! futures with `pollster::block_on` at the frame boundary.

pub mod components;
pub mod control;
pub mod coordinator;
pub mod fsm;
pub mod scene;
pub mod sim;
pub mod tuning;

pub use coordinator::{
    run_tick, MovementCoordinator, MovementRequest, MovementResponse, MoveKind, MoveStatus,
    PhysicsCoordinator, PhysicsError, Priority, RejectReason,
};
pub use control::{ActionState, JumpPhase, PlayerController};
pub use sim::{EdgeSide, SimEvent};
pub use tuning::Tuning;
