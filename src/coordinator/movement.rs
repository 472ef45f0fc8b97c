use std::collections::HashMap;

use glam::Vec2;
use hecs::Entity;
use log::{debug, warn};

use super::physics::PhysicsCoordinator;

/// How a movement delta should be applied once it wins arbitration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Walk,
    Dash,
    Jump,
    ExternalForce,
}

/// Arbitration weight. Player input submits `High`; ambient effects (wind,
/// conveyor drift) submit `Low` and lose to anything the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Normal,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    /// The next simulation step will apply this delta.
    Accepted,
    /// Nothing happens this tick; resubmit next frame if still wanted.
    Rejected,
    /// Valid, but the step was in progress; held for the following tick.
    Deferred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Direction or magnitude is NaN/infinite.
    NonFiniteInput,
    /// Magnitude below zero.
    NegativeMagnitude,
    /// Non-zero magnitude with a direction that is not unit length.
    NonUnitDirection,
    /// The entity has no registered kinematic state.
    UnknownEntity,
    /// Another request of equal or higher priority already holds this
    /// entity's slot for the tick.
    SlotTaken,
}

/// One movement ask for one entity. `direction` must be unit length (a 5%
/// tolerance is allowed) whenever `magnitude` is non-zero.
#[derive(Debug, Clone, Copy)]
pub struct MovementRequest {
    pub entity: Entity,
    pub direction: Vec2,
    pub magnitude: f32,
    pub kind: MoveKind,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementResponse {
    pub status: MoveStatus,
    pub reason: Option<RejectReason>,
}

impl MovementResponse {
    fn accepted() -> Self {
        Self { status: MoveStatus::Accepted, reason: None }
    }

    fn rejected(reason: RejectReason) -> Self {
        Self { status: MoveStatus::Rejected, reason: Some(reason) }
    }

    fn deferred() -> Self {
        Self { status: MoveStatus::Deferred, reason: None }
    }
}

const UNIT_TOLERANCE: f32 = 0.05;

/// Arbitrates movement requests: at most one accepted request per entity per
/// tick, higher priority preempting lower, ties resolved in submission order.
/// Winners are translated into physics commands when the tick is flushed.
///
/// Rejection is final for the frame and carries no side effects, so callers
/// may blindly resubmit every frame.
pub struct MovementCoordinator {
    slots: HashMap<Entity, MovementRequest>,
    held: Vec<MovementRequest>,
    window_open: bool,
}

impl Default for MovementCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl MovementCoordinator {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            held: Vec::new(),
            window_open: true,
        }
    }

    /// Submit one movement request. Async-shaped for the same reason as the
    /// physics queries; completes synchronously today.
    pub async fn submit(
        &mut self,
        physics: &PhysicsCoordinator,
        request: MovementRequest,
    ) -> MovementResponse {
        if let Some(reason) = validate(physics, &request) {
            debug!(
                "movement request for {:?} rejected: {reason:?}",
                request.entity
            );
            return MovementResponse::rejected(reason);
        }

        if !self.window_open {
            self.held.push(request);
            return MovementResponse::deferred();
        }

        self.arbitrate(request)
    }

    fn arbitrate(&mut self, request: MovementRequest) -> MovementResponse {
        match self.slots.get(&request.entity) {
            None => {
                self.slots.insert(request.entity, request);
                MovementResponse::accepted()
            }
            Some(current) if request.priority > current.priority => {
                debug!(
                    "{:?} request preempts {:?} for {:?}",
                    request.priority, current.priority, request.entity
                );
                self.slots.insert(request.entity, request);
                MovementResponse::accepted()
            }
            Some(_) => MovementResponse::rejected(RejectReason::SlotTaken),
        }
    }

    /// Close the arbitration window for the duration of a step. Valid
    /// requests arriving while closed are answered `Deferred` and compete in
    /// the following tick.
    pub(crate) fn close_window(&mut self) {
        self.window_open = false;
    }

    /// Reopen after a step, promoting any deferred requests into the fresh
    /// tick's arbitration.
    pub(crate) fn open_window(&mut self) {
        self.window_open = true;
        for request in std::mem::take(&mut self.held) {
            let _ = self.arbitrate(request);
        }
    }

    /// Translate this tick's winners into queued physics commands. Called
    /// once per frame right before the step.
    pub(crate) fn flush_into(&mut self, physics: &mut PhysicsCoordinator) {
        for (entity, request) in self.slots.drain() {
            let result = if request.magnitude == 0.0 {
                // Unconditional stop.
                physics.set_horizontal_speed(entity, 0.0)
            } else {
                match request.kind {
                    MoveKind::Walk | MoveKind::Dash => physics
                        .set_horizontal_speed(entity, request.direction.x * request.magnitude),
                    MoveKind::Jump => physics
                        .set_vertical_speed(entity, request.direction.y * request.magnitude),
                    MoveKind::ExternalForce => {
                        physics.apply_force(entity, request.direction * request.magnitude)
                    }
                }
            };
            if let Err(err) = result {
                // Entity despawned between acceptance and flush.
                warn!("dropping accepted movement request: {err}");
            }
        }
    }
}

/// Returns the reason a request is malformed, or `None` when it is valid.
/// A zero-magnitude request is always valid ("stop").
fn validate(physics: &PhysicsCoordinator, request: &MovementRequest) -> Option<RejectReason> {
    if !request.magnitude.is_finite() || !request.direction.is_finite() {
        return Some(RejectReason::NonFiniteInput);
    }
    if request.magnitude < 0.0 {
        return Some(RejectReason::NegativeMagnitude);
    }
    if !physics.contains(request.entity) {
        return Some(RejectReason::UnknownEntity);
    }
    if request.magnitude > 0.0 {
        let len = request.direction.length();
        if (len - 1.0).abs() > UNIT_TOLERANCE {
            return Some(RejectReason::NonUnitDirection);
        }
    }
    None
}
