//! Player control: raw action flags in, movement requests out.
//!
//! The controller holds no kinematic state of its own. Every tick it reads
//! the last step's contact state through the physics coordinator, runs the
//! jump state machine and its timers, and submits movement requests — it
//! never writes position or velocity directly.

use glam::Vec2;
use hecs::Entity;
use log::debug;
use pollster::block_on;

use crate::coordinator::{
    MoveKind, MoveStatus, MovementCoordinator, MovementRequest, PhysicsCoordinator, PhysicsError,
    Priority,
};
use crate::fsm::StateMachine;
use crate::tuning::Tuning;

/// Boolean action flags for one frame, already mapped from whatever input
/// device the shell uses. `jump_pressed` is edge-triggered, `jump_held` is
/// level-triggered.
#[derive(Default, Clone, Copy)]
pub struct ActionState {
    pub move_left: bool,
    pub move_right: bool,
    pub jump_held: bool,
    pub jump_pressed: bool,
    pub dash_pressed: bool,
}

/// Discrete phases of the jump cycle:
/// `Grounded → Jumping → Falling → Landing → Grounded`.
#[derive(Clone, Debug, PartialEq)]
pub enum JumpPhase {
    Grounded,
    /// Ascending. `released` is set once the jump key came up and the
    /// variable-height cut has been applied.
    Jumping { released: bool },
    Falling,
    /// One-tick transient on ground contact, the hook for landing effects.
    Landing,
}

/// Per-player control state machine. Created with the player entity, lives
/// for the session, never persisted.
pub struct PlayerController {
    entity: Entity,
    pub fsm: StateMachine<JumpPhase>,
    cooldown_remaining: f32,
    coyote_remaining: f32,
    buffer_remaining: f32,
    /// Last non-zero horizontal input direction; dashes go this way.
    facing: f32,
}

impl PlayerController {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            fsm: StateMachine::new(JumpPhase::Grounded),
            cooldown_remaining: 0.0,
            coyote_remaining: 0.0,
            buffer_remaining: 0.0,
            facing: 1.0,
        }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn phase(&self) -> &JumpPhase {
        &self.fsm.state
    }

    /// Run one control tick. Call before [`run_tick`](crate::run_tick) so the
    /// submitted requests land in the same simulation step.
    ///
    /// Fails only if the player entity is gone from the simulation; that is
    /// fatal to this controller, not to the simulation.
    pub fn update(
        &mut self,
        input: &ActionState,
        physics: &mut PhysicsCoordinator,
        movement: &mut MovementCoordinator,
        tuning: &Tuning,
        dt: f32,
    ) -> Result<(), PhysicsError> {
        let contact = block_on(physics.contact(self.entity))?;
        let velocity = block_on(physics.velocity(self.entity))?;

        // --- Timers -------------------------------------------------------
        self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
        if contact.on_ground {
            self.coyote_remaining = tuning.coyote_time;
        } else {
            self.coyote_remaining = (self.coyote_remaining - dt).max(0.0);
        }
        if input.jump_pressed {
            self.buffer_remaining = tuning.jump_buffer_time;
        } else {
            self.buffer_remaining = (self.buffer_remaining - dt).max(0.0);
        }

        // --- Jump ---------------------------------------------------------
        // Decided before horizontal movement: the arbiter accepts only one
        // request per entity per tick, and a launch outranks a stride.
        let jumped = self.try_jump(contact.on_ground, physics, movement, tuning);

        // --- Variable jump height -----------------------------------------
        // Releasing the key mid-ascent trims upward speed toward zero; it
        // never reverses into a downward push.
        if let JumpPhase::Jumping { released: false } = self.fsm.state {
            if !input.jump_held && velocity.y < 0.0 {
                physics.set_vertical_speed(self.entity, velocity.y * tuning.jump_cut_factor)?;
                self.fsm.state = JumpPhase::Jumping { released: true };
            }
        }

        // --- Horizontal ---------------------------------------------------
        if !jumped {
            let axis = (input.move_right as i32 - input.move_left as i32) as f32;
            if axis != 0.0 {
                self.facing = axis;
            }

            let request = if input.dash_pressed && contact.on_ground {
                Some((Vec2::new(self.facing, 0.0), tuning.dash_speed, MoveKind::Dash))
            } else if axis != 0.0 {
                Some((Vec2::new(axis, 0.0), tuning.walk_speed, MoveKind::Walk))
            } else if contact.on_ground {
                // Stop on the ground; airborne momentum is left alone.
                Some((Vec2::ZERO, 0.0, MoveKind::Walk))
            } else {
                None
            };

            if let Some((direction, magnitude, kind)) = request {
                let response = block_on(movement.submit(
                    physics,
                    MovementRequest {
                        entity: self.entity,
                        direction,
                        magnitude,
                        kind,
                        priority: Priority::High,
                    },
                ));
                if response.status == MoveStatus::Rejected {
                    // Normal gameplay flow: fall back to last known-good
                    // state by simply not moving this frame.
                    debug!("walk request rejected: {:?}", response.reason);
                }
            }
        }

        // --- Phase transitions --------------------------------------------
        match self.fsm.state.clone() {
            JumpPhase::Grounded => {
                if !contact.on_ground {
                    self.fsm.go(JumpPhase::Falling);
                }
            }
            JumpPhase::Jumping { .. } => {
                if !self.fsm.just_entered() {
                    if contact.just_landed {
                        self.fsm.go(JumpPhase::Landing);
                    } else if velocity.y >= 0.0 {
                        // Apex passed (or ascent cut): sign change, no input.
                        self.fsm.go(JumpPhase::Falling);
                    }
                }
            }
            JumpPhase::Falling => {
                if contact.on_ground {
                    self.fsm.go(JumpPhase::Landing);
                }
            }
            JumpPhase::Landing => {
                self.fsm.go(JumpPhase::Grounded);
            }
        }
        self.fsm.tick(dt);

        Ok(())
    }

    /// Attempt a jump if one is wanted (pressed now or still buffered) and
    /// permitted (grounded or inside the coyote window, cooldown expired).
    /// Refusal is silent: an invalid attempt is expected gameplay, not a
    /// fault. Returns whether a jump was launched.
    fn try_jump(
        &mut self,
        on_ground: bool,
        physics: &mut PhysicsCoordinator,
        movement: &mut MovementCoordinator,
        tuning: &Tuning,
    ) -> bool {
        let wants_jump = self.buffer_remaining > 0.0;
        let can_jump = (on_ground || self.coyote_remaining > 0.0)
            && self.cooldown_remaining <= 0.0;
        if !(wants_jump && can_jump) {
            return false;
        }

        let response = block_on(movement.submit(
            physics,
            MovementRequest {
                entity: self.entity,
                direction: Vec2::new(0.0, -1.0),
                magnitude: tuning.jump_speed,
                kind: MoveKind::Jump,
                priority: Priority::High,
            },
        ));
        if response.status != MoveStatus::Accepted {
            return false;
        }

        self.fsm.go(JumpPhase::Jumping { released: false });
        self.cooldown_remaining = tuning.jump_cooldown;
        self.coyote_remaining = 0.0;
        self.buffer_remaining = 0.0;
        true
    }
}

#[cfg(test)]
mod tests;
