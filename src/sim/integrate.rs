use glam::Vec2;
use hecs::World;

use crate::components::{
    GravityAffected, GroundContact, Kinematics, Position, PreviousPosition, Static,
};
use crate::tuning::Tuning;

/// Clear last tick's single-frame transition pulses. Runs first in the step,
/// so `just_landed`/`just_left_ground` stay observable for exactly the tick
/// after the step that set them.
pub(crate) fn clear_pulses(world: &mut World) {
    for (_entity, contact) in world.query_mut::<&mut GroundContact>() {
        contact.just_landed = false;
        contact.just_left_ground = false;
    }
}

/// Velocity and position integration for every non-static entity:
/// gravity, terminal-velocity clamp, horizontal friction, then
/// `position += velocity * dt` (semi-implicit Euler, velocity first).
pub(crate) fn integrate(world: &mut World, tuning: &Tuning, dt: f32) {
    for (_entity, (pos, prev, kin, gravity, contact)) in world
        .query_mut::<(
            &mut Position,
            &mut PreviousPosition,
            &mut Kinematics,
            Option<&GravityAffected>,
            Option<&GroundContact>,
        )>()
        .without::<&Static>()
    {
        if gravity.is_some() {
            kin.velocity.y += tuning.gravity * dt;
        }
        kin.velocity += kin.acceleration * dt;

        // Terminal velocity, each axis independently.
        kin.velocity.x = kin
            .velocity
            .x
            .clamp(-tuning.terminal_velocity_x, tuning.terminal_velocity_x);
        kin.velocity.y = kin
            .velocity
            .y
            .clamp(-tuning.terminal_velocity_y, tuning.terminal_velocity_y);

        // Horizontal friction decays toward zero, never reverses sign.
        // Contact-free entities (moving platforms) keep their scripted speed.
        if let Some(contact) = contact {
            let coefficient = if contact.on_ground {
                tuning.ground_friction
            } else {
                tuning.air_friction
            };
            let decay = coefficient * dt;
            if kin.velocity.x.abs() <= decay {
                kin.velocity.x = 0.0;
            } else {
                kin.velocity.x -= kin.velocity.x.signum() * decay;
            }
        }

        prev.0 = pos.0;
        pos.0 += kin.velocity * dt;
    }
}

/// Forces are per-tick: whatever `apply_force` accumulated is consumed by the
/// integration above and zeroed here at the end of the step.
pub(crate) fn clear_accelerations(world: &mut World) {
    for (_entity, kin) in world.query_mut::<&mut Kinematics>() {
        kin.acceleration = Vec2::ZERO;
    }
}
