use thiserror::Error;

/// Failures surfaced by the coordinator API.
///
/// These are fatal to the *caller*, never to the simulation: a step always
/// completes for every registered entity regardless of what a caller did with
/// a stale handle or a bad shape.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum PhysicsError {
    /// No kinematic state is registered under this entity handle.
    #[error("no kinematic state registered for {0:?}")]
    EntityNotFound(hecs::Entity),

    /// Zero-area or non-finite hitbox, refused at construction time.
    #[error("degenerate hitbox {width}x{height}")]
    DegenerateHitbox { width: f32, height: f32 },

    /// Bounciness outside [0, 1], refused at construction time.
    #[error("bounciness {0} outside [0, 1]")]
    InvalidBounciness(f32),
}
