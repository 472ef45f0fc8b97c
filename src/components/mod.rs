use glam::Vec2;
use std::collections::HashSet;

use crate::coordinator::PhysicsError;

/// Authoritative world position (top-left corner of the hitbox).
/// Mutated only by the simulation step; read through the physics coordinator.
pub struct Position(pub Vec2);

/// Position at the start of the last integration pass. Needed by the one-way
/// platform rule, which must know whether the entity was above the surface
/// before it moved.
pub struct PreviousPosition(pub Vec2);

/// Velocity, accumulated per-tick acceleration, and the response parameters
/// the resolver needs. Acceleration is cleared at the end of every step, so
/// forces last exactly one tick unless re-applied.
pub struct Kinematics {
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub mass: f32,
    /// 0.0 = dead stop on contact, 1.0 = perfect rebound. Player-like
    /// entities use 0.0 so they never bounce off platforms.
    pub bounciness: f32,
}

impl Kinematics {
    pub fn new(mass: f32, bounciness: f32) -> Result<Self, PhysicsError> {
        if !(0.0..=1.0).contains(&bounciness) || !bounciness.is_finite() {
            return Err(PhysicsError::InvalidBounciness(bounciness));
        }
        Ok(Self {
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            mass: if mass.is_finite() && mass > 0.0 { mass } else { 1.0 },
            bounciness,
        })
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }
}

/// Ground contact state. The `just_*` flags are single-tick pulses: set by the
/// step that observed the transition, cleared at the start of the next one.
#[derive(Default, Clone, Copy)]
pub struct GroundContact {
    pub on_ground: bool,
    pub just_landed: bool,
    pub just_left_ground: bool,
}

/// Axis-aligned collision box. Zero-area or non-finite extents are rejected
/// at construction, so the resolver never sees degenerate geometry.
#[derive(Clone, Copy)]
pub struct Hitbox {
    pub size: Vec2,
}

impl Hitbox {
    pub fn new(size: Vec2) -> Result<Self, PhysicsError> {
        if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
            return Err(PhysicsError::DegenerateHitbox { width: size.x, height: size.y });
        }
        Ok(Self { size })
    }
}

/// Free-form collision tags ("player", "platform", "enemy", ...). Queried by
/// gameplay code; the resolver itself keys off [`Platform`] and [`Static`].
pub struct Tags(pub HashSet<String>);

impl Tags {
    pub fn new<'a>(tags: impl IntoIterator<Item = &'a str>) -> Self {
        Self(tags.into_iter().map(str::to_owned).collect())
    }

    pub fn has(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }
}

/// Edge proximity, updated each step for grounded entities. The flags are
/// only meaningful while `GroundContact::on_ground` is true.
pub struct EdgeSense {
    pub near_left: bool,
    pub near_right: bool,
    /// How far past the hitbox edge the foot probes reach, px.
    pub threshold: f32,
    /// Distance from the hitbox edge to the supporting platform's edge when a
    /// flag is set; `f32::MAX` otherwise.
    pub distance: f32,
}

impl EdgeSense {
    pub fn new(threshold: f32) -> Self {
        Self {
            near_left: false,
            near_right: false,
            threshold,
            distance: f32::MAX,
        }
    }
}

/// Marker: entity is pulled down by gravity each step. Moving platforms
/// carry [`Kinematics`] without this marker.
pub struct GravityAffected;

/// Marker: this entity's hitbox blocks dynamic entities.
pub struct Platform {
    /// One-way platforms block only entities moving down onto the surface;
    /// upward movement passes through.
    pub one_way: bool,
}

/// Marker: entity is immovable and ignores gravity and commands.
pub struct Static;

/// Marker: this entity is the player.
pub struct Player;
