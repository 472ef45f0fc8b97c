use glam::Vec2;
use hecs::{Entity, World};
use log::warn;

use crate::components::{
    EdgeSense, GravityAffected, GroundContact, Hitbox, Kinematics, Platform, Position,
    PreviousPosition, Static, Tags,
};
use crate::sim::{self, SimEvent};
use crate::tuning::Tuning;

use super::PhysicsError;

/// A queued mutation, applied at the start of the next step. Commands never
/// touch state synchronously, so a caller can never produce a torn read
/// mid-frame.
enum Command {
    ApplyForce(Vec2),
    ApplyImpulse(Vec2),
    SetVelocity(Vec2),
    SetHorizontalSpeed(f32),
    SetVerticalSpeed(f32),
}

struct QueuedCommand {
    entity: Entity,
    op: Command,
}

/// Sole owner and sole mutator of entity position and velocity.
///
/// Everything outside the step observes kinematic state through the read
/// queries here and requests changes through the command queue. The read
/// queries are async-shaped as the forward-compatible seam for moving the
/// simulation off-thread; today they complete synchronously and are resolved
/// with `pollster::block_on` at the frame boundary.
pub struct PhysicsCoordinator {
    world: World,
    tuning: Tuning,
    queue: Vec<QueuedCommand>,
    events: Vec<SimEvent>,
}

impl PhysicsCoordinator {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            world: World::new(),
            tuning,
            queue: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Register a gravity-affected dynamic entity. Position and hitbox are
    /// fixed here at creation; afterwards position changes only through the
    /// simulation step.
    pub fn spawn_dynamic(
        &mut self,
        position: Vec2,
        hitbox_size: Vec2,
        mass: f32,
        bounciness: f32,
        tags: Tags,
    ) -> Result<Entity, PhysicsError> {
        let hitbox = Hitbox::new(hitbox_size)?;
        let kinematics = Kinematics::new(mass, bounciness)?;
        let entity = self.world.spawn((
            Position(position),
            PreviousPosition(position),
            kinematics,
            hitbox,
            GroundContact::default(),
            EdgeSense::new(self.tuning.edge_probe_threshold),
            GravityAffected,
            tags,
        ));
        Ok(entity)
    }

    /// Register an immovable platform slab.
    pub fn spawn_platform(
        &mut self,
        position: Vec2,
        hitbox_size: Vec2,
        one_way: bool,
    ) -> Result<Entity, PhysicsError> {
        let hitbox = Hitbox::new(hitbox_size)?;
        Ok(self.world.spawn((
            Position(position),
            hitbox,
            Platform { one_way },
            Static,
            Tags::new(["platform"]),
        )))
    }

    /// Register a platform that moves with a scripted velocity. It integrates
    /// like a dynamic entity (no gravity) but is never displaced by collision
    /// resolution.
    pub fn spawn_moving_platform(
        &mut self,
        position: Vec2,
        hitbox_size: Vec2,
        velocity: Vec2,
    ) -> Result<Entity, PhysicsError> {
        let hitbox = Hitbox::new(hitbox_size)?;
        let kinematics = Kinematics::new(1.0, 0.0)?.with_velocity(velocity);
        Ok(self.world.spawn((
            Position(position),
            PreviousPosition(position),
            kinematics,
            hitbox,
            Platform { one_way: false },
            Tags::new(["platform"]),
        )))
    }

    pub fn despawn(&mut self, entity: Entity) -> Result<(), PhysicsError> {
        self.world
            .despawn(entity)
            .map_err(|_| PhysicsError::EntityNotFound(entity))
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    // -----------------------------------------------------------------------
    // Read queries — most recent step's authoritative values
    // -----------------------------------------------------------------------

    pub async fn position(&self, entity: Entity) -> Result<Vec2, PhysicsError> {
        self.world
            .get::<&Position>(entity)
            .map(|p| p.0)
            .map_err(|_| PhysicsError::EntityNotFound(entity))
    }

    pub async fn velocity(&self, entity: Entity) -> Result<Vec2, PhysicsError> {
        self.world
            .get::<&Kinematics>(entity)
            .map(|k| k.velocity)
            .map_err(|_| PhysicsError::EntityNotFound(entity))
    }

    pub async fn is_grounded(&self, entity: Entity) -> Result<bool, PhysicsError> {
        self.contact(entity).await.map(|c| c.on_ground)
    }

    /// Full ground-contact state including the single-tick transition pulses.
    pub async fn contact(&self, entity: Entity) -> Result<GroundContact, PhysicsError> {
        self.world
            .get::<&GroundContact>(entity)
            .map(|c| *c)
            .map_err(|_| PhysicsError::EntityNotFound(entity))
    }

    /// Edge proximity as of the last step: (near_left, near_right, distance).
    pub async fn edge_sense(&self, entity: Entity) -> Result<(bool, bool, f32), PhysicsError> {
        self.world
            .get::<&EdgeSense>(entity)
            .map(|e| (e.near_left, e.near_right, e.distance))
            .map_err(|_| PhysicsError::EntityNotFound(entity))
    }

    // -----------------------------------------------------------------------
    // Commands — queued, applied at the start of the next step
    // -----------------------------------------------------------------------

    pub fn apply_force(&mut self, entity: Entity, force: Vec2) -> Result<(), PhysicsError> {
        self.enqueue(entity, Command::ApplyForce(force))
    }

    pub fn apply_impulse(&mut self, entity: Entity, impulse: Vec2) -> Result<(), PhysicsError> {
        self.enqueue(entity, Command::ApplyImpulse(impulse))
    }

    pub fn set_velocity(&mut self, entity: Entity, velocity: Vec2) -> Result<(), PhysicsError> {
        self.enqueue(entity, Command::SetVelocity(velocity))
    }

    pub fn set_horizontal_speed(&mut self, entity: Entity, vx: f32) -> Result<(), PhysicsError> {
        self.enqueue(entity, Command::SetHorizontalSpeed(vx))
    }

    pub fn set_vertical_speed(&mut self, entity: Entity, vy: f32) -> Result<(), PhysicsError> {
        self.enqueue(entity, Command::SetVerticalSpeed(vy))
    }

    fn enqueue(&mut self, entity: Entity, op: Command) -> Result<(), PhysicsError> {
        if !self.world.contains(entity) {
            return Err(PhysicsError::EntityNotFound(entity));
        }
        self.queue.push(QueuedCommand { entity, op });
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Step
    // -----------------------------------------------------------------------

    /// Advance the simulation one fixed step. Order inside the step:
    /// clear last tick's transition pulses, drain queued commands, integrate,
    /// resolve collisions Y-before-X, update edge proximity.
    pub fn step(&mut self, dt: f32) {
        sim::clear_pulses(&mut self.world);
        self.drain_commands();
        sim::integrate(&mut self.world, &self.tuning, dt);
        sim::resolve_collisions(&mut self.world, &mut self.events);
        sim::sense_edges(&mut self.world, &mut self.events);
        sim::clear_accelerations(&mut self.world);
    }

    /// Take the events the last step produced (landing, leaving ground, edge
    /// transitions). Consumed by animation/audio layers outside this crate.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    fn drain_commands(&mut self) {
        for QueuedCommand { entity, op } in self.queue.drain(..) {
            // Existence was checked at enqueue time; an entity despawned in
            // between is tolerated, logged, and skipped — never a stopped step.
            let Ok(mut kin) = self.world.get::<&mut Kinematics>(entity) else {
                warn!("dropping queued command for despawned entity {entity:?}");
                continue;
            };
            let mass = kin.mass;
            match op {
                Command::ApplyForce(force) => kin.acceleration += force / mass,
                Command::ApplyImpulse(impulse) => kin.velocity += impulse / mass,
                Command::SetVelocity(velocity) => kin.velocity = velocity,
                Command::SetHorizontalSpeed(vx) => kin.velocity.x = vx,
                Command::SetVerticalSpeed(vy) => kin.velocity.y = vy,
            }
        }
    }
}
