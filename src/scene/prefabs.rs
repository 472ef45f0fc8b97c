use glam::Vec2;
use hecs::Entity;

use crate::components::Tags;
use crate::coordinator::{PhysicsCoordinator, PhysicsError};

/// Standard player hitbox, px.
const PLAYER_SIZE: Vec2 = Vec2::new(28.0, 44.0);

/// Spawn the player: unit mass, zero bounciness so landings never rebound.
pub fn spawn_player(
    physics: &mut PhysicsCoordinator,
    position: Vec2,
) -> Result<Entity, PhysicsError> {
    physics.spawn_dynamic(position, PLAYER_SIZE, 1.0, 0.0, Tags::new(["player"]))
}

/// Spawn a walking enemy with a little bounce so knockback reads well.
pub fn spawn_enemy(
    physics: &mut PhysicsCoordinator,
    position: Vec2,
    size: Vec2,
) -> Result<Entity, PhysicsError> {
    physics.spawn_dynamic(position, size, 1.0, 0.2, Tags::new(["enemy"]))
}

/// Entities of interest in the demo level.
pub struct DemoLevel {
    pub player: Entity,
    pub enemy: Entity,
    pub ground: Entity,
    pub ledge: Entity,
    pub pass_through: Entity,
}

/// Build the level the demo binary runs: a wide ground slab with an enemy
/// patrol spot, a raised ledge with open air past its right edge, and a
/// one-way platform above the gap.
///
/// ```text
///            [pass-through]
///   [ledge]
/// [========= ground ===[e]==]
/// ```
pub fn load_demo_level(physics: &mut PhysicsCoordinator) -> Result<DemoLevel, PhysicsError> {
    let ground = physics.spawn_platform(Vec2::new(-400.0, 300.0), Vec2::new(1200.0, 60.0), false)?;
    let ledge = physics.spawn_platform(Vec2::new(-100.0, 220.0), Vec2::new(220.0, 20.0), false)?;
    let pass_through =
        physics.spawn_platform(Vec2::new(180.0, 150.0), Vec2::new(140.0, 10.0), true)?;
    let player = spawn_player(physics, Vec2::new(0.0, 220.0 - PLAYER_SIZE.y))?;
    let enemy = spawn_enemy(physics, Vec2::new(360.0, 270.0), Vec2::new(26.0, 30.0))?;

    Ok(DemoLevel {
        player,
        enemy,
        ground,
        ledge,
        pass_through,
    })
}
