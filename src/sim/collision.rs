use glam::Vec2;
use hecs::World;

use crate::components::{
    GroundContact, Hitbox, Kinematics, Platform, Position, PreviousPosition, Static,
};

use super::SimEvent;

/// Axis-aligned box in world space, top-left anchored (+Y down).
#[derive(Clone, Copy)]
pub(crate) struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { min: position, max: position + size }
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x
    }

    fn overlaps_y(&self, other: &Aabb) -> bool {
        self.min.y < other.max.y && self.max.y > other.min.y
    }
}

struct PlatformShape {
    aabb: Aabb,
    one_way: bool,
}

/// Slack for the one-way "was above the surface last frame" test and for the
/// resting-support probe.
const SURFACE_EPS: f32 = 0.5;

/// Impact speeds below this settle instead of bouncing, so bouncy entities
/// eventually come to rest.
const REST_SPEED: f32 = 20.0;

/// Detect and resolve overlap between dynamic entities and platforms, then
/// recompute ground contact. Resolution is axis-separated, always Y before X,
/// and each pass only corrects overlaps the entity crossed into on its own
/// axis this frame — a wall hit from the side is never resolved vertically.
/// A diagonal approach into a platform corner lands on top rather than being
/// pushed out sideways, and depth ties resolve the same way every tick.
///
/// Platforms are never displaced, so per-entity resolution is pairwise and
/// idempotent regardless of iteration order.
pub(crate) fn resolve_collisions(world: &mut World, events: &mut Vec<SimEvent>) {
    let platforms: Vec<PlatformShape> = world
        .query_mut::<(&Position, &Hitbox, &Platform)>()
        .into_iter()
        .map(|(_entity, (pos, hitbox, platform))| PlatformShape {
            aabb: Aabb::new(pos.0, hitbox.size),
            one_way: platform.one_way,
        })
        .collect();

    for (entity, (pos, prev, kin, contact, hitbox)) in world
        .query_mut::<(
            &mut Position,
            &PreviousPosition,
            &mut Kinematics,
            &mut GroundContact,
            &Hitbox,
        )>()
        .without::<&Static>()
        .without::<&Platform>()
    {
        let size = hitbox.size;
        let prev_aabb = Aabb::new(prev.0, size);
        let prev_bottom = prev.0.y + size.y;
        let was_on_ground = contact.on_ground;

        // --- Y pass -------------------------------------------------------
        for platform in &platforms {
            let aabb = Aabb::new(pos.0, size);
            if !aabb.overlaps(&platform.aabb) {
                continue;
            }

            // Only overlaps crossed vertically this frame are resolved here.
            // Side entries (already overlapping in Y, not yet in X last frame)
            // belong to the X pass; a corner approach with no prior overlap on
            // either axis counts as vertical.
            if prev_aabb.overlaps_y(&platform.aabb) && !prev_aabb.overlaps_x(&platform.aabb) {
                continue;
            }

            let falling = kin.velocity.y > 0.0;
            if platform.one_way && !(falling && prev_bottom <= platform.aabb.min.y + SURFACE_EPS)
            {
                // Moving up (or already inside from the side): pass through.
                continue;
            }

            let push_up = aabb.max.y - platform.aabb.min.y;
            let push_down = platform.aabb.max.y - aabb.min.y;
            let resolve_up = if kin.velocity.y > 0.0 {
                true
            } else if kin.velocity.y < 0.0 {
                false
            } else {
                push_up <= push_down
            };

            if resolve_up {
                pos.0.y = platform.aabb.min.y - size.y;
                if kin.bounciness > 0.0 && kin.velocity.y > REST_SPEED {
                    kin.velocity.y = -kin.velocity.y * kin.bounciness;
                } else {
                    kin.velocity.y = 0.0;
                }
            } else {
                pos.0.y = platform.aabb.max.y;
                if kin.bounciness > 0.0 && -kin.velocity.y > REST_SPEED {
                    kin.velocity.y = -kin.velocity.y * kin.bounciness;
                } else {
                    kin.velocity.y = 0.0;
                }
            }
        }

        // --- X pass -------------------------------------------------------
        for platform in &platforms {
            if platform.one_way {
                // One-way platforms never block horizontal movement.
                continue;
            }
            let aabb = Aabb::new(pos.0, size);
            if !aabb.overlaps(&platform.aabb) {
                continue;
            }

            let push_left = aabb.max.x - platform.aabb.min.x;
            let push_right = platform.aabb.max.x - aabb.min.x;
            let resolve_left = if kin.velocity.x > 0.0 {
                true
            } else if kin.velocity.x < 0.0 {
                false
            } else {
                push_left <= push_right
            };

            if resolve_left {
                pos.0.x = platform.aabb.min.x - size.x;
            } else {
                pos.0.x = platform.aabb.max.x;
            }
            if kin.bounciness > 0.0 && kin.velocity.x.abs() > REST_SPEED {
                kin.velocity.x = -kin.velocity.x * kin.bounciness;
            } else {
                kin.velocity.x = 0.0;
            }
        }

        // --- Ground contact ----------------------------------------------
        let aabb = Aabb::new(pos.0, size);
        let bottom = aabb.max.y;
        let supported = kin.velocity.y >= 0.0
            && platforms.iter().any(|platform| {
                aabb.overlaps_x(&platform.aabb)
                    && (bottom - platform.aabb.min.y).abs() <= SURFACE_EPS
            });

        contact.on_ground = supported;
        if supported && !was_on_ground {
            contact.just_landed = true;
            events.push(SimEvent::Landed(entity));
        } else if !supported && was_on_ground {
            contact.just_left_ground = true;
            events.push(SimEvent::LeftGround(entity));
        }
    }
}
