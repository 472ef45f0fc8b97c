use glam::Vec2;
use hecs::World;

use crate::components::{EdgeSense, GroundContact, Hitbox, Platform, Position};

use super::{Aabb, EdgeSide, SimEvent};

/// How far below foot level the probes reach. Short on purpose: the probe
/// should miss a platform one tile down.
const PROBE_DEPTH: f32 = 2.0;

/// Vertical tolerance when matching an entity to the platform it stands on.
const SUPPORT_EPS: f32 = 1.0;

/// Update edge proximity for grounded entities by sampling two probe points
/// just beyond the left and right hitbox edges at foot level. A side with no
/// supporting geometry under its probe is flagged, and `distance` records how
/// far the hitbox edge is from the supporting platform's edge.
///
/// Events fire on flag transitions only.
pub(crate) fn sense_edges(world: &mut World, events: &mut Vec<SimEvent>) {
    let platforms: Vec<Aabb> = world
        .query_mut::<(&Position, &Hitbox, &Platform)>()
        .into_iter()
        .map(|(_entity, (pos, hitbox, _platform))| Aabb::new(pos.0, hitbox.size))
        .collect();

    for (entity, (pos, hitbox, contact, edge)) in
        world.query_mut::<(&Position, &Hitbox, &GroundContact, &mut EdgeSense)>()
    {
        let was_left = edge.near_left;
        let was_right = edge.near_right;

        if contact.on_ground {
            let aabb = Aabb::new(pos.0, hitbox.size);
            let foot_y = aabb.max.y + PROBE_DEPTH;
            let left_probe = Vec2::new(aabb.min.x - edge.threshold, foot_y);
            let right_probe = Vec2::new(aabb.max.x + edge.threshold, foot_y);

            edge.near_left = !platforms.iter().any(|p| p.contains(left_probe));
            edge.near_right = !platforms.iter().any(|p| p.contains(right_probe));

            edge.distance = f32::MAX;
            if edge.near_left || edge.near_right {
                // Distance from the exposed hitbox edge to the matching edge
                // of whichever platform is holding the entity up.
                for p in &platforms {
                    let standing_on = (aabb.max.y - p.min.y).abs() <= SUPPORT_EPS
                        && aabb.min.x < p.max.x
                        && aabb.max.x > p.min.x;
                    if !standing_on {
                        continue;
                    }
                    if edge.near_left {
                        edge.distance = edge.distance.min((aabb.min.x - p.min.x).max(0.0));
                    }
                    if edge.near_right {
                        edge.distance = edge.distance.min((p.max.x - aabb.max.x).max(0.0));
                    }
                }
            }
        } else {
            edge.near_left = false;
            edge.near_right = false;
            edge.distance = f32::MAX;
        }

        for (was, now, side) in [
            (was_left, edge.near_left, EdgeSide::Left),
            (was_right, edge.near_right, EdgeSide::Right),
        ] {
            if !was && now {
                events.push(SimEvent::EdgeApproached { entity, side });
            } else if was && !now {
                events.push(SimEvent::EdgeCleared { entity, side });
            }
        }
    }
}
