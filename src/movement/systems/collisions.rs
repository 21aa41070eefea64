//! Movement domain: ground probing, hazard contacts, and fall-out detection.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::{
    CharacterDeathEvent, ContactKind, GameLayer, GroundingStatus, Hazard, KinematicBody,
    PIXELS_PER_UNIT, Player, PlayerController, capsule_collider, to_world,
};

/// Anything below this height (controller units) has fallen out of the level.
const KILL_PLANE_Y: f32 = -12.0;

pub(crate) fn probe_ground(
    spatial_query: SpatialQuery,
    mut query: Query<(&mut KinematicBody, &PlayerController), With<Player>>,
) {
    // Filter to only hit Ground layer entities
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (mut body, controller) in &mut query {
        body.last_grounding = body.grounding;

        // A frozen body keeps its grounding, so resuming reports no landing
        if controller.state().freezes_body() {
            continue;
        }

        if body.unground_requested {
            body.unground_requested = false;
            body.grounding = GroundingStatus::airborne();
            continue;
        }

        // Cast from the capsule center down past the feet
        let center = body.capsule_center();
        let reach = body.capsule.y_offset + body.ground_probe_distance;
        let hit = spatial_query.cast_ray(
            to_world(center),
            Dir2::NEG_Y,
            reach * PIXELS_PER_UNIT,
            true,
            &ground_filter,
        );

        let Some(hit) = hit else {
            body.grounding = GroundingStatus::airborne();
            continue;
        };

        let normal = Vec3::new(0.0, hit.normal.y, hit.normal.x).normalize_or_zero();
        let point = center - body.up * (hit.distance / PIXELS_PER_UNIT);
        let stable = normal.angle_between(body.up) <= body.max_stable_slope;

        body.grounding = if stable {
            GroundingStatus::stable(normal, point)
        } else {
            GroundingStatus::unstable(normal, point)
        };

        // Snap onto walkable ground unless moving away from it
        if stable && body.velocity.dot(body.up) <= 0.0 {
            body.position = point;
        }
    }
}

/// Overlap the player capsule against hazards and report discrete contacts.
pub(crate) fn detect_hazard_contacts(
    spatial_query: SpatialQuery,
    hazards: Query<(), With<Hazard>>,
    mut query: Query<(&mut PlayerController, &KinematicBody), With<Player>>,
) {
    let hazard_filter = SpatialQueryFilter::from_mask(GameLayer::Hazard);

    for (mut controller, body) in &mut query {
        if controller.state().freezes_body() {
            continue;
        }

        let shape = capsule_collider(body.capsule);
        let hits = spatial_query.shape_intersections(
            &shape,
            to_world(body.capsule_center()),
            0.0,
            &hazard_filter,
        );

        for entity in hits {
            let contact = if hazards.contains(entity) {
                ContactKind::Hazard
            } else {
                ContactKind::Other
            };
            if controller.on_discrete_collision(contact) {
                debug!("Hazard contact with {:?}", entity);
            }
        }
    }
}

/// Falling out of the level kills the player like any other level death.
pub(crate) fn detect_fall_out(
    query: Query<(&PlayerController, &KinematicBody), With<Player>>,
    mut deaths: MessageWriter<CharacterDeathEvent>,
) {
    for (controller, body) in &query {
        if body.position.y < KILL_PLANE_Y && !controller.state().is_dying_or_reviving() {
            deaths.write(CharacterDeathEvent {
                hit_point: body.position,
            });
        }
    }
}
