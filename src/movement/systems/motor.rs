//! Movement domain: demo kinematic motor driving the player controller.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    CapsuleDimensions, CharacterMotor, CharacterState, GameLayer, GroundingStatus, InputSnapshot,
    KinematicBody, PIXELS_PER_UNIT, Player, PlayerController, capsule_collider, to_world,
};

/// Inset applied to overlap queries so resting on the floor is not an overlap.
const OVERLAP_SKIN: f32 = 0.02;

/// Borrowed view of a body plus the physics world, handed to the controller as its motor.
pub(crate) struct MotorView<'a, 'w, 's> {
    pub(crate) body: &'a mut KinematicBody,
    pub(crate) spatial_query: &'a SpatialQuery<'w, 's>,
}

impl CharacterMotor for MotorView<'_, '_, '_> {
    fn grounding_status(&self) -> GroundingStatus {
        self.body.grounding
    }

    fn last_grounding_status(&self) -> GroundingStatus {
        self.body.last_grounding
    }

    fn character_up(&self) -> Vec3 {
        self.body.up
    }

    fn transient_position(&self) -> Vec3 {
        self.body.position
    }

    fn transient_rotation(&self) -> Quat {
        self.body.rotation
    }

    fn set_capsule_dimensions(&mut self, dimensions: CapsuleDimensions) {
        self.body.capsule = dimensions;
    }

    fn force_unground(&mut self) {
        self.body.unground_requested = true;
    }

    fn character_overlap(&mut self) -> usize {
        let filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);
        let capsule = self.body.capsule;
        let shape = capsule_collider(CapsuleDimensions {
            radius: capsule.radius - OVERLAP_SKIN,
            height: capsule.height - 2.0 * OVERLAP_SKIN,
            ..capsule
        });

        self.spatial_query
            .shape_intersections(&shape, to_world(self.body.capsule_center()), 0.0, &filter)
            .len()
    }

    fn set_position_and_rotation(&mut self, position: Vec3, rotation: Quat) {
        self.body.position = position;
        self.body.rotation = rotation;
        self.body.velocity = Vec3::ZERO;
    }
}

/// Run one controller frame for the player and move the body.
pub(crate) fn drive_player_controller(
    time: Res<Time>,
    inputs: Res<InputSnapshot>,
    spatial_query: SpatialQuery,
    mut query: Query<(&mut PlayerController, &mut KinematicBody, &mut Transform), With<Player>>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    for (mut controller, mut body, mut transform) in &mut query {
        let mut velocity = body.velocity;
        let mut rotation = body.rotation;
        {
            let mut motor = MotorView {
                body: &mut *body,
                spatial_query: &spatial_query,
            };
            controller.set_inputs(&inputs, &mut motor);
            controller.tick(&mut motor, &mut velocity, &mut rotation, dt);
        }
        body.velocity = velocity;
        body.rotation = rotation;

        integrate(&mut body, controller.state(), &spatial_query, dt);

        transform.translation = to_world(body.position).extend(transform.translation.z);
        let facing = (body.rotation * Vec3::Z).z;
        if facing.abs() > f32::EPSILON {
            transform.scale.x = facing.signum();
        }
    }
}

/// Move the body by its velocity, stopping short of walls.
fn integrate(
    body: &mut KinematicBody,
    state: CharacterState,
    spatial_query: &SpatialQuery,
    dt: f32,
) {
    let mut displacement = body.frame_displacement(state, dt);

    if displacement.z.abs() > f32::EPSILON {
        let direction = if displacement.z > 0.0 {
            Dir2::X
        } else {
            Dir2::NEG_X
        };
        let reach = body.capsule.radius + displacement.z.abs();
        let filter = SpatialQueryFilter::from_mask(GameLayer::Wall);

        if let Some(hit) = spatial_query.cast_ray(
            to_world(body.capsule_center()),
            direction,
            reach * PIXELS_PER_UNIT,
            true,
            &filter,
        ) {
            let allowed = (hit.distance / PIXELS_PER_UNIT - body.capsule.radius).max(0.0);
            displacement.z = allowed * displacement.z.signum();
            body.velocity.z = 0.0;
        }
    }

    body.position += displacement;
}
