//! Movement domain: velocity solver for grounded, airborne, and jump motion.
//!
//! Everything here is a pure function of its inputs so the controller can call
//! it from whichever state is active.

use bevy::math::{Mat3, Quat, Vec3};

use crate::movement::motor::GroundingStatus;
use crate::movement::resources::ControllerTuning;

/// Projectile spawn offset from the character origin.
const FIRE_HEIGHT: f32 = 0.5;
const FIRE_REACH: f32 = 0.66;

/// Everything the solver reads for one frame.
#[derive(Debug, Clone, Copy)]
pub struct SolverFrame<'a> {
    pub grounding: &'a GroundingStatus,
    pub up: Vec3,
    pub position: Vec3,
    pub move_intent: Vec3,
    pub crouching: bool,
    pub dt: f32,
}

pub fn project_on_plane(vector: Vec3, plane_normal: Vec3) -> Vec3 {
    let sqr = plane_normal.length_squared();
    if sqr < f32::EPSILON {
        return vector;
    }
    vector - plane_normal * (vector.dot(plane_normal) / sqr)
}

pub fn project(vector: Vec3, on_normal: Vec3) -> Vec3 {
    let sqr = on_normal.length_squared();
    if sqr < f32::EPSILON {
        return Vec3::ZERO;
    }
    on_normal * (vector.dot(on_normal) / sqr)
}

/// Rotation mapping local +Z onto `forward` with `up` as the vertical hint.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    let forward = forward.try_normalize()?;
    let right = up.cross(forward).try_normalize()?;
    let up = forward.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, forward)))
}

/// Direction of `direction` re-expressed inside the surface plane, unit length.
pub fn direction_tangent_to_surface(direction: Vec3, surface_normal: Vec3, up: Vec3) -> Vec3 {
    let direction_right = direction.cross(up);
    surface_normal.cross(direction_right).normalize_or_zero()
}

/// Turn the forward axis into a camera-relative move intent of length <= 1.
///
/// The camera is static and looks down world +Z, so the planar camera rotation
/// only matters when the character's up axis is tilted.
pub fn move_intent_from_axis(axis: f32, up: Vec3) -> Vec3 {
    let input = Vec3::new(0.0, 0.0, axis).clamp_length_max(1.0);

    let mut camera_planar_direction = project_on_plane(Vec3::Z, up).normalize_or_zero();
    if camera_planar_direction.length_squared() < 0.001 {
        camera_planar_direction = project_on_plane(Vec3::Y, up).normalize_or_zero();
    }

    match look_rotation(camera_planar_direction, up) {
        Some(camera_planar_rotation) => camera_planar_rotation * input,
        None => input,
    }
}

/// Pick the ground normal to move along.
///
/// When snapping was prevented at a ledge, the motor reports both sides of the
/// edge; keep the one on the side we are coming from.
pub fn effective_ground_normal(velocity: Vec3, grounding: &GroundingStatus, position: Vec3) -> Vec3 {
    if velocity.length() > 0.0 && grounding.snapping_prevented {
        let ground_point_to_character = position - grounding.ground_point;
        if velocity.dot(ground_point_to_character) >= 0.0 {
            grounding.outer_ground_normal
        } else {
            grounding.inner_ground_normal
        }
    } else {
        grounding.ground_normal
    }
}

pub fn grounded_velocity(velocity: Vec3, frame: &SolverFrame, tuning: &ControllerTuning) -> Vec3 {
    let speed = velocity.length();
    let ground_normal = effective_ground_normal(velocity, frame.grounding, frame.position);

    // Reorient on the slope, keeping speed
    let velocity = direction_tangent_to_surface(velocity, ground_normal, frame.up) * speed;

    let input_right = frame.move_intent.cross(frame.up);
    let reoriented_input =
        ground_normal.cross(input_right).normalize_or_zero() * frame.move_intent.length();
    let max_speed = if frame.crouching {
        tuning.max_crouch_move_speed
    } else {
        tuning.max_stable_move_speed
    };
    let target_velocity = reoriented_input * max_speed;

    let blend = 1.0 - (-tuning.stable_movement_sharpness * frame.dt).exp();
    velocity.lerp(target_velocity, blend)
}

pub fn air_velocity(velocity: Vec3, frame: &SolverFrame, tuning: &ControllerTuning) -> Vec3 {
    let mut velocity = velocity;

    if frame.move_intent.length_squared() > 0.0 {
        let mut added_velocity = frame.move_intent * (tuning.air_acceleration_speed * frame.dt);
        let planar_velocity = project_on_plane(velocity, frame.up);

        if planar_velocity.length() < tuning.max_air_move_speed {
            let new_total =
                (planar_velocity + added_velocity).clamp_length_max(tuning.max_air_move_speed);
            added_velocity = new_total - planar_velocity;
        } else if planar_velocity.dot(added_velocity) > 0.0 {
            // Already over the cap: input may steer but not add speed
            added_velocity = project_on_plane(added_velocity, planar_velocity.normalize_or_zero());
        }

        // No air-climbing of steep slopes
        if frame.grounding.found_any_ground && (velocity + added_velocity).dot(added_velocity) > 0.0
        {
            let perpendicular_obstruction_normal = frame
                .up
                .cross(frame.grounding.ground_normal)
                .cross(frame.up)
                .normalize_or_zero();
            added_velocity = project_on_plane(added_velocity, perpendicular_obstruction_normal);
        }

        velocity += added_velocity;
    }

    velocity += tuning.gravity() * frame.dt;
    velocity *= 1.0 / (1.0 + tuning.drag * frame.dt);
    velocity
}

/// Jump along the character up axis unless standing on unstable ground, which
/// launches along that ground's normal.
pub fn jump_direction(grounding: &GroundingStatus, up: Vec3) -> Vec3 {
    if grounding.found_any_ground && !grounding.is_stable_on_ground {
        grounding.ground_normal
    } else {
        up
    }
}

/// Replace the vertical component of `velocity` with the jump impulse.
pub fn jump_velocity(
    velocity: Vec3,
    direction: Vec3,
    up: Vec3,
    move_intent: Vec3,
    tuning: &ControllerTuning,
) -> Vec3 {
    let mut velocity = velocity;
    velocity += direction * tuning.jump_up_speed - project(velocity, up);
    velocity += move_intent * tuning.jump_scalable_forward_speed;
    velocity
}

/// Side-scrolling constraint: no motion along the X axis.
pub fn constrain_to_plane(velocity: Vec3) -> Vec3 {
    Vec3::new(0.0, velocity.y, velocity.z)
}

/// Grid cell targeted by an interaction: the next even Z cell ahead, and the odd
/// Y cell above (or below, while crouching).
pub fn interaction_target(position: Vec3, forward: Vec3, crouching: bool) -> Vec3 {
    let z = if forward.z > 0.0 {
        let z = (position.z + 1.0).ceil() as i32;
        if z % 2 != 0 { z + 1 } else { z }
    } else {
        let z = (position.z - 1.0).floor() as i32;
        if z % 2 != 0 { z - 1 } else { z }
    };

    let y = if crouching {
        (position.y - 1.0).ceil() as i32
    } else {
        (position.y + 1.0).ceil() as i32
    };
    let y = if y % 2 == 0 { y - 1 } else { y };

    Vec3::new(0.0, y as f32, z as f32)
}

/// Spawn point for a projectile, slightly in front of the character.
pub fn fire_origin(position: Vec3, forward: Vec3) -> Vec3 {
    Vec3::new(
        0.0,
        position.y + FIRE_HEIGHT,
        position.z + FIRE_REACH * forward.z,
    )
}
