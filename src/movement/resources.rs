//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::motor::CapsuleDimensions;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerTuning {
    // Stable movement
    pub max_stable_move_speed: f32,
    pub stable_movement_sharpness: f32,
    pub max_crouch_move_speed: f32,

    // Air movement
    pub max_air_move_speed: f32,
    pub air_acceleration_speed: f32,
    pub drag: f32,

    // Jumping
    pub jump_up_speed: f32,
    pub jump_scalable_forward_speed: f32,
    /// Longest a jump request may wait for ground. Negative keeps a request alive for one frame.
    pub jump_pre_grounding_grace_time: f32,
    /// How long after leaving stable ground a jump is still allowed.
    pub jump_post_grounding_grace_time: f32,

    // Action channels
    pub interact_grace_time: f32,
    pub fire_grace_time: f32,
    pub escape_grace_time: f32,

    // Idle animations
    pub bored_time: f32,
    /// Forward input below this counts as standing still.
    pub idle_input_threshold: f32,
    pub bored_seed: u64,

    pub gravity: [f32; 3],

    pub standing_capsule: CapsuleDimensions,
    pub crouching_capsule: CapsuleDimensions,
}

impl Default for ControllerTuning {
    fn default() -> Self {
        Self {
            max_stable_move_speed: 3.0,
            stable_movement_sharpness: 15.0,
            max_crouch_move_speed: 2.0,
            max_air_move_speed: 2.5,
            air_acceleration_speed: 75.0,
            drag: 0.33,
            jump_up_speed: 7.33,
            jump_scalable_forward_speed: 1.0,
            jump_pre_grounding_grace_time: -0.1,
            jump_post_grounding_grace_time: -0.1,
            interact_grace_time: 0.1,
            fire_grace_time: 0.1,
            escape_grace_time: 0.1,
            bored_time: 5.0,
            idle_input_threshold: 0.1,
            bored_seed: 0x5eed,
            gravity: [0.0, -12.5, 0.0],
            standing_capsule: CapsuleDimensions::STANDING,
            crouching_capsule: CapsuleDimensions::CROUCHING,
        }
    }
}

impl ControllerTuning {
    pub fn gravity(&self) -> Vec3 {
        Vec3::from_array(self.gravity)
    }

    /// Apex height of a jump from flat ground: h = v² / (2g)
    pub fn jump_height(&self) -> f32 {
        let gravity = self.gravity().length();
        if gravity <= f32::EPSILON {
            return f32::INFINITY;
        }
        self.jump_up_speed * self.jump_up_speed / (2.0 * gravity)
    }
}

/// Raw action signals for one frame. Edge flags are only true on the frame the edge occurred.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    pub move_axis_forward: f32,
    pub jump_down: bool,
    pub crouch_down: bool,
    pub crouch_up: bool,
    pub interact_down: bool,
    pub escape_down: bool,
    pub fire_down: bool,
}
