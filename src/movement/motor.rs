//! Movement domain: the motor seam the controller drives.
//!
//! The motor owns collision resolution and ground probing. The controller only
//! reads what it reports and asks it for a handful of side effects.

use bevy::math::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Per-frame ground contact report produced by the motor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroundingStatus {
    pub found_any_ground: bool,
    pub is_stable_on_ground: bool,
    pub snapping_prevented: bool,
    pub ground_normal: Vec3,
    pub inner_ground_normal: Vec3,
    pub outer_ground_normal: Vec3,
    pub ground_point: Vec3,
}

impl GroundingStatus {
    /// Standing on walkable ground with a single uniform normal.
    pub fn stable(normal: Vec3, point: Vec3) -> Self {
        Self {
            found_any_ground: true,
            is_stable_on_ground: true,
            snapping_prevented: false,
            ground_normal: normal,
            inner_ground_normal: normal,
            outer_ground_normal: normal,
            ground_point: point,
        }
    }

    /// Touching ground that is too steep to stand on.
    pub fn unstable(normal: Vec3, point: Vec3) -> Self {
        Self {
            is_stable_on_ground: false,
            ..Self::stable(normal, point)
        }
    }

    pub fn airborne() -> Self {
        Self::default()
    }
}

/// Capsule shape requested from the motor, in character space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapsuleDimensions {
    pub radius: f32,
    pub height: f32,
    /// Offset of the capsule center above the character origin.
    pub y_offset: f32,
}

impl CapsuleDimensions {
    pub const STANDING: Self = Self {
        radius: 0.25,
        height: 1.7,
        y_offset: 0.85,
    };

    pub const CROUCHING: Self = Self {
        radius: 0.25,
        height: 0.85,
        y_offset: 0.425,
    };
}

/// Operations the controller needs from the kinematic motor it is attached to.
pub trait CharacterMotor {
    fn grounding_status(&self) -> GroundingStatus;

    /// Grounding report from the previous frame.
    fn last_grounding_status(&self) -> GroundingStatus;

    fn character_up(&self) -> Vec3;

    fn transient_position(&self) -> Vec3;

    fn transient_rotation(&self) -> Quat;

    fn set_capsule_dimensions(&mut self, dimensions: CapsuleDimensions);

    /// Skip ground probing and snapping on the next update.
    fn force_unground(&mut self);

    /// Count colliders overlapping the current capsule at the transient pose.
    fn character_overlap(&mut self) -> usize;

    fn set_position_and_rotation(&mut self, position: Vec3, rotation: Quat);
}
