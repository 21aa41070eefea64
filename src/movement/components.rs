//! Movement domain: components and physics layers for the player body.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::motor::{CapsuleDimensions, GroundingStatus};
use crate::movement::state::CharacterState;

/// World pixels per controller unit.
pub const PIXELS_PER_UNIT: f32 = 48.0;

/// Ground distance, in controller units, covered between footstep sounds.
pub const STRIDE_LENGTH: f32 = 0.8;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms, ramps)
    Ground,
    /// Wall surfaces
    Wall,
    /// Anything that kills the player on contact
    Hazard,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Marker for colliders that kill the player
#[derive(Component, Debug)]
pub struct Hazard;

/// Respawn point used after the death animation
#[derive(Component, Debug)]
pub struct Checkpoint;

/// Marker for the player's visual, a child of the player entity
#[derive(Component, Debug)]
pub struct PlayerBody;

/// Kinematic body state the demo motor keeps for the controller.
///
/// Positions and velocities are in controller space: X is always zero, Y is up
/// and Z runs along the screen's horizontal axis.
#[derive(Component, Debug, Clone)]
pub struct KinematicBody {
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub up: Vec3,
    pub grounding: GroundingStatus,
    pub last_grounding: GroundingStatus,
    pub capsule: CapsuleDimensions,
    /// Skip ground probing on the next update.
    pub unground_requested: bool,
    /// Max slope, in radians, that still counts as stable ground.
    pub max_stable_slope: f32,
    /// How far below the feet ground is still detected.
    pub ground_probe_distance: f32,
}

impl KinematicBody {
    pub fn new(position: Vec3, capsule: CapsuleDimensions) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            up: Vec3::Y,
            grounding: GroundingStatus::airborne(),
            last_grounding: GroundingStatus::airborne(),
            capsule,
            unground_requested: false,
            max_stable_slope: 60f32.to_radians(),
            ground_probe_distance: 0.1,
        }
    }

    /// Capsule center in controller space.
    pub fn capsule_center(&self) -> Vec3 {
        self.position + self.up * self.capsule.y_offset
    }

    /// Unblocked displacement for one frame; none while the state freezes the body.
    pub fn frame_displacement(&self, state: CharacterState, dt: f32) -> Vec3 {
        if state.freezes_body() {
            Vec3::ZERO
        } else {
            self.velocity * dt
        }
    }
}

/// Controller space to world pixels.
pub fn to_world(v: Vec3) -> Vec2 {
    Vec2::new(v.z, v.y) * PIXELS_PER_UNIT
}

/// World pixels to controller space.
pub fn to_controller(v: Vec2) -> Vec3 {
    let v = v / PIXELS_PER_UNIT;
    Vec3::new(0.0, v.y, v.x)
}

/// Collider matching a controller capsule, in world pixels.
pub fn capsule_collider(capsule: CapsuleDimensions) -> Collider {
    let segment = (capsule.height - 2.0 * capsule.radius).max(0.0);
    Collider::capsule(
        capsule.radius * PIXELS_PER_UNIT,
        segment * PIXELS_PER_UNIT,
    )
}

/// Animation-driven callbacks the controller expects to hear back about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationCallback {
    SetInteractionPosition,
    Interaction,
    Interacted,
    SetFirePosition,
    Fire,
    Fired,
    DeathStart,
    DeathComplete,
    ReviveComplete,
    EscapeSequence,
}

/// Deferred callbacks counted down in frame time, standing in for an animator.
#[derive(Component, Debug, Default)]
pub struct AnimationCallbacks {
    pending: Vec<(f32, AnimationCallback)>,
    /// Distance walked since the last footstep.
    stride: f32,
}

impl AnimationCallbacks {
    pub fn schedule(&mut self, delay: f32, callback: AnimationCallback) {
        self.pending.push((delay, callback));
    }

    pub fn is_pending(&self, callback: AnimationCallback) -> bool {
        self.pending.iter().any(|(_, pending)| *pending == callback)
    }

    /// Accumulate walked distance; true once per completed stride.
    pub fn advance_stride(&mut self, distance: f32) -> bool {
        self.stride += distance.abs();
        if self.stride >= STRIDE_LENGTH {
            self.stride -= STRIDE_LENGTH;
            true
        } else {
            false
        }
    }

    pub fn reset_stride(&mut self) {
        self.stride = 0.0;
    }

    /// Advance all timers and return the callbacks that came due, in schedule order.
    pub fn tick(&mut self, dt: f32) -> Vec<AnimationCallback> {
        let mut due = Vec::new();
        self.pending.retain_mut(|(remaining, callback)| {
            *remaining -= dt;
            if *remaining <= 0.0 {
                due.push(*callback);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
