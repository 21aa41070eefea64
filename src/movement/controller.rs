//! Movement domain: the player controller frame driver.
//!
//! The motor calls the frame hooks once per simulation tick in this order:
//!
//! 1. [`PlayerController::before_update`]
//! 2. [`PlayerController::update_rotation`]
//! 3. [`PlayerController::update_velocity`]
//! 4. [`PlayerController::post_grounding_update`]
//! 5. [`PlayerController::after_update`]
//!
//! [`PlayerController::tick`] runs the whole sequence. Inputs are set between
//! frames; animation callbacks and world events may arrive at any time outside
//! a hook.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::movement::debounce::{ActionKind, ActionRequest};
use crate::movement::events::{AnimationCue, AnimationTrigger, ControllerEvent, SoundCue};
use crate::movement::motor::CharacterMotor;
use crate::movement::resources::{ControllerTuning, InputSnapshot};
use crate::movement::solver::{fire_origin, interaction_target};
use crate::movement::state::CharacterState;

/// Where the motor currently is in the frame sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum FramePhase {
    #[default]
    Idle,
    BeforeUpdate,
    Rotation,
    Velocity,
    PostGrounding,
    AfterUpdate,
}

/// What a discrete overlap touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Hazard,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CrouchState {
    /// Authoritative physical state.
    pub is_crouching: bool,
    /// Latest held input.
    pub should_be_crouching: bool,
}

/// Mutable controller data shared by every state behavior.
pub(crate) struct ControllerContext {
    pub(crate) tuning: ControllerTuning,
    pub(crate) move_intent: Vec3,
    pub(crate) jump: ActionRequest,
    pub(crate) interact: ActionRequest,
    pub(crate) fire: ActionRequest,
    pub(crate) escape: ActionRequest,
    pub(crate) time_since_last_able_to_jump: f32,
    pub(crate) internal_velocity_add: Vec3,
    pub(crate) crouch: CrouchState,
    pub(crate) idle_time: f32,
    pub(crate) hit_front: bool,
    pub(crate) interaction_position: Vec3,
    pub(crate) fire_position: Vec3,
    rng: ChaCha8Rng,
    events: Vec<ControllerEvent>,
}

impl ControllerContext {
    fn new(tuning: ControllerTuning) -> Self {
        Self {
            jump: ActionRequest::new(tuning.jump_pre_grounding_grace_time),
            interact: ActionRequest::new(tuning.interact_grace_time),
            fire: ActionRequest::new(tuning.fire_grace_time),
            escape: ActionRequest::new(tuning.escape_grace_time),
            rng: ChaCha8Rng::seed_from_u64(tuning.bored_seed),
            move_intent: Vec3::ZERO,
            time_since_last_able_to_jump: 0.0,
            internal_velocity_add: Vec3::ZERO,
            crouch: CrouchState::default(),
            idle_time: 0.0,
            hit_front: true,
            interaction_position: Vec3::ZERO,
            fire_position: Vec3::ZERO,
            events: Vec::new(),
            tuning,
        }
    }

    pub(crate) fn emit(&mut self, event: ControllerEvent) {
        self.events.push(event);
    }

    pub(crate) fn animate(&mut self, cue: AnimationCue) {
        self.events.push(ControllerEvent::Animation(cue));
    }

    pub(crate) fn channel_mut(&mut self, action: ActionKind) -> &mut ActionRequest {
        match action {
            ActionKind::Jump => &mut self.jump,
            ActionKind::Interact => &mut self.interact,
            ActionKind::Fire => &mut self.fire,
            ActionKind::Escape => &mut self.escape,
        }
    }

    /// Accumulate standing-still time and play a bored animation once it runs long.
    pub(crate) fn update_idle(&mut self, dt: f32) {
        if self.move_intent.z.abs() < self.tuning.idle_input_threshold {
            self.idle_time += dt;
        } else {
            self.idle_time = 0.0;
        }

        if self.idle_time > self.tuning.bored_time {
            self.idle_time = 0.0;
            let trigger = if self.rng.random::<f32>() < 0.5 {
                AnimationTrigger::Bored2
            } else {
                AnimationTrigger::Bored3
            };
            self.emit(ControllerEvent::trigger(trigger));
        }
    }

    /// Stand up if crouch was released and nothing blocks the standing capsule.
    pub(crate) fn resolve_uncrouch(&mut self, motor: &mut dyn CharacterMotor) {
        if !self.crouch.is_crouching || self.crouch.should_be_crouching {
            return;
        }

        motor.set_capsule_dimensions(self.tuning.standing_capsule);
        let overlaps = motor.character_overlap();
        if overlaps > 0 {
            motor.set_capsule_dimensions(self.tuning.crouching_capsule);
            debug!("Uncrouch blocked by {} overlapping colliders", overlaps);
        } else {
            self.crouch.is_crouching = false;
        }
    }
}

/// Serializable view of the controller for debug dumps.
#[derive(Debug, Clone, Serialize)]
pub struct ControllerSnapshot {
    pub state: CharacterState,
    pub move_intent: [f32; 3],
    pub crouch: CrouchState,
    pub jump_requested: bool,
    pub jump_consumed: bool,
    pub time_since_last_able_to_jump: f32,
    pub idle_time: f32,
    pub hit_front: bool,
}

/// Movement and state-resolution core of the playable character.
#[derive(Component)]
pub struct PlayerController {
    state: CharacterState,
    phase: FramePhase,
    active: bool,
    ctx: ControllerContext,
}

impl PlayerController {
    pub fn new(tuning: ControllerTuning) -> Self {
        let mut controller = Self {
            state: CharacterState::Default,
            phase: FramePhase::Idle,
            active: true,
            ctx: ControllerContext::new(tuning),
        };
        controller.transition_to(CharacterState::Default);
        controller
    }

    pub fn state(&self) -> CharacterState {
        self.state
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    pub fn tuning(&self) -> &ControllerTuning {
        &self.ctx.tuning
    }

    pub fn move_intent(&self) -> Vec3 {
        self.ctx.move_intent
    }

    pub fn crouch(&self) -> CrouchState {
        self.ctx.crouch
    }

    pub fn action(&self, action: ActionKind) -> &ActionRequest {
        match action {
            ActionKind::Jump => &self.ctx.jump,
            ActionKind::Interact => &self.ctx.interact,
            ActionKind::Fire => &self.ctx.fire,
            ActionKind::Escape => &self.ctx.escape,
        }
    }

    pub fn jumped_this_frame(&self) -> bool {
        self.ctx.jump.fired_this_frame()
    }

    pub fn time_since_last_able_to_jump(&self) -> f32 {
        self.ctx.time_since_last_able_to_jump
    }

    pub fn idle_time(&self) -> f32 {
        self.ctx.idle_time
    }

    pub fn hit_front(&self) -> bool {
        self.ctx.hit_front
    }

    pub fn interaction_position(&self) -> Vec3 {
        self.ctx.interaction_position
    }

    pub fn fire_position(&self) -> Vec3 {
        self.ctx.fire_position
    }

    /// Pending notifications, oldest first.
    pub fn events(&self) -> &[ControllerEvent] {
        &self.ctx.events
    }

    pub fn drain_events(&mut self) -> Vec<ControllerEvent> {
        std::mem::take(&mut self.ctx.events)
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            state: self.state,
            move_intent: self.ctx.move_intent.to_array(),
            crouch: self.ctx.crouch,
            jump_requested: self.ctx.jump.is_requested(),
            jump_consumed: self.ctx.jump.is_consumed(),
            time_since_last_able_to_jump: self.ctx.time_since_last_able_to_jump,
            idle_time: self.ctx.idle_time,
            hit_front: self.ctx.hit_front,
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start listening to world events (death, warp, block bumps).
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Stop listening to world events.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Run the exit hook of the current state, then the enter hook of `new_state`.
    pub fn transition_to(&mut self, new_state: CharacterState) {
        let from = self.state;
        from.behavior().on_exit(&mut self.ctx, new_state);
        self.state = new_state;
        new_state.behavior().on_enter(&mut self.ctx, from);
        debug!("Character state {:?} -> {:?}", from, new_state);
    }

    pub fn set_inputs(&mut self, inputs: &InputSnapshot, motor: &mut dyn CharacterMotor) {
        self.state
            .behavior()
            .set_inputs(&mut self.ctx, inputs, motor);
    }

    // -------------------------------------------------------------------------
    // Frame hooks
    // -------------------------------------------------------------------------

    fn enter_phase(&mut self, next: FramePhase) {
        debug_assert!(
            next == FramePhase::BeforeUpdate || next > self.phase,
            "frame hook {:?} called after {:?}",
            next,
            self.phase
        );
        self.phase = next;
    }

    pub fn before_update(&mut self, _dt: f32) {
        self.enter_phase(FramePhase::BeforeUpdate);
    }

    pub fn update_rotation(&mut self, rotation: &mut Quat, motor: &dyn CharacterMotor, _dt: f32) {
        self.enter_phase(FramePhase::Rotation);
        self.state
            .behavior()
            .update_rotation(&mut self.ctx, rotation, motor);
    }

    pub fn update_velocity(&mut self, velocity: &mut Vec3, motor: &mut dyn CharacterMotor, dt: f32) {
        self.enter_phase(FramePhase::Velocity);
        self.state
            .behavior()
            .update_velocity(&mut self.ctx, velocity, motor, dt);
    }

    /// Detect landing and leaving stable ground.
    pub fn post_grounding_update(&mut self, motor: &dyn CharacterMotor, _dt: f32) {
        self.enter_phase(FramePhase::PostGrounding);

        let grounded = motor.grounding_status().is_stable_on_ground;
        let was_grounded = motor.last_grounding_status().is_stable_on_ground;
        if grounded && !was_grounded {
            debug!("Landed");
            self.ctx.emit(ControllerEvent::Landed);
        } else if !grounded && was_grounded {
            debug!("Left stable ground");
            self.ctx.emit(ControllerEvent::LeftStableGround);
        }
    }

    pub fn after_update(&mut self, motor: &mut dyn CharacterMotor, dt: f32) {
        self.enter_phase(FramePhase::AfterUpdate);
        self.state.behavior().after_update(&mut self.ctx, motor, dt);
    }

    /// Run one full frame in hook order.
    pub fn tick(
        &mut self,
        motor: &mut dyn CharacterMotor,
        velocity: &mut Vec3,
        rotation: &mut Quat,
        dt: f32,
    ) {
        self.before_update(dt);
        self.update_rotation(rotation, motor, dt);
        self.update_velocity(velocity, motor, dt);
        self.post_grounding_update(motor, dt);
        self.after_update(motor, dt);
    }

    /// Discrete overlap reported by the motor. Returns true if it killed the character.
    pub fn on_discrete_collision(&mut self, contact: ContactKind) -> bool {
        if contact != ContactKind::Hazard || self.state.is_dying_or_reviving() {
            return false;
        }
        info!("Player killed by hazard contact");
        self.transition_to(CharacterState::Dying);
        true
    }

    /// Queue an impulse applied once on the next velocity update.
    pub fn add_velocity(&mut self, velocity: Vec3) {
        self.state.behavior().add_velocity(&mut self.ctx, velocity);
    }

    // -------------------------------------------------------------------------
    // Animation callbacks
    // -------------------------------------------------------------------------

    pub fn normal_interaction(&mut self) {
        self.state
            .behavior()
            .resolve_action(&mut self.ctx, ActionKind::Interact);
    }

    pub fn crouch_interaction(&mut self) {
        self.normal_interaction();
    }

    pub fn normal_fire(&mut self) {
        self.state
            .behavior()
            .resolve_action(&mut self.ctx, ActionKind::Fire);
    }

    pub fn crouch_fire(&mut self) {
        self.normal_fire();
    }

    /// Escape animation finished: settle the escape channel and pause.
    pub fn escape_sequence(&mut self) {
        self.ctx.escape.resolve();
        info!("Pausing");
        self.transition_to(CharacterState::Pause);
    }

    /// Capture the grid cell the interaction will hit.
    pub fn set_interaction_position(&mut self, motor: &dyn CharacterMotor) -> Vec3 {
        let forward = motor.transient_rotation() * Vec3::Z;
        self.ctx.interaction_position = interaction_target(
            motor.transient_position(),
            forward,
            self.ctx.crouch.is_crouching,
        );
        self.ctx.interaction_position
    }

    pub fn set_fire_position(&mut self, motor: &dyn CharacterMotor) -> Vec3 {
        let forward = motor.transient_rotation() * Vec3::Z;
        self.ctx.fire_position = fire_origin(motor.transient_position(), forward);
        self.ctx.fire_position
    }

    pub fn death_start(&mut self) {
        self.ctx.emit(ControllerEvent::Sound(SoundCue::Die));
    }

    /// Death animation finished: return to the checkpoint and revive.
    pub fn death_complete(
        &mut self,
        motor: &mut dyn CharacterMotor,
        checkpoint: Option<(Vec3, Quat)>,
    ) {
        if let Some((position, rotation)) = checkpoint {
            motor.set_position_and_rotation(position, rotation);
        }
        info!("Reviving at {:?}", checkpoint.map(|(position, _)| position));
        self.transition_to(CharacterState::Revive);
    }

    pub fn revive_complete(&mut self) {
        self.transition_to(CharacterState::Default);
    }

    pub fn play_move_sound(&mut self) {
        self.ctx.emit(ControllerEvent::Sound(SoundCue::Move));
    }

    pub fn on_landed(&mut self) {
        self.ctx.emit(ControllerEvent::Sound(SoundCue::Land));
    }

    pub fn on_interacted(&mut self) {
        self.ctx.emit(ControllerEvent::Sound(SoundCue::Interact));
    }

    pub fn on_fired(&mut self) {
        self.ctx.emit(ControllerEvent::Sound(SoundCue::Fire));
    }

    // -------------------------------------------------------------------------
    // World events
    // -------------------------------------------------------------------------

    /// The level killed the character with a hit at `hit_point`.
    pub fn on_character_death(&mut self, hit_point: Vec3, character_position: Vec3) {
        if !self.active || self.state == CharacterState::Dying {
            return;
        }

        // Any Z offset at all counts as a frontal hit
        self.ctx.hit_front = (hit_point.z - character_position.z).abs() > 0.0;
        info!(
            "Player killed: hit_front={}, hit={:?}, position={:?}",
            self.ctx.hit_front, hit_point, character_position
        );

        self.ctx.emit(ControllerEvent::LivesChanged(-1));
        self.ctx.emit(ControllerEvent::LevelReset);
        self.transition_to(CharacterState::Dying);
    }

    pub fn on_warp_player(&mut self, motor: &mut dyn CharacterMotor, position: Vec3, rotation: Quat) {
        if !self.active {
            return;
        }
        motor.set_position_and_rotation(position, rotation);
    }

    pub fn on_block_bump(&mut self, cracked: bool) {
        if !self.active {
            return;
        }
        let cue = if cracked {
            SoundCue::Break
        } else {
            SoundCue::Bump
        };
        self.ctx.emit(ControllerEvent::Sound(cue));
    }
}
