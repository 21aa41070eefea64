//! Movement domain: character states and the per-state behavior they dispatch to.
//!
//! Each state is a stateless behavior object. All mutable data lives in the
//! controller context the behaviors are handed.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::controller::ControllerContext;
use crate::movement::debounce::ActionKind;
use crate::movement::events::{AnimationCue, AnimationTrigger, ControllerEvent, UiChange};
use crate::movement::motor::CharacterMotor;
use crate::movement::resources::InputSnapshot;
use crate::movement::solver::{
    SolverFrame, air_velocity, constrain_to_plane, grounded_velocity, jump_direction,
    jump_velocity, look_rotation, move_intent_from_axis,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CharacterState {
    #[default]
    Default,
    Dying,
    Revive,
    Pause,
}

impl CharacterState {
    pub(crate) fn behavior(self) -> &'static dyn StateBehavior {
        match self {
            CharacterState::Default => &DefaultState,
            CharacterState::Dying => &DyingState,
            CharacterState::Revive => &ReviveState,
            CharacterState::Pause => &PauseState,
        }
    }

    /// States in which hazards can no longer kill the character.
    pub fn is_dying_or_reviving(self) -> bool {
        matches!(self, CharacterState::Dying | CharacterState::Revive)
    }

    /// States in which the world holds the body still and ignores its contacts.
    pub fn freezes_body(self) -> bool {
        self == CharacterState::Pause
    }
}

/// The operation set every state answers. Unneeded hooks stay no-ops.
pub(crate) trait StateBehavior: Sync {
    fn on_enter(&self, _ctx: &mut ControllerContext, _from: CharacterState) {}

    fn on_exit(&self, _ctx: &mut ControllerContext, _to: CharacterState) {}

    fn set_inputs(
        &self,
        _ctx: &mut ControllerContext,
        _inputs: &InputSnapshot,
        _motor: &mut dyn CharacterMotor,
    ) {
    }

    fn update_rotation(
        &self,
        _ctx: &mut ControllerContext,
        _rotation: &mut Quat,
        _motor: &dyn CharacterMotor,
    ) {
    }

    fn update_velocity(
        &self,
        _ctx: &mut ControllerContext,
        _velocity: &mut Vec3,
        _motor: &mut dyn CharacterMotor,
        _dt: f32,
    ) {
    }

    fn after_update(&self, _ctx: &mut ControllerContext, _motor: &mut dyn CharacterMotor, _dt: f32) {
    }

    fn add_velocity(&self, _ctx: &mut ControllerContext, _velocity: Vec3) {}

    /// Animation-driven completion of an interact or fire action.
    fn resolve_action(&self, _ctx: &mut ControllerContext, _action: ActionKind) {}
}

// -----------------------------------------------------------------------------
// Default
// -----------------------------------------------------------------------------

struct DefaultState;

impl StateBehavior for DefaultState {
    fn on_enter(&self, ctx: &mut ControllerContext, _from: CharacterState) {
        ctx.emit(ControllerEvent::Ui(UiChange::ShowGameplayHud));
    }

    fn set_inputs(
        &self,
        ctx: &mut ControllerContext,
        inputs: &InputSnapshot,
        motor: &mut dyn CharacterMotor,
    ) {
        ctx.move_intent = move_intent_from_axis(inputs.move_axis_forward, motor.character_up());

        if inputs.jump_down {
            ctx.jump.request();
        }
        if inputs.interact_down {
            ctx.interact.request();
        }
        if inputs.fire_down {
            ctx.fire.request();
        }
        if inputs.escape_down {
            ctx.escape.request();
        }

        if inputs.crouch_down {
            ctx.crouch.should_be_crouching = true;
            if !ctx.crouch.is_crouching {
                ctx.crouch.is_crouching = true;
                motor.set_capsule_dimensions(ctx.tuning.crouching_capsule);
            }
        } else if inputs.crouch_up {
            ctx.crouch.should_be_crouching = false;
        }
    }

    fn update_rotation(
        &self,
        ctx: &mut ControllerContext,
        rotation: &mut Quat,
        motor: &dyn CharacterMotor,
    ) {
        if ctx.move_intent == Vec3::ZERO {
            return;
        }
        if let Some(facing) = look_rotation(ctx.move_intent, motor.character_up()) {
            *rotation = facing;
        }
    }

    fn update_velocity(
        &self,
        ctx: &mut ControllerContext,
        velocity: &mut Vec3,
        motor: &mut dyn CharacterMotor,
        dt: f32,
    ) {
        let grounding = motor.grounding_status();
        let up = motor.character_up();
        let frame = SolverFrame {
            grounding: &grounding,
            up,
            position: motor.transient_position(),
            move_intent: ctx.move_intent,
            crouching: ctx.crouch.is_crouching,
            dt,
        };

        *velocity = if grounding.is_stable_on_ground {
            grounded_velocity(*velocity, &frame, &ctx.tuning)
        } else {
            air_velocity(*velocity, &frame, &ctx.tuning)
        };

        ctx.jump.tick(dt);
        let can_jump = grounding.is_stable_on_ground
            || ctx.time_since_last_able_to_jump <= ctx.tuning.jump_post_grounding_grace_time;
        if ctx.jump.try_fire_gated(can_jump) {
            let direction = jump_direction(&grounding, up);
            // Otherwise the motor snaps us straight back onto the ground
            motor.force_unground();
            *velocity = jump_velocity(*velocity, direction, up, ctx.move_intent, &ctx.tuning);
            debug!("Jump fired along {:?}", direction);
        }

        if ctx.internal_velocity_add.length_squared() > 0.0 {
            *velocity += ctx.internal_velocity_add;
            ctx.internal_velocity_add = Vec3::ZERO;
        }

        *velocity = constrain_to_plane(*velocity);
    }

    fn after_update(&self, ctx: &mut ControllerContext, motor: &mut dyn CharacterMotor, dt: f32) {
        let grounding = motor.grounding_status();

        ctx.animate(AnimationCue::Forward(ctx.move_intent.z.abs()));
        ctx.animate(AnimationCue::OnGround(grounding.is_stable_on_ground));
        ctx.animate(AnimationCue::Crouch(ctx.crouch.is_crouching));
        if ctx.jump.fired_this_frame() {
            ctx.emit(ControllerEvent::trigger(AnimationTrigger::Jump));
        }
        if ctx.interact.is_requested() {
            ctx.emit(ControllerEvent::trigger(AnimationTrigger::Interact));
        }
        if ctx.fire.is_requested() {
            ctx.emit(ControllerEvent::trigger(AnimationTrigger::Fire));
        }

        ctx.update_idle(dt);

        if ctx.jump.expire() {
            debug!("Jump request dropped: no ground within grace window");
        }
        if grounding.is_stable_on_ground {
            ctx.jump.release();
            ctx.time_since_last_able_to_jump = 0.0;
        } else {
            ctx.time_since_last_able_to_jump += dt;
        }

        ctx.interact.tick(dt);
        ctx.interact.try_fire();

        ctx.fire.tick(dt);
        ctx.fire.try_fire();

        ctx.escape.tick(dt);
        if ctx.escape.try_fire() {
            ctx.emit(ControllerEvent::EscapeRequested);
        }

        ctx.resolve_uncrouch(motor);
    }

    fn add_velocity(&self, ctx: &mut ControllerContext, velocity: Vec3) {
        ctx.internal_velocity_add += velocity;
    }

    fn resolve_action(&self, ctx: &mut ControllerContext, action: ActionKind) {
        if ctx.channel_mut(action).resolve() {
            debug!("{:?} request expired before it could fire", action);
        }
    }
}

// -----------------------------------------------------------------------------
// Dying
// -----------------------------------------------------------------------------

struct DyingState;

impl StateBehavior for DyingState {
    fn on_enter(&self, ctx: &mut ControllerContext, _from: CharacterState) {
        ctx.move_intent = Vec3::ZERO;
        ctx.animate(AnimationCue::Forward(0.0));
        let trigger = if ctx.hit_front {
            AnimationTrigger::DieBack
        } else {
            AnimationTrigger::DieForward
        };
        ctx.emit(ControllerEvent::trigger(trigger));
    }

    fn update_velocity(
        &self,
        ctx: &mut ControllerContext,
        velocity: &mut Vec3,
        _motor: &mut dyn CharacterMotor,
        _dt: f32,
    ) {
        *velocity = Vec3::ZERO;
        ctx.jump.force_consume();
    }
}

// -----------------------------------------------------------------------------
// Revive
// -----------------------------------------------------------------------------

struct ReviveState;

impl StateBehavior for ReviveState {
    fn on_enter(&self, ctx: &mut ControllerContext, _from: CharacterState) {
        ctx.move_intent = Vec3::ZERO;
        ctx.emit(ControllerEvent::trigger(AnimationTrigger::Revive));
    }

    fn on_exit(&self, ctx: &mut ControllerContext, _to: CharacterState) {
        ctx.animate(AnimationCue::ReviveFlag(false));
    }

    fn update_velocity(
        &self,
        ctx: &mut ControllerContext,
        velocity: &mut Vec3,
        _motor: &mut dyn CharacterMotor,
        _dt: f32,
    ) {
        *velocity = Vec3::ZERO;
        ctx.jump.force_consume();
    }
}

// -----------------------------------------------------------------------------
// Pause
// -----------------------------------------------------------------------------

/// Frozen in place: velocity is left as the motor has it.
struct PauseState;

impl StateBehavior for PauseState {
    fn on_enter(&self, ctx: &mut ControllerContext, _from: CharacterState) {
        ctx.move_intent = Vec3::ZERO;
        ctx.animate(AnimationCue::Forward(0.0));
        ctx.animate(AnimationCue::Crouch(false));
    }

    fn on_exit(&self, ctx: &mut ControllerContext, _to: CharacterState) {
        ctx.emit(ControllerEvent::Ui(UiChange::Hide));
    }
}
