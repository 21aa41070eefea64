//! Movement domain: notification dispatch, animation callbacks, and world events.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::movement::systems::motor::MotorView;
use crate::movement::{
    AnimationCallback, AnimationCallbacks, AnimationCue, AnimationTrigger, BlockBumpEvent,
    CharacterDeathEvent, CharacterState, Checkpoint, ControllerEvent, ControllerNotification,
    KinematicBody, Player, PlayerController, to_controller,
};

/// When the interact/fire animations capture their target.
const ACTION_CAPTURE_DELAY: f32 = 0.1;
/// When the interact/fire animations finish and report back.
const ACTION_DURATION: f32 = 0.3;
const DEATH_DURATION: f32 = 1.5;
const REVIVE_DURATION: f32 = 1.0;

/// Map a controller event onto the animation callbacks an animator would raise.
pub(crate) fn schedule_callbacks(callbacks: &mut AnimationCallbacks, event: &ControllerEvent) {
    match event {
        ControllerEvent::Animation(AnimationCue::Trigger(trigger)) => match trigger {
            AnimationTrigger::Interact if !callbacks.is_pending(AnimationCallback::Interaction) => {
                callbacks.schedule(
                    ACTION_CAPTURE_DELAY,
                    AnimationCallback::SetInteractionPosition,
                );
                callbacks.schedule(ACTION_DURATION, AnimationCallback::Interaction);
                callbacks.schedule(ACTION_DURATION, AnimationCallback::Interacted);
            }
            AnimationTrigger::Fire if !callbacks.is_pending(AnimationCallback::Fire) => {
                callbacks.schedule(ACTION_CAPTURE_DELAY, AnimationCallback::SetFirePosition);
                callbacks.schedule(ACTION_DURATION, AnimationCallback::Fire);
                callbacks.schedule(ACTION_DURATION, AnimationCallback::Fired);
            }
            AnimationTrigger::DieBack | AnimationTrigger::DieForward => {
                // Death interrupts whatever was playing
                callbacks.clear();
                callbacks.schedule(0.0, AnimationCallback::DeathStart);
                callbacks.schedule(DEATH_DURATION, AnimationCallback::DeathComplete);
            }
            AnimationTrigger::Revive => {
                callbacks.schedule(REVIVE_DURATION, AnimationCallback::ReviveComplete);
            }
            _ => {}
        },
        ControllerEvent::EscapeRequested => {
            callbacks.schedule(0.0, AnimationCallback::EscapeSequence);
        }
        _ => {}
    }
}

/// Drain controller outboxes onto the message bus.
pub(crate) fn dispatch_controller_events(
    mut query: Query<(Entity, &mut PlayerController, &mut AnimationCallbacks), With<Player>>,
    mut notifications: MessageWriter<ControllerNotification>,
) {
    for (entity, mut controller, mut callbacks) in &mut query {
        let mut landed = false;

        for event in controller.drain_events() {
            schedule_callbacks(&mut callbacks, &event);
            match event {
                ControllerEvent::Landed => landed = true,
                ControllerEvent::LivesChanged(delta) => info!("Lives changed by {}", delta),
                ControllerEvent::LevelReset => info!("Level reset requested"),
                _ => {}
            }
            notifications.write(ControllerNotification { entity, event });
        }

        if landed {
            controller.on_landed();
        }
    }
}

/// Count down scheduled animation callbacks and deliver the ones that came due.
pub(crate) fn run_animation_callbacks(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    checkpoints: Query<&Transform, (With<Checkpoint>, Without<Player>)>,
    mut query: Query<
        (&mut PlayerController, &mut KinematicBody, &mut AnimationCallbacks),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();
    let checkpoint = checkpoints
        .iter()
        .next()
        .map(|transform| (to_controller(transform.translation.truncate()), Quat::IDENTITY));

    for (mut controller, mut body, mut callbacks) in &mut query {
        // Footsteps follow ground speed while walking
        let walking = controller.state() == CharacterState::Default
            && body.grounding.is_stable_on_ground
            && body.velocity.z.abs() > f32::EPSILON;
        if !walking {
            callbacks.reset_stride();
        } else if callbacks.advance_stride(body.velocity.z * dt) {
            controller.play_move_sound();
        }

        for callback in callbacks.tick(dt) {
            let mut motor = MotorView {
                body: &mut *body,
                spatial_query: &spatial_query,
            };

            match callback {
                AnimationCallback::SetInteractionPosition => {
                    let target = controller.set_interaction_position(&motor);
                    debug!("Interaction target {:?}", target);
                }
                AnimationCallback::Interaction => {
                    if controller.crouch().is_crouching {
                        controller.crouch_interaction();
                    } else {
                        controller.normal_interaction();
                    }
                }
                AnimationCallback::Interacted => controller.on_interacted(),
                AnimationCallback::SetFirePosition => {
                    let origin = controller.set_fire_position(&motor);
                    debug!("Fire origin {:?}", origin);
                }
                AnimationCallback::Fire => {
                    if controller.crouch().is_crouching {
                        controller.crouch_fire();
                    } else {
                        controller.normal_fire();
                    }
                }
                AnimationCallback::Fired => controller.on_fired(),
                AnimationCallback::DeathStart => controller.death_start(),
                AnimationCallback::DeathComplete => {
                    controller.death_complete(&mut motor, checkpoint);
                }
                AnimationCallback::ReviveComplete => controller.revive_complete(),
                AnimationCallback::EscapeSequence => controller.escape_sequence(),
            }
        }
    }
}

/// Forward level-wide events to the player controller.
pub(crate) fn forward_world_events(
    mut deaths: MessageReader<CharacterDeathEvent>,
    mut bumps: MessageReader<BlockBumpEvent>,
    mut query: Query<(&mut PlayerController, &KinematicBody), With<Player>>,
) {
    let Ok((mut controller, body)) = query.single_mut() else {
        return;
    };

    for event in deaths.read() {
        controller.on_character_death(event.hit_point, body.position);
    }
    for event in bumps.read() {
        controller.on_block_bump(event.cracked);
    }
}
