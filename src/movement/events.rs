//! Movement domain: notifications emitted by the player controller.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// One-shot animation triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationTrigger {
    Jump,
    Interact,
    Fire,
    DieBack,
    DieForward,
    Revive,
    Bored2,
    Bored3,
}

/// Animator parameter updates and triggers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationCue {
    Forward(f32),
    OnGround(bool),
    /// Held flag, not a trigger.
    Crouch(bool),
    ReviveFlag(bool),
    Trigger(AnimationTrigger),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Move,
    Interact,
    Fire,
    Die,
    Land,
    Bump,
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiChange {
    ShowGameplayHud,
    Hide,
}

/// Everything the controller tells the outside world. Fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerEvent {
    Animation(AnimationCue),
    Sound(SoundCue),
    Ui(UiChange),
    LivesChanged(i32),
    LevelReset,
    Landed,
    LeftStableGround,
    /// The escape action fired; the embedder answers with `escape_sequence`.
    EscapeRequested,
}

impl ControllerEvent {
    pub fn trigger(trigger: AnimationTrigger) -> Self {
        Self::Animation(AnimationCue::Trigger(trigger))
    }
}

/// Controller event forwarded onto the Bevy message bus.
#[derive(Debug, Clone)]
pub struct ControllerNotification {
    pub entity: Entity,
    pub event: ControllerEvent,
}

impl Message for ControllerNotification {}

/// A breakable block was bumped from below.
#[derive(Debug, Clone)]
pub struct BlockBumpEvent {
    pub cracked: bool,
}

impl Message for BlockBumpEvent {}

/// The level killed the player with a ray hit at `hit_point` (character space).
#[derive(Debug, Clone)]
pub struct CharacterDeathEvent {
    pub hit_point: Vec3,
}

impl Message for CharacterDeathEvent {}
