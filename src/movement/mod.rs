//! Movement domain: the player controller, its motor contract, and the Bevy systems that drive it.

mod bootstrap;
mod components;
mod controller;
mod debounce;
#[cfg(feature = "dev-tools")]
mod dev;
mod events;
mod motor;
mod resources;
pub mod solver;
mod state;
mod systems;


pub use components::{
    AnimationCallback, AnimationCallbacks, Checkpoint, GameLayer, Ground, Hazard, KinematicBody,
    PIXELS_PER_UNIT, Player, PlayerBody, STRIDE_LENGTH, Wall, capsule_collider, to_controller,
    to_world,
};
pub use controller::{
    ContactKind, ControllerSnapshot, CrouchState, FramePhase, PlayerController,
};
pub use debounce::{ActionKind, ActionRequest};
pub use events::{
    AnimationCue, AnimationTrigger, BlockBumpEvent, CharacterDeathEvent, ControllerEvent,
    ControllerNotification, SoundCue, UiChange,
};
pub use motor::{CapsuleDimensions, CharacterMotor, GroundingStatus};
pub use resources::{ControllerTuning, InputSnapshot};
pub use state::CharacterState;

use bevy::prelude::*;

use crate::movement::bootstrap::{spawn_player, spawn_test_room};
use crate::movement::systems::{
    detect_fall_out, detect_hazard_contacts, dispatch_controller_events,
    drive_player_controller, forward_world_events, probe_ground, read_input, resume_from_pause,
    run_animation_callbacks,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControllerTuning>()
            .init_resource::<InputSnapshot>()
            .add_message::<ControllerNotification>()
            .add_message::<BlockBumpEvent>()
            .add_message::<CharacterDeathEvent>()
            .add_systems(Startup, spawn_test_room)
            .add_systems(PostStartup, spawn_player)
            .add_systems(
                Update,
                (
                    read_input,
                    resume_from_pause,
                    forward_world_events,
                    probe_ground,
                    drive_player_controller,
                    detect_hazard_contacts,
                    detect_fall_out,
                    run_animation_callbacks,
                    dispatch_controller_events,
                )
                    .chain(),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(Update, dev::dump_controller_snapshot);
    }
}
