//! Movement domain: system modules that drive the player controller.

pub(crate) mod callbacks;
pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod motor;

pub(crate) use callbacks::{dispatch_controller_events, forward_world_events, run_animation_callbacks};
pub(crate) use collisions::{detect_fall_out, detect_hazard_contacts, probe_ground};
pub(crate) use input::{read_input, resume_from_pause};
pub(crate) use motor::drive_player_controller;
