//! Kinematic platformer character controller with a Bevy demo adapter.

pub mod content;
pub mod movement;
pub mod ui;
