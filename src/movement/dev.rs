//! Movement domain: debug-only controller inspection.

use bevy::prelude::*;

use crate::movement::{KinematicBody, Player, PlayerController};

/// Log the player controller state as JSON on F1.
pub(crate) fn dump_controller_snapshot(
    keyboard: Res<ButtonInput<KeyCode>>,
    query: Query<(&PlayerController, &KinematicBody), With<Player>>,
) {
    if !keyboard.just_pressed(KeyCode::F1) {
        return;
    }

    for (controller, body) in &query {
        match serde_json::to_string_pretty(&controller.snapshot()) {
            Ok(json) => info!(
                "Controller snapshot (position={:?}, grounded={}):\n{}",
                body.position, body.grounding.is_stable_on_ground, json
            ),
            Err(e) => warn!("Failed to serialize controller snapshot: {}", e),
        }
    }
}
