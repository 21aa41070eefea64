//! Movement domain: input sampling for the player controller.

use bevy::prelude::*;

use crate::movement::{CharacterState, InputSnapshot, Player, PlayerController};

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<InputSnapshot>) {
    // Horizontal axis
    let mut axis = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        axis -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        axis += 1.0;
    }

    *input = InputSnapshot {
        move_axis_forward: axis,
        jump_down: keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyK),
        crouch_down: keyboard.just_pressed(KeyCode::KeyS)
            || keyboard.just_pressed(KeyCode::ArrowDown)
            || keyboard.just_pressed(KeyCode::ControlLeft),
        crouch_up: keyboard.just_released(KeyCode::KeyS)
            || keyboard.just_released(KeyCode::ArrowDown)
            || keyboard.just_released(KeyCode::ControlLeft),
        interact_down: keyboard.just_pressed(KeyCode::KeyE),
        escape_down: keyboard.just_pressed(KeyCode::Escape),
        fire_down: keyboard.just_pressed(KeyCode::KeyF) || keyboard.just_pressed(KeyCode::KeyJ),
    };
}

/// Escape while paused goes back to gameplay. The press is swallowed so it
/// does not immediately request another pause.
pub(crate) fn resume_from_pause(
    mut input: ResMut<InputSnapshot>,
    mut query: Query<&mut PlayerController, With<Player>>,
) {
    if !input.escape_down {
        return;
    }

    for mut controller in &mut query {
        if controller.state() == CharacterState::Pause {
            info!("Resuming");
            controller.transition_to(CharacterState::Default);
            input.escape_down = false;
        }
    }
}
