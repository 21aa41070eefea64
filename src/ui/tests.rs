//! UI domain: unit tests for the lives counter and pause overlay.

use bevy::prelude::*;

use super::PlayerLives;
use super::pause::pause_overlay_visibility;
use crate::movement::{
    CharacterState, ControllerEvent, ControllerTuning, PlayerController, UiChange,
};

#[test]
fn test_lives_start_at_three() {
    assert_eq!(PlayerLives::default().lives, 3);
}

#[test]
fn test_lives_apply_delta() {
    let mut lives = PlayerLives::default();
    lives.apply(-1);
    assert_eq!(lives.lives, 2);
    lives.apply(2);
    assert_eq!(lives.lives, 4);
}

#[test]
fn test_lives_never_negative() {
    let mut lives = PlayerLives { lives: 1 };
    lives.apply(-1);
    lives.apply(-1);
    assert_eq!(lives.lives, 0);
}

// ---- Pause overlay ----

#[test]
fn test_hide_notification_hides_overlay() {
    assert_eq!(
        pause_overlay_visibility(&ControllerEvent::Ui(UiChange::Hide)),
        Some(Visibility::Hidden)
    );
    assert_eq!(
        pause_overlay_visibility(&ControllerEvent::Ui(UiChange::ShowGameplayHud)),
        None
    );
    assert_eq!(pause_overlay_visibility(&ControllerEvent::Landed), None);
}

#[test]
fn test_leaving_pause_hides_overlay() {
    let mut controller = PlayerController::new(ControllerTuning::default());
    controller.transition_to(CharacterState::Pause);
    controller.drain_events();

    controller.transition_to(CharacterState::Default);
    let hidden = controller
        .drain_events()
        .iter()
        .filter_map(pause_overlay_visibility)
        .collect::<Vec<_>>();
    assert_eq!(hidden, vec![Visibility::Hidden]);
}
