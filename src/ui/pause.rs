//! UI domain: pause overlay.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::{
    CharacterState, ControllerEvent, ControllerNotification, Player, PlayerController, UiChange,
};

/// Marker for the pause overlay
#[derive(Component)]
pub struct PauseOverlayUI;

pub(crate) fn spawn_pause_overlay(mut commands: Commands) {
    // Full screen dim overlay with a centered label
    commands
        .spawn((
            PauseOverlayUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("PAUSED\nEsc to resume"),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// Overlay visibility a controller notification asks for, if any.
pub(crate) fn pause_overlay_visibility(event: &ControllerEvent) -> Option<Visibility> {
    match event {
        ControllerEvent::Ui(UiChange::Hide) => Some(Visibility::Hidden),
        _ => None,
    }
}

/// Show the overlay once the player enters pause.
pub(crate) fn show_pause_overlay(
    player_query: Query<&PlayerController, (With<Player>, Changed<PlayerController>)>,
    mut overlay_query: Query<&mut Visibility, With<PauseOverlayUI>>,
) {
    let Ok(controller) = player_query.single() else {
        return;
    };

    if controller.state() == CharacterState::Pause {
        for mut visibility in &mut overlay_query {
            visibility.set_if_neq(Visibility::Inherited);
        }
    }
}

/// Hide the overlay when leaving pause tells the UI to go away.
pub(crate) fn apply_pause_notifications(
    mut notifications: MessageReader<ControllerNotification>,
    mut overlay_query: Query<&mut Visibility, With<PauseOverlayUI>>,
) {
    for notification in notifications.read() {
        let Some(target) = pause_overlay_visibility(&notification.event) else {
            continue;
        };
        for mut visibility in &mut overlay_query {
            visibility.set_if_neq(target);
        }
    }
}
