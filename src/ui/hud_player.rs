//! UI domain: player HUD lives counter.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::{ControllerEvent, ControllerNotification, UiChange};

pub(crate) const PLAYER_HUD_PADDING: f32 = 16.0;
const STARTING_LIVES: i32 = 3;

/// Lives left in the current run.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerLives {
    pub lives: i32,
}

impl Default for PlayerLives {
    fn default() -> Self {
        Self {
            lives: STARTING_LIVES,
        }
    }
}

impl PlayerLives {
    /// Apply a lives delta, never dropping below zero.
    pub fn apply(&mut self, delta: i32) {
        self.lives = (self.lives + delta).max(0);
    }
}

/// Marker for the gameplay HUD container
#[derive(Component)]
pub struct GameplayHudUI;

/// Marker for the lives count text
#[derive(Component)]
pub struct LivesText;

pub(crate) fn spawn_player_hud(mut commands: Commands, lives: Res<PlayerLives>) {
    // Root container positioned at top-left, hidden until gameplay starts
    commands
        .spawn((
            GameplayHudUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(PLAYER_HUD_PADDING),
                top: Val::Px(PLAYER_HUD_PADDING),
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                column_gap: Val::Px(8.0),
                ..default()
            },
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            // Life icon
            parent.spawn((
                Node {
                    width: Val::Px(16.0),
                    height: Val::Px(16.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.9, 0.3, 0.35)),
            ));

            parent.spawn((
                LivesText,
                Text::new(format!("x {}", lives.lives)),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.9, 0.9)),
            ));
        });
}

/// Track lives and HUD visibility from controller notifications.
pub(crate) fn apply_player_notifications(
    mut notifications: MessageReader<ControllerNotification>,
    mut lives: ResMut<PlayerLives>,
    mut hud_query: Query<&mut Visibility, With<GameplayHudUI>>,
) {
    for notification in notifications.read() {
        match notification.event {
            ControllerEvent::LivesChanged(delta) => {
                lives.apply(delta);
                info!("Lives: {}", lives.lives);
            }
            ControllerEvent::Ui(UiChange::ShowGameplayHud) => {
                for mut visibility in &mut hud_query {
                    *visibility = Visibility::Inherited;
                }
            }
            _ => {}
        }
    }
}

pub(crate) fn update_lives_display(
    lives: Res<PlayerLives>,
    mut query: Query<&mut Text, With<LivesText>>,
) {
    if lives.is_changed() {
        for mut text in &mut query {
            **text = format!("x {}", lives.lives);
        }
    }
}
