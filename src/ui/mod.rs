//! UI domain: gameplay HUD and pause overlay.

mod hud_player;
mod pause;

#[cfg(test)]
mod tests;

pub use hud_player::PlayerLives;

use bevy::prelude::*;

use crate::ui::hud_player::{apply_player_notifications, spawn_player_hud, update_lives_display};
use crate::ui::pause::{apply_pause_notifications, show_pause_overlay, spawn_pause_overlay};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerLives>()
            .add_systems(Startup, (spawn_player_hud, spawn_pause_overlay))
            .add_systems(
                Update,
                (
                    apply_player_notifications,
                    update_lives_display,
                    apply_pause_notifications,
                    show_pause_overlay,
                )
                    .chain(),
            );
    }
}
