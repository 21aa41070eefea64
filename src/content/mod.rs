//! Content domain: data-driven controller tuning loaded from RON.

mod loader;
mod validation;


pub use loader::{ContentLoadError, load_controller_tuning, parse_controller_tuning};
pub use validation::{TuningValidationError, validate_tuning};

use bevy::prelude::*;
use std::path::Path;

/// Tuning file read at startup, relative to the working directory.
pub const CONTROLLER_TUNING_PATH: &str = "assets/data/controller.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_tuning_on_startup);
    }
}

/// Replace the default tuning with the file contents if they load and validate.
fn load_tuning_on_startup(mut commands: Commands) {
    let tuning = match load_controller_tuning(Path::new(CONTROLLER_TUNING_PATH)) {
        Ok(tuning) => tuning,
        Err(e) => {
            warn!("{}; using default controller tuning", e);
            return;
        }
    };

    let errors = validate_tuning(&tuning);
    if !errors.is_empty() {
        for error in &errors {
            warn!("Invalid controller tuning: {}", error);
        }
        warn!(
            "{} tuning error(s) in {}; using default controller tuning",
            errors.len(),
            CONTROLLER_TUNING_PATH
        );
        return;
    }

    info!(
        "Loaded controller tuning from {}: max_speed={}, jump_up_speed={}",
        CONTROLLER_TUNING_PATH, tuning.max_stable_move_speed, tuning.jump_up_speed
    );
    commands.insert_resource(tuning);
}
