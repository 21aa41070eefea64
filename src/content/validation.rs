//! Validation for loaded controller tuning.

use crate::movement::{CapsuleDimensions, ControllerTuning};

/// A tuning value that is out of range.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningValidationError {
    pub field: &'static str,
    pub value: f32,
    pub reason: &'static str,
}

impl std::fmt::Display for TuningValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {} {}", self.field, self.value, self.reason)
    }
}

/// Helper macro for range checks on a single field
macro_rules! check {
    ($errors:expr, $tuning:expr, $field:ident, $ok:expr, $reason:expr) => {
        let value = $tuning.$field;
        if !$ok(value) {
            $errors.push(TuningValidationError {
                field: stringify!($field),
                value,
                reason: $reason,
            });
        }
    };
}

fn non_negative(value: f32) -> bool {
    value >= 0.0
}

fn positive(value: f32) -> bool {
    value > 0.0
}

fn check_capsule(
    errors: &mut Vec<TuningValidationError>,
    capsule: &CapsuleDimensions,
    radius_field: &'static str,
    height_field: &'static str,
) {
    if !positive(capsule.radius) {
        errors.push(TuningValidationError {
            field: radius_field,
            value: capsule.radius,
            reason: "must be positive",
        });
    }
    if capsule.height < capsule.radius * 2.0 {
        errors.push(TuningValidationError {
            field: height_field,
            value: capsule.height,
            reason: "must be at least twice the radius",
        });
    }
}

/// Validate every tunable.
/// Returns a list of validation errors, empty if the tuning is usable.
pub fn validate_tuning(tuning: &ControllerTuning) -> Vec<TuningValidationError> {
    let mut errors = Vec::new();

    // Speeds
    check!(errors, tuning, max_stable_move_speed, non_negative, "must not be negative");
    check!(errors, tuning, max_crouch_move_speed, non_negative, "must not be negative");
    check!(errors, tuning, max_air_move_speed, non_negative, "must not be negative");
    check!(errors, tuning, air_acceleration_speed, non_negative, "must not be negative");
    check!(errors, tuning, jump_up_speed, non_negative, "must not be negative");
    check!(errors, tuning, jump_scalable_forward_speed, non_negative, "must not be negative");
    check!(errors, tuning, drag, non_negative, "must not be negative");
    check!(errors, tuning, stable_movement_sharpness, positive, "must be positive");

    // Action channels
    check!(errors, tuning, interact_grace_time, non_negative, "must not be negative");
    check!(errors, tuning, fire_grace_time, non_negative, "must not be negative");
    check!(errors, tuning, escape_grace_time, non_negative, "must not be negative");

    // Idle
    check!(errors, tuning, bored_time, positive, "must be positive");
    check!(errors, tuning, idle_input_threshold, non_negative, "must not be negative");

    // Capsules
    check_capsule(
        &mut errors,
        &tuning.standing_capsule,
        "standing_capsule.radius",
        "standing_capsule.height",
    );
    check_capsule(
        &mut errors,
        &tuning.crouching_capsule,
        "crouching_capsule.radius",
        "crouching_capsule.height",
    );
    if tuning.crouching_capsule.height > tuning.standing_capsule.height {
        errors.push(TuningValidationError {
            field: "crouching_capsule.height",
            value: tuning.crouching_capsule.height,
            reason: "must not exceed the standing height",
        });
    }

    errors
}
