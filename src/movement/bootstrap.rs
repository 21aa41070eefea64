//! Movement domain: level and player spawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    AnimationCallbacks, Checkpoint, ControllerTuning, GameLayer, Ground, Hazard, KinematicBody,
    PIXELS_PER_UNIT, Player, PlayerBody, PlayerController, Wall, to_controller, to_world,
};

/// Where the player appears if the level has no checkpoint.
const FALLBACK_SPAWN: Vec2 = Vec2::new(-300.0, -150.0);

/// Spawn the player at the level checkpoint with the loaded tuning.
pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<ControllerTuning>,
    checkpoints: Query<&Transform, With<Checkpoint>>,
    existing_player: Query<Entity, With<Player>>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let spawn = checkpoints
        .iter()
        .next()
        .map(|transform| transform.translation.truncate())
        .unwrap_or_else(|| {
            warn!("No checkpoint in level, spawning player at {:?}", FALLBACK_SPAWN);
            FALLBACK_SPAWN
        });

    let body = KinematicBody::new(to_controller(spawn), tuning.standing_capsule);
    let capsule = body.capsule;
    info!(
        "Spawning player at {:?}: jump_height={:.2}, max_speed={}",
        body.position,
        tuning.jump_height(),
        tuning.max_stable_move_speed
    );

    let translation = to_world(body.position).extend(1.0);
    let visual_size = Vec2::new(capsule.radius * 2.0, capsule.height) * PIXELS_PER_UNIT;

    commands
        .spawn((
            Player,
            PlayerController::new(tuning.clone()),
            body,
            AnimationCallbacks::default(),
            Transform::from_translation(translation),
            Visibility::default(),
        ))
        .with_children(|parent| {
            // Sprite origin is its center, the character origin is at the feet
            parent.spawn((
                PlayerBody,
                Sprite {
                    color: Color::srgb(0.9, 0.9, 0.9),
                    custom_size: Some(visual_size),
                    ..default()
                },
                Transform::from_xyz(0.0, visual_size.y / 2.0, 0.0),
            ));
        });
}

/// Build the demo level: floor, walls, platforms, a ramp, hazards, and a checkpoint.
pub(crate) fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);
    let hazard_color = Color::srgb(0.8, 0.2, 0.2);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Default]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Default]);
    let hazard_layers = CollisionLayers::new(GameLayer::Hazard, [GameLayer::Default]);

    let mut solid = |marker_ground: bool, size: Vec2, transform: Transform, color: Color| {
        let mut entity = commands.spawn((
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            transform,
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
        ));
        if marker_ground {
            entity.insert((Ground, ground_layers));
        } else {
            entity.insert((Wall, wall_layers));
        }
    };

    // Floor
    solid(
        true,
        Vec2::new(800.0, 40.0),
        Transform::from_xyz(0.0, -200.0, 0.0),
        ground_color,
    );

    // Side walls
    solid(
        false,
        Vec2::new(40.0, 500.0),
        Transform::from_xyz(-420.0, 50.0, 0.0),
        wall_color,
    );
    solid(
        false,
        Vec2::new(40.0, 500.0),
        Transform::from_xyz(420.0, 50.0, 0.0),
        wall_color,
    );

    // Platforms, each within a single jump of the one below
    solid(
        true,
        Vec2::new(150.0, 20.0),
        Transform::from_xyz(-250.0, -100.0, 0.0),
        platform_color,
    );
    solid(
        true,
        Vec2::new(150.0, 20.0),
        Transform::from_xyz(250.0, -40.0, 0.0),
        platform_color,
    );
    solid(
        true,
        Vec2::new(120.0, 20.0),
        Transform::from_xyz(0.0, 20.0, 0.0),
        platform_color,
    );

    // Walkable 25 degree ramp up to the right platform
    solid(
        true,
        Vec2::new(200.0, 16.0),
        Transform::from_xyz(120.0, -150.0, 0.0)
            .with_rotation(Quat::from_rotation_z(25f32.to_radians())),
        ground_color,
    );

    // Low ceiling block to test crouching under
    solid(
        false,
        Vec2::new(100.0, 20.0),
        Transform::from_xyz(-120.0, -130.0, 0.0),
        wall_color,
    );

    // Spikes on the floor
    for x in [-40.0, 330.0] {
        let size = Vec2::new(40.0, 12.0);
        commands.spawn((
            Hazard,
            Sprite {
                color: hazard_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(x, -174.0, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            hazard_layers,
        ));
    }

    commands.spawn((
        Checkpoint,
        Transform::from_xyz(FALLBACK_SPAWN.x, -180.0, 0.0),
    ));
}
