//! Camera system
//!
//! A single 2D camera fitted to the arena, plus the mapping from arena
//! coordinates (origin top-left, y down) to Bevy world space (origin at the
//! arena centre, y up).

use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

use crate::combat::constants::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::combat::hitbox::Hitbox;

/// Plugin for camera management
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_arena_camera);
    }
}

/// Marker component for the arena camera
#[derive(Component)]
pub struct ArenaCamera;

/// The whole arena stays visible at any window size; extra space letterboxes.
fn spawn_arena_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: ARENA_WIDTH,
                min_height: ARENA_HEIGHT,
            },
            ..OrthographicProjection::default_2d()
        },
        ArenaCamera,
    ));
}

/// Arena point to world position.
pub fn arena_to_world(x: f32, y: f32) -> Vec2 {
    Vec2::new(x - ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0 - y)
}

/// World-space centre of an arena rectangle.
pub fn rect_center_to_world(rect: &Hitbox) -> Vec2 {
    let (cx, cy) = rect.center();
    arena_to_world(cx, cy)
}
