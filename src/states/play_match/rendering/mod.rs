//! Rendering Systems
//!
//! Everything drawn for the Play Match state. World-space sprites live here;
//! egui layers are split out:
//! - `hud`: names, health and energy bars, cooldowns, combat feed, controls
//! - `overlays`: pause and game-over screens

pub mod hud;
pub mod overlays;

pub use hud::*;
pub use overlays::*;

use bevy::prelude::*;

use super::PlayMatchEntity;
use crate::assets::GameAssets;
use crate::camera::rect_center_to_world;
use crate::combat::bout::Bout;
use crate::combat::constants::{ARENA_HEIGHT, ARENA_WIDTH, GROUND_Y};
use crate::combat::fighter::{Corner, Fighter};
use crate::combat::hitbox::Hitbox;
use crate::ui::colors;

const BACKGROUND_Z: f32 = 0.0;
const GROUND_Z: f32 = 0.5;
const FIGHTER_Z: f32 = 2.0;
const HITBOX_Z: f32 = 3.0;

/// Eye placement on the fallback body, in arena units from the body's
/// horizontal centre and top edge.
const EYE_FORWARD: f32 = 12.0;
const EYE_DROP: f32 = 24.0;
const EYE_RADIUS: f32 = 6.0;

/// A fighter's body sprite
#[derive(Component)]
pub struct FighterVisual {
    pub corner: Corner,
}

/// Eye drawn on a fighter with no sprite image
#[derive(Component)]
pub struct FighterEye {
    pub corner: Corner,
}

/// A fighter's attack hitbox, hidden between attacks
#[derive(Component)]
pub struct HitboxVisual {
    pub corner: Corner,
}

pub fn spawn_arena(commands: &mut Commands, assets: &GameAssets) {
    let arena_size = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);
    let background = match assets.background.handle() {
        Some(image) => Sprite {
            image: image.clone(),
            custom_size: Some(arena_size),
            ..default()
        },
        None => Sprite::from_color(colors::ARENA, arena_size),
    };
    commands.spawn((
        background,
        Transform::from_xyz(0.0, 0.0, BACKGROUND_Z),
        PlayMatchEntity,
    ));

    let ground = Hitbox::new(0.0, GROUND_Y, ARENA_WIDTH, ARENA_HEIGHT - GROUND_Y);
    commands.spawn((
        Sprite::from_color(colors::GROUND, Vec2::new(ground.width, ground.height)),
        Transform::from_translation(rect_center_to_world(&ground).extend(GROUND_Z)),
        PlayMatchEntity,
    ));
}

pub fn spawn_fighter_visuals(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    assets: &GameAssets,
    bout: &Bout,
) {
    for corner in Corner::all() {
        let fighter = bout.fighter(corner);
        let size = Vec2::new(fighter.width, fighter.height);
        let translation = rect_center_to_world(&fighter.bounds()).extend(FIGHTER_Z);

        match assets.fighter_sprite(fighter.profile) {
            Some(image) => {
                commands.spawn((
                    Sprite {
                        image: image.clone(),
                        custom_size: Some(size),
                        ..default()
                    },
                    Transform::from_translation(translation),
                    FighterVisual { corner },
                    PlayMatchEntity,
                ));
            }
            None => {
                let eye = eye_offset(fighter);
                commands
                    .spawn((
                        Sprite::from_color(fighter.profile.color(), size),
                        Transform::from_translation(translation),
                        FighterVisual { corner },
                        PlayMatchEntity,
                    ))
                    .with_children(|parent| {
                        parent.spawn((
                            Mesh2d(meshes.add(Circle::new(EYE_RADIUS))),
                            MeshMaterial2d(materials.add(Color::BLACK)),
                            Transform::from_xyz(eye.x, eye.y, 0.1),
                            FighterEye { corner },
                        ));
                    });
            }
        }

        commands.spawn((
            Sprite::from_color(colors::HITBOX, Vec2::ONE),
            Transform::from_xyz(0.0, 0.0, HITBOX_Z),
            Visibility::Hidden,
            HitboxVisual { corner },
            PlayMatchEntity,
        ));
    }
}

/// Eye position relative to the body centre, world axes (y up).
pub fn eye_offset(fighter: &Fighter) -> Vec2 {
    Vec2::new(
        EYE_FORWARD * fighter.facing.sign(),
        fighter.height / 2.0 - EYE_DROP,
    )
}

pub fn sync_fighter_visuals(
    bout: Res<Bout>,
    mut bodies: Query<(&FighterVisual, &mut Transform), Without<FighterEye>>,
    mut eyes: Query<(&FighterEye, &mut Transform), Without<FighterVisual>>,
) {
    for (visual, mut transform) in bodies.iter_mut() {
        let position = rect_center_to_world(&bout.fighter(visual.corner).bounds());
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
    for (eye, mut transform) in eyes.iter_mut() {
        let offset = eye_offset(bout.fighter(eye.corner));
        transform.translation.x = offset.x;
        transform.translation.y = offset.y;
    }
}

pub fn sync_hitbox_visuals(
    bout: Res<Bout>,
    mut hitboxes: Query<(&HitboxVisual, &mut Transform, &mut Sprite, &mut Visibility)>,
) {
    for (visual, mut transform, mut sprite, mut visibility) in hitboxes.iter_mut() {
        match bout.fighter(visual.corner).attack_hitbox {
            Some(hitbox) => {
                transform.translation = rect_center_to_world(&hitbox).extend(HITBOX_Z);
                sprite.custom_size = Some(Vec2::new(hitbox.width, hitbox.height));
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

/// Blue outline around guarding fighters
pub fn draw_guard_outlines(bout: Res<Bout>, mut gizmos: Gizmos) {
    for fighter in bout.fighters().iter().filter(|f| f.is_defending) {
        let center = rect_center_to_world(&fighter.bounds());
        let size = Vec2::new(fighter.width, fighter.height);
        // Gizmo lines are one pixel wide; stack a few for a thicker border
        for inset in [0.0, 1.5, 3.0] {
            gizmos.rect_2d(
                Isometry2d::from_translation(center),
                size - Vec2::splat(inset * 2.0),
                colors::GUARD_OUTLINE,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::fighter::Facing;
    use crate::states::match_config::FighterProfile;

    #[test]
    fn test_eye_follows_facing() {
        let mut fighter = Fighter::new(FighterProfile::Hero, Corner::Blue, 300.0, 0.0);
        assert_eq!(fighter.facing, Facing::Right);
        let right = eye_offset(&fighter);
        assert!(right.x > 0.0);
        assert!(right.y > 0.0, "eye sits in the upper half");

        fighter.move_by(-1.0);
        assert_eq!(eye_offset(&fighter).x, -right.x);
    }
}
