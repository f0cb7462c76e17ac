//! Play Match Scene - 2D arena bout
//!
//! ## Flow
//! 1. `setup_play_match`: builds a [`Bout`] from the `MatchConfig`, spawns the
//!    arena backdrop and one sprite per fighter and per attack hitbox
//! 2. Every frame (`Update`):
//!    - `latch_fighter_input`: read human controls into `PendingInput`
//!    - `handle_match_keys`: pause, rematch, back to menu
//!    - rendering: sync sprites, guard outlines, HUD, overlays
//! 3. Every fixed step (`FixedUpdate`, 60 Hz):
//!    - `advance_bout`: step the bout once and forward its sound cues
//! 4. `cleanup_play_match`: despawn the scene and drop the bout

pub mod rendering;

use bevy::prelude::*;

use super::match_config::MatchConfig;
use super::GameState;
use crate::assets::GameAssets;
use crate::combat::bout::{Bout, FrameInput};
use crate::combat::events::SoundCue;
use crate::combat::fighter::Corner;
use crate::combat::rng::GameRng;
use crate::keybindings::{GameAction, Keybindings};
use rendering::{
    draw_guard_outlines, render_game_over_overlay, render_hud, render_pause_overlay, spawn_arena,
    spawn_fighter_visuals, sync_fighter_visuals, sync_hitbox_visuals,
};

pub struct PlayMatchPlugin;

impl Plugin for PlayMatchPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::PlayMatch), setup_play_match)
            .add_systems(OnExit(GameState::PlayMatch), cleanup_play_match)
            .add_systems(
                Update,
                (latch_fighter_input, handle_match_keys)
                    .chain()
                    .run_if(in_state(GameState::PlayMatch)),
            )
            .add_systems(
                Update,
                (
                    sync_fighter_visuals,
                    sync_hitbox_visuals,
                    draw_guard_outlines,
                    render_hud,
                    render_pause_overlay,
                    render_game_over_overlay,
                )
                    .after(handle_match_keys)
                    .run_if(in_state(GameState::PlayMatch)),
            )
            .add_systems(
                FixedUpdate,
                advance_bout.run_if(in_state(GameState::PlayMatch)),
            );
    }
}

/// Marker component for play match entities
#[derive(Component)]
pub struct PlayMatchEntity;

/// Human input gathered since the last fixed step.
#[derive(Resource, Debug, Default)]
pub struct PendingInput {
    pub input: FrameInput,
}

// ============================================================================
// Setup & Cleanup Systems
// ============================================================================

pub fn setup_play_match(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    config: Res<MatchConfig>,
    assets: Res<GameAssets>,
    rng: Res<GameRng>,
) {
    let bout = Bout::new(config.clone());
    info!(
        "Match started: {} ({} vs {}), seed {:?}",
        config.mode.name(),
        bout.fighter(Corner::Blue).name,
        bout.fighter(Corner::Red).name,
        rng.seed
    );

    spawn_arena(&mut commands, &assets);
    spawn_fighter_visuals(&mut commands, &mut meshes, &mut materials, &assets, &bout);

    commands.insert_resource(bout);
    commands.insert_resource(PendingInput::default());
}

pub fn cleanup_play_match(mut commands: Commands, query: Query<Entity, With<PlayMatchEntity>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<Bout>();
    commands.remove_resource::<PendingInput>();
}

// ============================================================================
// Input
// ============================================================================

/// Runs every render frame so no key press falls between fixed steps.
pub fn latch_fighter_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    keybindings: Res<Keybindings>,
    bout: Res<Bout>,
    mut pending: ResMut<PendingInput>,
) {
    for corner in Corner::all() {
        if !bout.config().mode.is_human(corner) {
            continue;
        }
        let fresh = keybindings.player_input(corner, &keyboard);
        pending.input.for_corner_mut(corner).latch(&fresh);
    }
}

pub fn handle_match_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    keybindings: Res<Keybindings>,
    mut bout: ResMut<Bout>,
    mut pending: ResMut<PendingInput>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keybindings.action_just_pressed(GameAction::Back, &keyboard) {
        info!("Leaving match for the main menu");
        next_state.set(GameState::MainMenu);
        return;
    }
    if keybindings.action_just_pressed(GameAction::Pause, &keyboard) {
        bout.toggle_pause();
    }
    if keybindings.action_just_pressed(GameAction::Restart, &keyboard) && bout.restart() {
        pending.input = FrameInput::default();
    }
}

// ============================================================================
// Simulation
// ============================================================================

pub fn advance_bout(
    time: Res<Time>,
    mut bout: ResMut<Bout>,
    mut rng: ResMut<GameRng>,
    mut pending: ResMut<PendingInput>,
    mut sounds: EventWriter<SoundCue>,
) {
    let cues = bout.step(&pending.input, time.delta_secs_f64(), &mut *rng);
    sounds.send_batch(cues);
    // Presses made while paused or after the bout are dropped, not replayed
    pending.input.clear_edges();
}
