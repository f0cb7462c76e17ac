//! Duelist - Two-Fighter Arcade Brawler
//!
//! Windowed play by default; `--headless <config.json>` runs a CPU-vs-CPU
//! bout without graphics and prints the result.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use duelist::assets::GameAssetsPlugin;
use duelist::audio::SoundPlugin;
use duelist::camera::CameraPlugin;
use duelist::cli::{parse_args, Args};
use duelist::combat::rng::GameRng;
use duelist::combat::CombatPlugin;
use duelist::headless::{run_headless_match, HeadlessMatchConfig};
use duelist::settings::{GameSettings, SettingsPlugin};
use duelist::states::{GameState, StatesPlugin};

fn main() {
    let args = parse_args();

    if let Some(config_path) = &args.headless {
        if let Err(e) = run_headless(config_path, &args) {
            eprintln!("Headless match failed: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let settings = GameSettings::load();
    let (width, height) = settings.resolution.dimensions();

    App::new()
        // Bevy default plugins with window settings from settings.ron
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Duelist".to_string(),
                resolution: (width, height).into(),
                mode: settings.window_mode.to_bevy(),
                present_mode: settings.present_mode(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        // Seeded before CombatPlugin so it is not replaced
        .insert_resource(GameRng::from_optional_seed(args.seed))
        // Our game plugins
        .add_plugins((
            EguiPlugin,
            SettingsPlugin::new(settings),
            CameraPlugin,
            GameAssetsPlugin,
            SoundPlugin,
            CombatPlugin,
            StatesPlugin,
        ))
        // Start in the main menu state
        .init_state::<GameState>()
        .run();
}

fn run_headless(config_path: &std::path::Path, args: &Args) -> Result<(), String> {
    let config = HeadlessMatchConfig::load_from_file(config_path)?.with_overrides(
        args.output.as_ref().map(|p| p.to_string_lossy().into_owned()),
        args.max_duration,
        args.seed,
    )?;
    run_headless_match(&config)?;
    Ok(())
}
