//! Headless match execution
//!
//! Runs a CPU-vs-CPU bout without any graphical output. The bout is stepped
//! with a fixed 1/60 s delta per app update, so a seeded run is reproducible
//! regardless of wall-clock speed.

use bevy::prelude::*;
use serde::Serialize;
use std::path::PathBuf;

use crate::combat::bout::{Bout, FrameInput};
use crate::combat::constants::FRAMES_PER_SECOND;
use crate::combat::fighter::{Corner, Fighter};
use crate::combat::rng::GameRng;
use crate::states::match_config::MatchConfig;

use super::config::HeadlessMatchConfig;

/// Simulated seconds per headless frame.
pub const HEADLESS_TIMESTEP: f64 = 1.0 / FRAMES_PER_SECOND;

/// Result of a completed headless match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Winning corner, or None for a draw (including timeout)
    pub winner: Option<Corner>,
    /// Match duration in simulated seconds
    pub match_time: f64,
    pub frames: u64,
    /// The bout hit `max_duration_secs` before a knockout
    pub timed_out: bool,
    pub blue: FighterResult,
    pub red: FighterResult,
    /// Random seed used (if deterministic mode)
    pub random_seed: Option<u64>,
}

impl MatchResult {
    pub fn fighter(&self, corner: Corner) -> &FighterResult {
        match corner {
            Corner::Blue => &self.blue,
            Corner::Red => &self.red,
        }
    }

    pub fn winner_name(&self) -> Option<&str> {
        self.winner.map(|corner| self.fighter(corner).name.as_str())
    }
}

/// Statistics for a single fighter after the match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FighterResult {
    pub name: String,
    pub max_health: i32,
    /// Health remaining at match end (0 if knocked out)
    pub final_health: i32,
    pub final_energy: i32,
    pub survived: bool,
    pub damage_dealt: i32,
    pub damage_taken: i32,
    pub healing_done: i32,
    pub specials_used: u32,
}

impl From<&Fighter> for FighterResult {
    fn from(fighter: &Fighter) -> Self {
        Self {
            name: fighter.name.clone(),
            max_health: fighter.max_health,
            final_health: fighter.health,
            final_energy: fighter.energy,
            survived: !fighter.is_knocked_out(),
            damage_dealt: fighter.stats.damage_dealt,
            damage_taken: fighter.stats.damage_taken,
            healing_done: fighter.stats.healing_done,
            specials_used: fighter.stats.specials_used,
        }
    }
}

/// Resource to track headless match state
#[derive(Resource)]
pub struct HeadlessMatchState {
    /// Maximum match duration before declaring a draw
    pub max_duration: f64,
    /// Custom output path for the combat log
    pub output_path: Option<PathBuf>,
    pub match_complete: bool,
    /// Random seed for deterministic simulation (if provided)
    pub random_seed: Option<u64>,
    /// Populated when the match completes
    pub result: Option<MatchResult>,
}

/// Plugin for headless match execution
pub struct HeadlessPlugin {
    pub match_config: MatchConfig,
    pub max_duration: f64,
    pub output_path: Option<PathBuf>,
    pub random_seed: Option<u64>,
}

impl Plugin for HeadlessPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.match_config.clone())
            .insert_resource(HeadlessMatchState {
                max_duration: self.max_duration,
                output_path: self.output_path.clone(),
                match_complete: false,
                random_seed: self.random_seed,
                result: None,
            })
            .insert_resource(GameRng::from_optional_seed(self.random_seed))
            .add_systems(Startup, headless_setup_match)
            .add_systems(Update, (headless_step_bout, headless_check_match_end).chain());
    }
}

fn headless_setup_match(
    mut commands: Commands,
    config: Res<MatchConfig>,
    headless_state: Res<HeadlessMatchState>,
) {
    match headless_state.random_seed {
        Some(seed) => info!("Using deterministic RNG with seed: {}", seed),
        None => info!("Using non-deterministic RNG (no seed provided)"),
    }
    commands.insert_resource(Bout::new(config.clone()));
    info!(
        "Headless match setup complete: {} vs {}",
        config.blue.name(),
        config.red.name()
    );
}

fn headless_step_bout(
    mut bout: ResMut<Bout>,
    mut rng: ResMut<GameRng>,
    headless_state: Res<HeadlessMatchState>,
) {
    if headless_state.match_complete {
        return;
    }
    // Nobody listens for sounds without a window
    let _ = bout.step(&FrameInput::default(), HEADLESS_TIMESTEP, &mut *rng);
}

/// Knockout or timeout ends the run
fn headless_check_match_end(bout: Res<Bout>, mut headless_state: ResMut<HeadlessMatchState>) {
    if headless_state.match_complete {
        return;
    }

    let timed_out = !bout.is_over() && bout.elapsed() >= headless_state.max_duration;
    if !bout.is_over() && !timed_out {
        return;
    }

    if timed_out {
        info!("Match timed out after {:.1}s - declaring DRAW", bout.elapsed());
    }
    let result = build_match_result(&bout, timed_out, headless_state.random_seed);
    save_headless_match_log(&bout, &headless_state);
    headless_state.result = Some(result);
    headless_state.match_complete = true;
}

fn build_match_result(bout: &Bout, timed_out: bool, random_seed: Option<u64>) -> MatchResult {
    MatchResult {
        winner: bout.winner(),
        match_time: bout.elapsed(),
        frames: bout.frames(),
        timed_out,
        blue: bout.fighter(Corner::Blue).into(),
        red: bout.fighter(Corner::Red).into(),
        random_seed,
    }
}

fn save_headless_match_log(bout: &Bout, headless_state: &HeadlessMatchState) {
    let Some(path) = headless_state.output_path.as_deref() else {
        return;
    };
    let metadata = bout.metadata(headless_state.random_seed);
    match bout.log().save_to_file(&metadata, path) {
        Ok(()) => println!("Match complete. Log saved to: {}", path.display()),
        Err(e) => eprintln!("Failed to save combat log: {}", e),
    }
}

/// Run a headless match with the given configuration
pub fn run_headless_match(config: &HeadlessMatchConfig) -> Result<MatchResult, String> {
    let match_config = config.to_match_config()?;

    println!("Starting headless match simulation...");
    println!("  Blue: {}", match_config.blue.name());
    println!("  Red: {}", match_config.red.name());
    println!("  Max duration: {:.0}s", config.max_duration_secs);
    if let Some(seed) = config.random_seed {
        println!("  Seed: {}", seed);
    }

    let mut app = App::new();
    // Minimal plugins - no window, no rendering. The app is stepped by hand
    // below, so the schedule runner never drives it.
    app.add_plugins(MinimalPlugins).add_plugins(HeadlessPlugin {
        match_config,
        max_duration: config.max_duration_secs,
        output_path: config.output_path.as_ref().map(PathBuf::from),
        random_seed: config.random_seed,
    });
    app.finish();
    app.cleanup();

    // One extra frame for the timeout check to observe the final step
    let frame_budget = (config.max_duration_secs * FRAMES_PER_SECOND).ceil() as u64 + 2;
    for _ in 0..frame_budget {
        app.update();
        if app.world().resource::<HeadlessMatchState>().match_complete {
            break;
        }
    }

    let result = app
        .world_mut()
        .resource_mut::<HeadlessMatchState>()
        .result
        .take()
        .ok_or_else(|| "Match did not finish within its frame budget".to_string())?;

    print_summary(&result);
    Ok(result)
}

fn print_summary(result: &MatchResult) {
    println!();
    match (result.winner_name(), result.timed_out) {
        (Some(name), _) => println!("Winner: {}", name),
        (None, true) => println!("Result: DRAW (timed out)"),
        (None, false) => println!("Result: DRAW (double knockout)"),
    }
    println!("Duration: {:.2}s ({} frames)", result.match_time, result.frames);
    for fighter in [&result.blue, &result.red] {
        println!(
            "  {:<6} HP {:>3}/{:<3}  dealt {:>4}  taken {:>4}  healed {:>3}  specials {}",
            fighter.name,
            fighter.final_health,
            fighter.max_health,
            fighter.damage_dealt,
            fighter.damage_taken,
            fighter.healing_done,
            fighter.specials_used
        );
    }
}
