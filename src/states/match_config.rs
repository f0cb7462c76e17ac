//! Match configuration data structures and resource
//!
//! This module defines the data chosen in the main menu and read when the
//! Play Match state builds a bout.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    ARENA_WIDTH, BLUE_SPAWN_X, BOSS_MAX_HEALTH, BOSS_SPAWN_INSET, DEFAULT_MAX_HEALTH,
    RED_SPAWN_INSET,
};
use crate::combat::fighter::Corner;

/// Available fighters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FighterProfile {
    /// Player one's fighter
    Hero,
    /// Player two's fighter in local versus
    Rival,
    /// CPU opponent with a deeper health pool
    Boss,
}

impl FighterProfile {
    pub fn all() -> &'static [FighterProfile] {
        &[FighterProfile::Hero, FighterProfile::Rival, FighterProfile::Boss]
    }

    pub fn name(&self) -> &'static str {
        match self {
            FighterProfile::Hero => "Hero",
            FighterProfile::Rival => "Rival",
            FighterProfile::Boss => "Boss",
        }
    }

    pub fn parse(name: &str) -> Option<FighterProfile> {
        Self::all().iter().copied().find(|p| p.name() == name)
    }

    pub fn max_health(&self) -> i32 {
        match self {
            FighterProfile::Hero | FighterProfile::Rival => DEFAULT_MAX_HEALTH,
            FighterProfile::Boss => BOSS_MAX_HEALTH,
        }
    }

    /// Fill colour used when no sprite is available.
    pub fn color(&self) -> Color {
        match self {
            FighterProfile::Hero => Color::srgb(0.2, 0.51, 1.0),
            FighterProfile::Rival | FighterProfile::Boss => Color::srgb(0.78, 0.16, 0.16),
        }
    }

    /// Optional sprite under the assets directory.
    pub fn sprite_file(&self) -> &'static str {
        match self {
            FighterProfile::Hero => "player1.png",
            FighterProfile::Rival | FighterProfile::Boss => "player2.png",
        }
    }

    /// Starting x (left edge) for this fighter in the given corner.
    pub fn spawn_x(&self, corner: Corner) -> f32 {
        match (corner, self) {
            (Corner::Blue, _) => BLUE_SPAWN_X,
            (Corner::Red, FighterProfile::Boss) => ARENA_WIDTH - BOSS_SPAWN_INSET,
            (Corner::Red, _) => ARENA_WIDTH - RED_SPAWN_INSET,
        }
    }
}

/// Who controls each corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Player one against the CPU boss
    #[default]
    SinglePlayer,
    /// Two players sharing one keyboard
    TwoPlayer,
    /// Both corners CPU-driven (headless runs)
    CpuVsCpu,
}

impl GameMode {
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::SinglePlayer => "Single Player",
            GameMode::TwoPlayer => "Two Players",
            GameMode::CpuVsCpu => "CPU vs CPU",
        }
    }

    pub fn is_human(&self, corner: Corner) -> bool {
        match (self, corner) {
            (GameMode::SinglePlayer, Corner::Blue) => true,
            (GameMode::SinglePlayer, Corner::Red) => false,
            (GameMode::TwoPlayer, _) => true,
            (GameMode::CpuVsCpu, _) => false,
        }
    }
}

/// The match configuration resource
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MatchConfig {
    pub mode: GameMode,
    pub blue: FighterProfile,
    pub red: FighterProfile,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::for_mode(GameMode::default())
    }
}

impl MatchConfig {
    /// Standard line-up for a mode: the boss shows up whenever the CPU plays red.
    pub fn for_mode(mode: GameMode) -> Self {
        let red = match mode {
            GameMode::TwoPlayer => FighterProfile::Rival,
            GameMode::SinglePlayer | GameMode::CpuVsCpu => FighterProfile::Boss,
        };
        Self {
            mode,
            blue: FighterProfile::Hero,
            red,
        }
    }

    pub fn profile(&self, corner: Corner) -> FighterProfile {
        match corner {
            Corner::Blue => self.blue,
            Corner::Red => self.red,
        }
    }
}
