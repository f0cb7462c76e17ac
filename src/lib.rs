//! Duelist - Two-Fighter Arcade Brawler
//!
//! Two fighters share a flat 2D arena: walk, jump, jab, fire a special,
//! guard and heal until one is knocked out. Either corner can be a human on
//! the keyboard or the rule-based CPU.
//!
//! This library exposes the game modules for testing and for the headless
//! simulator.

pub mod assets;
pub mod audio;
pub mod camera;
pub mod cli;
pub mod combat;
pub mod headless;
pub mod keybindings;
pub mod settings;
pub mod states;
pub mod ui;

// Re-export commonly used types
pub use combat::bout::{Bout, FrameInput, MatchPhase, PlayerInput};
pub use combat::fighter::{Corner, Fighter};
pub use combat::log::{CombatLog, CombatLogEventType};
pub use headless::{HeadlessMatchConfig, MatchResult};
pub use states::match_config::{FighterProfile, GameMode, MatchConfig};
