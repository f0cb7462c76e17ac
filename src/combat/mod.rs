//! Combat system
//!
//! Implements the rules of a bout, independent of rendering:
//! - Fighters: movement, gravity, attacks, guard, heal, regeneration
//! - The CPU decision policy
//! - The match loop (pause, knockout, rematch)
//! - Combat logging

use bevy::prelude::*;

pub mod ai;
pub mod bout;
pub mod clock;
pub mod constants;
pub mod events;
pub mod fighter;
pub mod hitbox;
pub mod log;
pub mod rng;

use constants::FRAMES_PER_SECOND;
use events::SoundCue;
use rng::GameRng;

/// Plugin for the combat system
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app
            // Combat events
            .add_event::<SoundCue>()
            // Fixed-step bout simulation
            .insert_resource(Time::<Fixed>::from_hz(FRAMES_PER_SECOND));

        // A seeded RNG inserted before this plugin wins
        if !app.world().contains_resource::<GameRng>() {
            app.insert_resource(GameRng::from_entropy());
        }
    }
}
