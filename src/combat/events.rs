//! Combat events
//!
//! Fire-and-forget notifications from the bout to the presentation layer.

use bevy::prelude::*;

/// A sound the audio sink should play. Missing sounds are skipped silently.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// A normal attack connected
    NormalHit,
    /// A special attack connected
    SpecialHit,
    /// A heal went through
    Heal,
    /// The main menu was entered
    Menu,
}

impl SoundCue {
    /// File name under the assets directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundCue::NormalHit => "attack.wav",
            SoundCue::SpecialHit => "special.wav",
            SoundCue::Heal => "heal.wav",
            SoundCue::Menu => "menu.wav",
        }
    }

    pub fn all() -> [SoundCue; 4] {
        [
            SoundCue::NormalHit,
            SoundCue::SpecialHit,
            SoundCue::Heal,
            SoundCue::Menu,
        ]
    }
}
