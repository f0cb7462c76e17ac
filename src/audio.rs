//! Sound playback
//!
//! Turns [`SoundCue`] events into one-shot audio entities. Cues with no
//! loaded sound, or any cue while sound is disabled, are dropped.

use bevy::prelude::*;

use crate::assets::GameAssets;
use crate::combat::events::SoundCue;
use crate::settings::GameSettings;

pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, play_sound_cues);
    }
}

fn play_sound_cues(
    mut commands: Commands,
    mut cues: EventReader<SoundCue>,
    assets: Res<GameAssets>,
    settings: Res<GameSettings>,
) {
    for cue in cues.read() {
        if !settings.sound_enabled {
            continue;
        }
        if let Some(handle) = assets.sound(*cue) {
            commands.spawn((AudioPlayer::new(handle.clone()), PlaybackSettings::DESPAWN));
        }
    }
}
