//! Optional game assets
//!
//! Sprites and sounds are looked up by file name in the assets directory. A
//! file that is not there resolves to [`LoadedAsset::Absent`] and the game
//! falls back to plain shapes or silence, so it runs with no assets at all.

use bevy::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::combat::events::SoundCue;
use crate::states::match_config::FighterProfile;

pub const BACKGROUND_FILE: &str = "background.png";

/// An asset that may or may not exist on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedAsset<T: Asset> {
    Present(Handle<T>),
    Absent,
}

impl<T: Asset> LoadedAsset<T> {
    pub fn handle(&self) -> Option<&Handle<T>> {
        match self {
            LoadedAsset::Present(handle) => Some(handle),
            LoadedAsset::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, LoadedAsset::Present(_))
    }
}

/// Directory Bevy's default asset reader serves files from.
pub fn asset_root() -> PathBuf {
    let base = std::env::var_os("BEVY_ASSET_ROOT")
        .or_else(|| std::env::var_os("CARGO_MANIFEST_DIR"))
        .map(PathBuf::from)
        .or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf))
        })
        .unwrap_or_default();
    base.join("assets")
}

/// Queue `file` for loading if it exists under `root`.
pub fn load_optional<T: Asset>(asset_server: &AssetServer, root: &Path, file: &str) -> LoadedAsset<T> {
    if root.join(file).is_file() {
        LoadedAsset::Present(asset_server.load(file.to_string()))
    } else {
        LoadedAsset::Absent
    }
}

#[derive(Resource, Debug, Clone)]
pub struct GameAssets {
    pub background: LoadedAsset<Image>,
    sprites: HashMap<&'static str, LoadedAsset<Image>>,
    sounds: HashMap<SoundCue, LoadedAsset<AudioSource>>,
}

impl GameAssets {
    /// Every asset absent. Useful for tests and asset-free runs.
    pub fn empty() -> Self {
        Self {
            background: LoadedAsset::Absent,
            sprites: HashMap::new(),
            sounds: HashMap::new(),
        }
    }

    pub fn fighter_sprite(&self, profile: FighterProfile) -> Option<&Handle<Image>> {
        self.sprites
            .get(profile.sprite_file())
            .and_then(LoadedAsset::handle)
    }

    pub fn sound(&self, cue: SoundCue) -> Option<&Handle<AudioSource>> {
        self.sounds.get(&cue).and_then(LoadedAsset::handle)
    }
}

/// Plugin that resolves every optional asset once at startup
pub struct GameAssetsPlugin;

impl Plugin for GameAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GameAssets::empty())
            .add_systems(Startup, load_game_assets);
    }
}

fn load_game_assets(mut commands: Commands, asset_server: Res<AssetServer>) {
    let root = asset_root();

    let mut sprites = HashMap::new();
    for profile in FighterProfile::all() {
        let file = profile.sprite_file();
        sprites
            .entry(file)
            .or_insert_with(|| load_optional(&asset_server, &root, file));
    }

    let sounds: HashMap<SoundCue, LoadedAsset<AudioSource>> = SoundCue::all()
        .into_iter()
        .map(|cue| (cue, load_optional(&asset_server, &root, cue.file_name())))
        .collect();

    let assets = GameAssets {
        background: load_optional(&asset_server, &root, BACKGROUND_FILE),
        sprites,
        sounds,
    };

    let present_sprites = assets.sprites.values().filter(|a| a.is_present()).count();
    let present_sounds = assets.sounds.values().filter(|a| a.is_present()).count();
    info!(
        "Assets from {:?}: {}/{} sprites, {}/{} sounds, background {}",
        root,
        present_sprites,
        assets.sprites.len(),
        present_sounds,
        assets.sounds.len(),
        if assets.background.is_present() { "found" } else { "missing" }
    );

    commands.insert_resource(assets);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_assets_resolve_to_none() {
        let assets = GameAssets::empty();
        assert!(assets.fighter_sprite(FighterProfile::Hero).is_none());
        for cue in SoundCue::all() {
            assert!(assets.sound(cue).is_none());
        }
        assert!(!assets.background.is_present());
    }

    #[test]
    fn test_loaded_asset_handle() {
        let present: LoadedAsset<Image> = LoadedAsset::Present(Handle::default());
        assert!(present.is_present());
        assert!(present.handle().is_some());
        assert!(LoadedAsset::<Image>::Absent.handle().is_none());
    }

    #[test]
    fn test_asset_root_ends_in_assets() {
        assert!(asset_root().ends_with("assets"));
    }
}
