//! Game settings and configuration
//!
//! Manages user preferences for graphics, sound and controls, persisted to
//! `settings.ron` next to the executable.

use bevy::prelude::*;
use bevy::window::{MonitorSelection, PresentMode, PrimaryWindow, WindowMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use crate::keybindings::Keybindings;

/// User-configurable game settings
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub window_mode: WindowModeOption,
    pub resolution: ResolutionOption,
    pub vsync: bool,
    pub sound_enabled: bool,
    pub keybindings: Keybindings,
}

/// Tracks whether settings have changed and require application restart
#[derive(Resource)]
pub struct PendingSettingsRestart {
    pub restart_required: bool,
    /// Store previous settings to detect what changed
    previous_settings: GameSettings,
}

impl Default for PendingSettingsRestart {
    fn default() -> Self {
        Self {
            restart_required: false,
            previous_settings: GameSettings::default(),
        }
    }
}

impl PendingSettingsRestart {
    /// Update with new settings and determine if restart is needed
    pub fn check_restart_needed(&mut self, new_settings: &GameSettings) -> bool {
        // Only window mode and resolution changes require restart
        let needs_restart = self.previous_settings.window_mode != new_settings.window_mode
            || self.previous_settings.resolution != new_settings.resolution;

        self.previous_settings = new_settings.clone();
        self.restart_required = needs_restart;

        needs_restart
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            window_mode: WindowModeOption::Windowed,
            resolution: ResolutionOption::Arena,
            vsync: true,
            sound_enabled: true,
            keybindings: Keybindings::default(),
        }
    }
}

impl GameSettings {
    fn settings_path() -> PathBuf {
        PathBuf::from("settings.ron")
    }

    /// Load settings from `settings.ron`, or defaults if missing or invalid
    pub fn load() -> Self {
        Self::load_from(&Self::settings_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }
        let settings = match fs::read_to_string(path) {
            Ok(contents) => match ron::from_str::<GameSettings>(&contents) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}", e);
                Self::default()
            }
        };

        for (a, b) in settings.keybindings.conflicts() {
            warn!(
                "Keybinding conflict: '{}' and '{}' share a key",
                a.description(),
                b.description()
            );
        }
        settings
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::settings_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let contents = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, contents)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }

    pub fn present_mode(&self) -> PresentMode {
        if self.vsync {
            PresentMode::AutoVsync
        } else {
            PresentMode::AutoNoVsync
        }
    }
}

/// Window mode options for the UI
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowModeOption {
    Windowed,
    BorderlessFullscreen,
}

impl WindowModeOption {
    pub fn to_bevy(&self) -> WindowMode {
        match self {
            WindowModeOption::Windowed => WindowMode::Windowed,
            WindowModeOption::BorderlessFullscreen => {
                WindowMode::BorderlessFullscreen(MonitorSelection::Current)
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowModeOption::Windowed => "Windowed",
            WindowModeOption::BorderlessFullscreen => "Borderless Fullscreen",
        }
    }

    pub fn all() -> [WindowModeOption; 2] {
        [WindowModeOption::Windowed, WindowModeOption::BorderlessFullscreen]
    }
}

/// Resolution presets. `Arena` matches the playfield one to one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionOption {
    Arena,
    HD720,
    HD1080,
}

impl ResolutionOption {
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            ResolutionOption::Arena => (1000.0, 560.0),
            ResolutionOption::HD720 => (1280.0, 720.0),
            ResolutionOption::HD1080 => (1920.0, 1080.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionOption::Arena => "1000 × 560",
            ResolutionOption::HD720 => "1280 × 720",
            ResolutionOption::HD1080 => "1920 × 1080",
        }
    }

    pub fn all() -> [ResolutionOption; 3] {
        [
            ResolutionOption::Arena,
            ResolutionOption::HD720,
            ResolutionOption::HD1080,
        ]
    }
}

/// Plugin for managing game settings
///
/// Takes the already-loaded settings so `main` can size the window from them.
pub struct SettingsPlugin {
    settings: GameSettings,
}

impl SettingsPlugin {
    pub fn new(settings: GameSettings) -> Self {
        Self { settings }
    }
}

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        let settings = self.settings.clone();

        // Also insert keybindings as a separate resource for easy access
        let keybindings = settings.keybindings.clone();

        app.insert_resource(settings.clone())
            .insert_resource(keybindings)
            .insert_resource(PendingSettingsRestart {
                restart_required: false,
                previous_settings: settings,
            })
            .add_systems(
                Update,
                (save_settings_on_change, apply_runtime_settings, sync_keybindings).chain(),
            );
    }
}

/// Save settings when they change and work out whether a restart is needed
fn save_settings_on_change(
    settings: Res<GameSettings>,
    mut pending_restart: ResMut<PendingSettingsRestart>,
) {
    if settings.is_changed() && !settings.is_added() {
        let needs_restart = pending_restart.check_restart_needed(&settings);

        if let Err(e) = settings.save() {
            error!("Failed to save settings: {}", e);
        } else if needs_restart {
            info!(
                "Settings changed: {:?} @ {:?} (restart required)",
                settings.window_mode, settings.resolution
            );
        } else {
            info!("Settings changed and applied immediately");
        }
    }
}

/// Apply settings that can change at runtime: VSync
fn apply_runtime_settings(
    settings: Res<GameSettings>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    pending_restart: Res<PendingSettingsRestart>,
) {
    if settings.is_changed() && !settings.is_added() && !pending_restart.restart_required {
        if let Ok(mut window) = windows.get_single_mut() {
            if window.present_mode != settings.present_mode() {
                window.present_mode = settings.present_mode();
                info!("Applied VSync: {}", settings.vsync);
            }
        }
    }
}

/// Keep the Keybindings resource in sync with GameSettings
fn sync_keybindings(settings: Res<GameSettings>, mut keybindings: ResMut<Keybindings>) {
    if settings.is_changed() && !settings.is_added() && *keybindings != settings.keybindings {
        *keybindings = settings.keybindings.clone();
        info!("Synced keybindings from settings");
    }
}
