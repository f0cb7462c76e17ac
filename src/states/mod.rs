//! Game state management
//!
//! Defines the core game states and transitions between them.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

pub mod match_config;
pub mod options_ui;
pub mod play_match;

pub use match_config::MatchConfig;

use crate::combat::events::SoundCue;
use crate::keybindings::{GameAction, Keybindings};
use crate::ui::{apply_dark_theme, colors, fonts};
use match_config::GameMode;
use options_ui::options_ui;
use play_match::PlayMatchPlugin;

/// The core game states representing the main screens/modes of the game.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Main menu - entry point, pick a mode
    #[default]
    MainMenu,
    /// Options menu - video/audio settings and controls
    Options,
    /// Active bout
    PlayMatch,
}

/// Plugin for managing game states and transitions
pub struct StatesPlugin;

impl Plugin for StatesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MatchConfig>()
            .init_resource::<MenuSelection>()
            .add_systems(OnEnter(GameState::MainMenu), play_menu_sound)
            .add_systems(Update, main_menu_ui.run_if(in_state(GameState::MainMenu)))
            .add_systems(Update, options_ui.run_if(in_state(GameState::Options)))
            .add_systems(Update, handle_escape_key)
            .add_plugins(PlayMatchPlugin);
    }
}

// ============================================================================
// Main Menu (egui)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    SinglePlayer,
    TwoPlayers,
    Options,
    Exit,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 4] = [
        MenuEntry::SinglePlayer,
        MenuEntry::TwoPlayers,
        MenuEntry::Options,
        MenuEntry::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuEntry::SinglePlayer => "SINGLE PLAYER",
            MenuEntry::TwoPlayers => "TWO PLAYERS",
            MenuEntry::Options => "OPTIONS",
            MenuEntry::Exit => "EXIT",
        }
    }
}

/// Highlighted main menu entry, moved with the keyboard.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MenuSelection(pub usize);

impl MenuSelection {
    pub fn up(&mut self) {
        self.0 = (self.0 + MenuEntry::ALL.len() - 1) % MenuEntry::ALL.len();
    }

    pub fn down(&mut self) {
        self.0 = (self.0 + 1) % MenuEntry::ALL.len();
    }

    pub fn entry(&self) -> MenuEntry {
        MenuEntry::ALL[self.0 % MenuEntry::ALL.len()]
    }
}

fn play_menu_sound(mut sounds: EventWriter<SoundCue>) {
    sounds.send(SoundCue::Menu);
}

fn main_menu_ui(
    mut contexts: EguiContexts,
    keyboard: Res<ButtonInput<KeyCode>>,
    keybindings: Res<Keybindings>,
    mut selection: ResMut<MenuSelection>,
    mut config: ResMut<MatchConfig>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit_events: EventWriter<AppExit>,
) {
    if keybindings.action_just_pressed(GameAction::MenuUp, &keyboard) {
        selection.up();
    }
    if keybindings.action_just_pressed(GameAction::MenuDown, &keyboard) {
        selection.down();
    }
    let mut chosen = keybindings
        .action_just_pressed(GameAction::Confirm, &keyboard)
        .then(|| selection.entry());

    let Some(ctx) = contexts.try_ctx_mut() else { return; };
    apply_dark_theme(ctx);

    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(colors::BACKGROUND))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(90.0);

                ui.heading(
                    egui::RichText::new("DUELIST")
                        .size(fonts::TITLE)
                        .color(colors::TITLE),
                );

                ui.add_space(60.0);

                let button_size = egui::vec2(320.0, 50.0);
                for (i, entry) in MenuEntry::ALL.iter().enumerate() {
                    let is_selected = selection.0 == i;
                    let button = egui::Button::new(
                        egui::RichText::new(entry.label())
                            .size(fonts::HEADER * 0.8)
                            .color(if is_selected { colors::SELECTED } else { colors::TEXT }),
                    )
                    .fill(if is_selected {
                        egui::Color32::from_rgb(60, 60, 80)
                    } else {
                        egui::Color32::from_rgb(40, 40, 50)
                    });

                    let response = ui.add_sized(button_size, button);
                    if response.hovered() {
                        selection.0 = i;
                    }
                    if response.clicked() {
                        chosen = Some(*entry);
                    }
                    ui.add_space(10.0);
                }
            });

            ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
                ui.add_space(20.0);
                ui.label(
                    egui::RichText::new(format!(
                        "{} / {} - Menu, {} - Select",
                        keybindings.binding_display(GameAction::MenuUp),
                        keybindings.binding_display(GameAction::MenuDown),
                        keybindings.binding_display(GameAction::Confirm),
                    ))
                    .size(fonts::SMALL)
                    .color(colors::MUTED),
                );
            });
        });

    let Some(entry) = chosen else { return; };
    match entry {
        MenuEntry::SinglePlayer | MenuEntry::TwoPlayers => {
            let mode = if entry == MenuEntry::SinglePlayer {
                GameMode::SinglePlayer
            } else {
                GameMode::TwoPlayer
            };
            *config = MatchConfig::for_mode(mode);
            info!("{} selected - transitioning to PlayMatch", mode.name());
            next_state.set(GameState::PlayMatch);
        }
        MenuEntry::Options => {
            info!("Options selected - transitioning to Options");
            next_state.set(GameState::Options);
        }
        MenuEntry::Exit => {
            info!("Exit selected - quitting application");
            exit_events.send(AppExit::Success);
        }
    }
}

/// Esc leaves Options for the menu and quits from the menu.
/// PlayMatch handles its own Esc.
fn handle_escape_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    keybindings: Res<Keybindings>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit_events: EventWriter<AppExit>,
) {
    if !keybindings.action_just_pressed(GameAction::Back, &keyboard) {
        return;
    }
    match current_state.get() {
        GameState::MainMenu => {
            info!("Back pressed in main menu - quitting application");
            exit_events.send(AppExit::Success);
        }
        GameState::Options => {
            next_state.set(GameState::MainMenu);
        }
        GameState::PlayMatch => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_selection_wraps() {
        let mut selection = MenuSelection::default();
        assert_eq!(selection.entry(), MenuEntry::SinglePlayer);

        selection.up();
        assert_eq!(selection.entry(), MenuEntry::Exit);

        selection.down();
        selection.down();
        assert_eq!(selection.entry(), MenuEntry::TwoPlayers);
    }
}
