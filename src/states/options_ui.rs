//! Options screen
//!
//! Video and sound settings plus a read-only list of the current controls.
//! Changes land in [`GameSettings`], which saves itself.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use super::GameState;
use crate::keybindings::GameAction;
use crate::settings::{GameSettings, PendingSettingsRestart, ResolutionOption, WindowModeOption};
use crate::ui::{apply_dark_theme, colors, fonts};

pub fn options_ui(
    mut contexts: EguiContexts,
    mut next_state: ResMut<NextState<GameState>>,
    mut settings: ResMut<GameSettings>,
    pending_restart: Res<PendingSettingsRestart>,
) {
    let Some(ctx) = contexts.try_ctx_mut() else { return; };
    apply_dark_theme(ctx);

    egui::CentralPanel::default()
        .frame(
            egui::Frame::none()
                .fill(colors::BACKGROUND)
                .inner_margin(egui::Margin::same(20.0)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(egui::RichText::new("← BACK").size(20.0)).clicked() {
                    next_state.set(GameState::MainMenu);
                }
                ui.add_space(20.0);
                ui.heading(
                    egui::RichText::new("OPTIONS")
                        .size(fonts::HEADER)
                        .color(colors::TITLE),
                );
            });

            ui.add_space(20.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.columns(2, |columns| {
                    display_section(&mut columns[0], &mut settings, pending_restart.restart_required);
                    controls_section(&mut columns[1], &mut settings);
                });
            });
        });
}

fn section_title(ui: &mut egui::Ui, title: &str, note: Option<&str>) {
    ui.label(egui::RichText::new(title).size(22.0).color(colors::TITLE));
    if let Some(note) = note {
        ui.label(egui::RichText::new(note).size(fonts::SMALL).color(colors::MUTED));
    }
    ui.add_space(6.0);
}

fn choice_button(ui: &mut egui::Ui, label: &str, is_selected: bool) -> bool {
    let button = egui::Button::new(
        egui::RichText::new(label)
            .size(16.0)
            .color(if is_selected {
                egui::Color32::WHITE
            } else {
                egui::Color32::from_rgb(180, 180, 180)
            }),
    )
    .min_size(egui::vec2(140.0, 34.0))
    .fill(if is_selected {
        egui::Color32::from_rgb(60, 60, 80)
    } else {
        egui::Color32::from_rgb(40, 40, 50)
    });
    ui.add(button).clicked()
}

fn display_section(ui: &mut egui::Ui, settings: &mut ResMut<GameSettings>, restart_required: bool) {
    ui.group(|ui| {
        section_title(ui, "Window Mode", Some("(Requires restart)"));
        ui.horizontal_wrapped(|ui| {
            for mode in WindowModeOption::all() {
                if choice_button(ui, mode.as_str(), settings.window_mode == mode) {
                    settings.window_mode = mode;
                }
            }
        });
    });

    ui.add_space(12.0);

    ui.group(|ui| {
        section_title(ui, "Resolution", Some("(Requires restart • Windowed mode only)"));
        ui.horizontal_wrapped(|ui| {
            for resolution in ResolutionOption::all() {
                if choice_button(ui, resolution.as_str(), settings.resolution == resolution) {
                    settings.resolution = resolution;
                }
            }
        });
    });

    ui.add_space(12.0);

    ui.group(|ui| {
        section_title(ui, "VSync", Some("Applied immediately"));
        let mut vsync = settings.vsync;
        let label = if vsync { "On" } else { "Off" };
        if ui.checkbox(&mut vsync, label).changed() {
            settings.vsync = vsync;
            info!("VSync toggled to: {}", vsync);
        }
    });

    ui.add_space(12.0);

    ui.group(|ui| {
        section_title(ui, "Sound", None);
        let mut sound = settings.sound_enabled;
        let label = if sound { "On" } else { "Off" };
        if ui.checkbox(&mut sound, label).changed() {
            settings.sound_enabled = sound;
            info!("Sound toggled to: {}", sound);
        }
    });

    if restart_required {
        ui.add_space(20.0);
        ui.label(
            egui::RichText::new("⚠ Restart required for window changes to apply")
                .size(16.0)
                .color(egui::Color32::from_rgb(230, 170, 80)),
        );
    }
}

fn controls_section(ui: &mut egui::Ui, settings: &mut ResMut<GameSettings>) {
    ui.group(|ui| {
        section_title(ui, "Controls", Some("Edit settings.ron to remap"));

        let mut current_category = "";
        egui::Grid::new("controls_grid")
            .num_columns(2)
            .spacing([24.0, 4.0])
            .show(ui, |ui| {
                for action in GameAction::all() {
                    let category = action.category();
                    if category != current_category {
                        current_category = category;
                        ui.label(
                            egui::RichText::new(category)
                                .size(fonts::BODY)
                                .color(colors::SELECTED),
                        );
                        ui.end_row();
                    }
                    ui.label(egui::RichText::new(action.description()).size(fonts::SMALL));
                    ui.label(
                        egui::RichText::new(settings.keybindings.binding_display(action))
                            .size(fonts::SMALL)
                            .color(colors::TEXT),
                    );
                    ui.end_row();
                }
            });

        ui.add_space(10.0);
        if ui.button("Reset to defaults").clicked() {
            settings.keybindings.reset_to_defaults();
            info!("Keybindings reset to defaults");
        }
    });
}
