//! UI helpers
//!
//! Shared palette, font sizes and egui drawing helpers for the menus, the
//! HUD and the overlays.

use bevy_egui::egui;

/// Common colors used throughout the UI
pub mod colors {
    use bevy::prelude::*;
    use bevy_egui::egui::Color32;

    /// Menu and arena backdrop
    pub const BACKGROUND: Color32 = Color32::from_rgb(28, 28, 38);
    /// Floor strip below the fighters
    pub const GROUND: Color = Color::srgb(32.0 / 255.0, 32.0 / 255.0, 44.0 / 255.0);
    /// Arena fill when no background image is present
    pub const ARENA: Color = Color::srgb(28.0 / 255.0, 28.0 / 255.0, 38.0 / 255.0);
    /// Outline drawn around a guarding fighter
    pub const GUARD_OUTLINE: Color = Color::srgb(120.0 / 255.0, 180.0 / 255.0, 1.0);
    /// Attack hitbox fill
    pub const HITBOX: Color = Color::srgba(230.0 / 255.0, 200.0 / 255.0, 30.0 / 255.0, 0.85);

    pub const TITLE: Color32 = Color32::from_rgb(230, 204, 153);
    pub const TEXT: Color32 = Color32::from_rgb(230, 230, 230);
    pub const MUTED: Color32 = Color32::from_rgb(150, 150, 150);
    pub const SELECTED: Color32 = Color32::from_rgb(230, 200, 30);

    pub const BAR_BACKGROUND: Color32 = Color32::from_rgb(200, 200, 200);
    /// Blue corner health
    pub const HEALTH_BLUE: Color32 = Color32::from_rgb(40, 200, 70);
    /// Red corner health
    pub const HEALTH_RED: Color32 = Color32::from_rgb(200, 40, 40);
    pub const ENERGY_BLUE: Color32 = Color32::from_rgb(50, 130, 255);
    pub const ENERGY_RED: Color32 = Color32::from_rgb(230, 200, 30);
    pub const READY: Color32 = Color32::from_rgb(100, 255, 100);
    pub const COOLING: Color32 = Color32::from_rgb(255, 150, 100);
}

/// Font sizes used throughout the UI
pub mod fonts {
    /// Large title text
    pub const TITLE: f32 = 54.0;
    /// Menu entries and overlay headlines
    pub const HEADER: f32 = 36.0;
    /// Normal body text
    pub const BODY: f32 = 18.0;
    /// Small labels and annotations
    pub const SMALL: f32 = 14.0;
    /// Combat feed text
    pub const COMBAT_LOG: f32 = 12.0;
}

/// Dark panel theme shared by the menus.
pub fn apply_dark_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals.window_fill = colors::BACKGROUND;
    style.visuals.panel_fill = colors::BACKGROUND;
    ctx.set_style(style);
}

/// Filled bar with a grey track and dark border. `fraction` is clamped to 0..=1.
pub fn draw_bar(painter: &egui::Painter, rect: egui::Rect, fraction: f32, fill: egui::Color32) {
    let fraction = fraction.clamp(0.0, 1.0);
    painter.rect_filled(rect, 2.0, colors::BAR_BACKGROUND);
    if fraction > 0.0 {
        let filled = egui::Rect::from_min_size(rect.min, egui::vec2(rect.width() * fraction, rect.height()));
        painter.rect_filled(filled, 2.0, fill);
    }
    painter.rect_stroke(rect, 2.0, egui::Stroke::new(2.0, egui::Color32::BLACK));
}

/// Draw text with a black outline for readability over the arena
pub fn draw_text_with_outline(
    painter: &egui::Painter,
    pos: egui::Pos2,
    text: &str,
    font_id: egui::FontId,
    color: egui::Color32,
    align: egui::Align2,
    outline_size: f32,
) {
    let offsets = [
        (-outline_size, 0.0),
        (outline_size, 0.0),
        (0.0, -outline_size),
        (0.0, outline_size),
    ];

    for (dx, dy) in offsets {
        painter.text(
            egui::pos2(pos.x + dx, pos.y + dy),
            align,
            text,
            font_id.clone(),
            egui::Color32::BLACK,
        );
    }

    painter.text(pos, align, text, font_id, color);
}
