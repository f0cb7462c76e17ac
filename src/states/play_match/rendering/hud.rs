//! In-match HUD: both fighters' bars and cooldowns along the top, a short
//! combat feed and the controls reminder along the bottom.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::combat::bout::Bout;
use crate::combat::constants::{HEAL_COST, SPECIAL_ATTACK_COST};
use crate::combat::fighter::{Corner, Fighter};
use crate::combat::log::CombatLogEventType;
use crate::keybindings::{FighterControl, GameAction, Keybindings};
use crate::states::match_config::GameMode;
use crate::ui::{colors, draw_bar, draw_text_with_outline, fonts};

const PANEL_WIDTH: f32 = 350.0;
const PANEL_MARGIN: f32 = 20.0;
const HEALTH_BAR_HEIGHT: f32 = 22.0;
const ENERGY_BAR_HEIGHT: f32 = 14.0;
const FEED_LINES: usize = 5;

pub fn render_hud(mut contexts: EguiContexts, bout: Res<Bout>, keybindings: Res<Keybindings>) {
    let Some(ctx) = contexts.try_ctx_mut() else { return; };
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Middle,
        egui::Id::new("match_hud"),
    ));
    let screen = ctx.screen_rect();

    for corner in Corner::all() {
        let left = match corner {
            Corner::Blue => screen.left() + PANEL_MARGIN,
            Corner::Red => screen.right() - PANEL_MARGIN - PANEL_WIDTH,
        };
        draw_fighter_panel(&painter, egui::pos2(left, screen.top() + 12.0), bout.fighter(corner), &bout);
    }

    draw_combat_feed(&painter, screen, &bout);

    painter.text(
        egui::pos2(screen.center().x, screen.bottom() - 12.0),
        egui::Align2::CENTER_BOTTOM,
        controls_hint(&keybindings, bout.config().mode),
        egui::FontId::proportional(fonts::SMALL),
        colors::MUTED,
    );
}

fn draw_fighter_panel(painter: &egui::Painter, top_left: egui::Pos2, fighter: &Fighter, bout: &Bout) {
    let (health_color, energy_color) = match fighter.corner {
        Corner::Blue => (colors::HEALTH_BLUE, colors::ENERGY_BLUE),
        Corner::Red => (colors::HEALTH_RED, colors::ENERGY_RED),
    };

    draw_text_with_outline(
        painter,
        top_left,
        &format!("{} ({})", fighter.name, fighter.corner.label()),
        egui::FontId::proportional(fonts::BODY),
        colors::TEXT,
        egui::Align2::LEFT_TOP,
        1.0,
    );

    let health_rect = egui::Rect::from_min_size(
        top_left + egui::vec2(0.0, 28.0),
        egui::vec2(PANEL_WIDTH, HEALTH_BAR_HEIGHT),
    );
    draw_bar(painter, health_rect, fighter.health_fraction(), health_color);
    painter.text(
        health_rect.center(),
        egui::Align2::CENTER_CENTER,
        format!("Health: {}/{}", fighter.health, fighter.max_health),
        egui::FontId::proportional(fonts::SMALL),
        egui::Color32::BLACK,
    );

    let energy_rect = egui::Rect::from_min_size(
        health_rect.left_bottom() + egui::vec2(0.0, 6.0),
        egui::vec2(PANEL_WIDTH, ENERGY_BAR_HEIGHT),
    );
    draw_bar(painter, energy_rect, fighter.energy_fraction(), energy_color);

    let mut cursor = energy_rect.left_bottom() + egui::vec2(0.0, 6.0);
    let abilities = [
        (
            "Special",
            fighter.special_cooldown_remaining(bout.clock()),
            fighter.energy >= SPECIAL_ATTACK_COST,
        ),
        (
            "Heal",
            fighter.heal_cooldown_remaining(bout.clock()),
            fighter.energy >= HEAL_COST,
        ),
    ];
    for (name, remaining, affordable) in abilities {
        let (status, color) = cooldown_label(remaining, affordable);
        let rect = painter.text(
            cursor,
            egui::Align2::LEFT_TOP,
            format!("{}: {}", name, status),
            egui::FontId::proportional(fonts::SMALL),
            color,
        );
        cursor.x = rect.right() + 16.0;
    }

    if fighter.is_defending {
        painter.text(
            egui::pos2(top_left.x + PANEL_WIDTH, top_left.y),
            egui::Align2::RIGHT_TOP,
            "GUARD",
            egui::FontId::proportional(fonts::SMALL),
            egui::Color32::from_rgb(120, 180, 255),
        );
    }
}

fn draw_combat_feed(painter: &egui::Painter, screen: egui::Rect, bout: &Bout) {
    let line_height = fonts::COMBAT_LOG + 4.0;
    let entries = bout.log().recent(FEED_LINES);
    let top = screen.bottom() - 40.0 - line_height * entries.len() as f32;

    for (i, entry) in entries.iter().enumerate() {
        let color = match entry.event_type {
            CombatLogEventType::Damage => egui::Color32::from_rgb(255, 170, 120),
            CombatLogEventType::Healing => colors::READY,
            CombatLogEventType::Knockout => egui::Color32::from_rgb(255, 90, 90),
            CombatLogEventType::MatchEvent => colors::TITLE,
            CombatLogEventType::Action | CombatLogEventType::Defend => colors::TEXT,
        };
        draw_text_with_outline(
            painter,
            egui::pos2(screen.left() + PANEL_MARGIN, top + line_height * i as f32),
            &format!("[{:>5.1}] {}", entry.timestamp, entry.message),
            egui::FontId::monospace(fonts::COMBAT_LOG),
            color,
            egui::Align2::LEFT_TOP,
            1.0,
        );
    }
}

/// "Ready", "no energy", or seconds left.
pub fn cooldown_label(remaining: f64, affordable: bool) -> (String, egui::Color32) {
    if remaining > 0.0 {
        (format!("{:.1}s", remaining), colors::COOLING)
    } else if !affordable {
        ("no energy".to_string(), colors::MUTED)
    } else {
        ("Ready".to_string(), colors::READY)
    }
}

/// One line listing the keys for every human-controlled fighter plus pause.
pub fn controls_hint(keybindings: &Keybindings, mode: GameMode) -> String {
    let mut parts = Vec::new();
    for corner in Corner::all().into_iter().filter(|c| mode.is_human(*c)) {
        let key = |control| keybindings.binding_display(GameAction::Player(corner, control));
        parts.push(format!(
            "{}: {}/{} move, {} jump, {} attack, {} special, {} defend, {} heal",
            corner.label(),
            key(FighterControl::Left),
            key(FighterControl::Right),
            key(FighterControl::Jump),
            key(FighterControl::Attack),
            key(FighterControl::Special),
            key(FighterControl::Defend),
            key(FighterControl::Heal),
        ));
    }
    parts.push(format!(
        "{} pause, {} menu",
        keybindings.binding_display(GameAction::Pause),
        keybindings.binding_display(GameAction::Back)
    ));
    parts.join("   |   ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_label_priorities() {
        assert_eq!(cooldown_label(2.34, true).0, "2.3s");
        assert_eq!(cooldown_label(2.0, false).0, "2.0s");
        assert_eq!(cooldown_label(0.0, false).0, "no energy");
        assert_eq!(cooldown_label(0.0, true), ("Ready".to_string(), colors::READY));
    }

    #[test]
    fn test_controls_hint_lists_human_fighters_only() {
        let keybindings = Keybindings::default();

        let single = controls_hint(&keybindings, GameMode::SinglePlayer);
        assert!(single.contains("Player 1: A/D move"));
        assert!(!single.contains("Player 2"));
        assert!(single.ends_with("P pause, ESC menu"));

        let versus = controls_hint(&keybindings, GameMode::TwoPlayer);
        assert!(versus.contains("Player 2"));

        let spectate = controls_hint(&keybindings, GameMode::CpuVsCpu);
        assert!(!spectate.contains("Player"));
    }
}
