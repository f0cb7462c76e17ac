//! Full-screen overlays drawn above the HUD: pause and game over.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::combat::bout::{Bout, MatchPhase};
use crate::combat::fighter::Corner;
use crate::keybindings::{GameAction, Keybindings};
use crate::ui::{colors, draw_text_with_outline, fonts};

fn overlay_painter(ctx: &egui::Context, id: &'static str, dim_alpha: u8) -> (egui::Painter, egui::Rect) {
    let painter = ctx.layer_painter(egui::LayerId::new(egui::Order::Foreground, egui::Id::new(id)));
    let screen = ctx.screen_rect();
    painter.rect_filled(screen, 0.0, egui::Color32::from_black_alpha(dim_alpha));
    (painter, screen)
}

pub fn render_pause_overlay(mut contexts: EguiContexts, bout: Res<Bout>, keybindings: Res<Keybindings>) {
    if bout.phase() != MatchPhase::Paused {
        return;
    }
    let Some(ctx) = contexts.try_ctx_mut() else { return; };
    let (painter, screen) = overlay_painter(ctx, "pause_overlay", 160);

    draw_text_with_outline(
        &painter,
        screen.center() - egui::vec2(0.0, 30.0),
        "PAUSED",
        egui::FontId::proportional(fonts::TITLE),
        colors::SELECTED,
        egui::Align2::CENTER_CENTER,
        2.0,
    );
    painter.text(
        screen.center() + egui::vec2(0.0, 30.0),
        egui::Align2::CENTER_CENTER,
        format!(
            "{} - Resume    {} - Main Menu",
            keybindings.binding_display(GameAction::Pause),
            keybindings.binding_display(GameAction::Back)
        ),
        egui::FontId::proportional(fonts::BODY),
        colors::TEXT,
    );
}

pub fn render_game_over_overlay(mut contexts: EguiContexts, bout: Res<Bout>, keybindings: Res<Keybindings>) {
    let MatchPhase::GameOver { winner } = bout.phase() else { return; };
    let Some(ctx) = contexts.try_ctx_mut() else { return; };
    let (painter, screen) = overlay_painter(ctx, "game_over_overlay", 200);

    let headline = match winner {
        Some(corner) => format!("{} wins!", bout.fighter(corner).name),
        None => "Draw!".to_string(),
    };
    draw_text_with_outline(
        &painter,
        screen.center() - egui::vec2(0.0, 90.0),
        &headline,
        egui::FontId::proportional(fonts::TITLE),
        colors::SELECTED,
        egui::Align2::CENTER_CENTER,
        2.0,
    );
    painter.text(
        screen.center() - egui::vec2(0.0, 40.0),
        egui::Align2::CENTER_CENTER,
        format!("Match time {:.1}s", bout.elapsed()),
        egui::FontId::proportional(fonts::BODY),
        colors::MUTED,
    );

    for (row, corner) in Corner::all().into_iter().enumerate() {
        let fighter = bout.fighter(corner);
        let color = if winner == Some(corner) { colors::READY } else { colors::TEXT };
        painter.text(
            screen.center() + egui::vec2(0.0, row as f32 * 26.0),
            egui::Align2::CENTER_CENTER,
            format!(
                "{}: {} / {} HP, dealt {}, taken {}, healed {}",
                fighter.name,
                fighter.health,
                fighter.max_health,
                fighter.stats.damage_dealt,
                fighter.stats.damage_taken,
                fighter.stats.healing_done
            ),
            egui::FontId::proportional(fonts::BODY),
            color,
        );
    }

    painter.text(
        screen.center() + egui::vec2(0.0, 90.0),
        egui::Align2::CENTER_CENTER,
        format!(
            "{} - Rematch    {} - Main Menu",
            keybindings.binding_display(GameAction::Restart),
            keybindings.binding_display(GameAction::Back)
        ),
        egui::FontId::proportional(fonts::BODY),
        colors::TEXT,
    );
}
