//! Combat logging
//!
//! Records what happened during a bout for the HUD feed and for headless
//! reports.

use serde::Serialize;
use std::path::Path;

/// A single entry in the combat log
#[derive(Debug, Clone, Serialize)]
pub struct CombatLogEntry {
    /// Seconds of match time since the bout started
    pub timestamp: f64,
    pub event_type: CombatLogEventType,
    /// Human-readable description of the event
    pub message: String,
}

/// Types of combat log events for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CombatLogEventType {
    /// A strike that connected
    Damage,
    /// Health restored by a heal
    Healing,
    /// An action fired (including misses)
    Action,
    /// A guard was raised
    Defend,
    /// Knockout
    Knockout,
    /// Match event (start, pause, end)
    MatchEvent,
}

/// Final state of one fighter, written alongside the log.
#[derive(Debug, Clone, Serialize)]
pub struct FighterMetadata {
    pub name: String,
    pub max_health: i32,
    pub final_health: i32,
    pub final_energy: i32,
    pub damage_dealt: i32,
    pub damage_taken: i32,
    pub healing_done: i32,
    pub final_position: (f32, f32),
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchMetadata {
    /// Winner's name, `None` for a draw or timeout
    pub winner: Option<String>,
    pub duration_secs: f64,
    pub random_seed: Option<u64>,
    pub fighters: Vec<FighterMetadata>,
}

#[derive(Serialize)]
struct SavedLog<'a> {
    metadata: &'a MatchMetadata,
    entries: &'a [CombatLogEntry],
}

#[derive(Debug, Clone, Default)]
pub struct CombatLog {
    /// All log entries in chronological order
    pub entries: Vec<CombatLogEntry>,
}

impl CombatLog {
    pub fn log(&mut self, timestamp: f64, event_type: CombatLogEventType, message: String) {
        self.entries.push(CombatLogEntry {
            timestamp,
            event_type,
            message,
        });
    }

    pub fn filter_by_type(&self, event_type: CombatLogEventType) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Get the last N entries, oldest first
    pub fn recent(&self, count: usize) -> Vec<&CombatLogEntry> {
        self.entries.iter().rev().take(count).rev().collect()
    }

    /// Write the log and match summary as pretty JSON.
    pub fn save_to_file(&self, metadata: &MatchMetadata, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
        let saved = SavedLog {
            metadata,
            entries: &self.entries,
        };
        let json = serde_json::to_string_pretty(&saved)
            .map_err(|e| format!("Failed to serialize combat log: {}", e))?;
        std::fs::write(path, json)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    }
}
