//! JSON configuration parsing for headless mode
//!
//! Parses JSON match configurations and converts them to the game's MatchConfig format.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::states::match_config::{FighterProfile, GameMode, MatchConfig};

/// Headless match configuration loaded from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlessMatchConfig {
    /// Blue corner fighter name (default: "Hero")
    #[serde(default = "default_blue")]
    pub blue: String,
    /// Red corner fighter name (default: "Boss")
    #[serde(default = "default_red")]
    pub red: String,
    /// Custom output path for the combat log (optional)
    #[serde(default)]
    pub output_path: Option<String>,
    /// Maximum match duration in seconds before a draw is declared (default: 300)
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: f64,
    /// Random seed for deterministic match reproduction
    #[serde(default)]
    pub random_seed: Option<u64>,
}

fn default_blue() -> String {
    FighterProfile::Hero.name().to_string()
}

fn default_red() -> String {
    FighterProfile::Boss.name().to_string()
}

fn default_max_duration() -> f64 {
    300.0
}

impl Default for HeadlessMatchConfig {
    fn default() -> Self {
        Self {
            blue: default_blue(),
            red: default_red(),
            output_path: None,
            max_duration_secs: default_max_duration(),
            random_seed: None,
        }
    }
}

impl HeadlessMatchConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: HeadlessMatchConfig =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        Self::parse_fighter(&self.blue)?;
        Self::parse_fighter(&self.red)?;

        if !self.max_duration_secs.is_finite() || self.max_duration_secs <= 0.0 {
            return Err("max_duration_secs must be positive".to_string());
        }

        Ok(())
    }

    /// Apply command-line overrides on top of the file's values.
    pub fn with_overrides(
        mut self,
        output_path: Option<String>,
        max_duration_secs: Option<f64>,
        random_seed: Option<u64>,
    ) -> Result<Self, String> {
        if output_path.is_some() {
            self.output_path = output_path;
        }
        if let Some(secs) = max_duration_secs {
            self.max_duration_secs = secs;
        }
        if random_seed.is_some() {
            self.random_seed = random_seed;
        }
        self.validate()?;
        Ok(self)
    }

    fn parse_fighter(name: &str) -> Result<FighterProfile, String> {
        FighterProfile::parse(name).ok_or_else(|| {
            let valid: Vec<&str> = FighterProfile::all().iter().map(|p| p.name()).collect();
            format!("Unknown fighter: '{}'. Valid fighters: {}", name, valid.join(", "))
        })
    }

    /// Convert to the game's MatchConfig format. Both corners are CPU-driven.
    pub fn to_match_config(&self) -> Result<MatchConfig, String> {
        Ok(MatchConfig {
            mode: GameMode::CpuVsCpu,
            blue: Self::parse_fighter(&self.blue)?,
            red: Self::parse_fighter(&self.red)?,
        })
    }
}
