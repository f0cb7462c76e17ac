//! Command-line interface for Duelist
//!
//! Supports both graphical (default) and headless modes.

use clap::Parser;
use std::path::PathBuf;

/// Two-fighter arcade brawler
#[derive(Parser, Debug)]
#[command(name = "duelist")]
#[command(about = "Two-fighter arcade brawler")]
#[command(version)]
pub struct Args {
    /// Run a CPU-vs-CPU match in headless mode with the specified JSON config file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub headless: Option<PathBuf>,

    /// Output path for the combat log (headless mode only)
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Maximum match duration in seconds, overriding the config (headless mode only)
    #[arg(long, value_name = "SECS")]
    pub max_duration: Option<f64>,

    /// Seed the random number generator for a reproducible match
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn parse_args() -> Args {
    Args::parse()
}
