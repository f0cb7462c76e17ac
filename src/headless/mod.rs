//! Headless mode for automated testing
//!
//! Runs a CPU-vs-CPU bout without any graphical output, suitable for
//! balance checks and reproducible simulations.
//!
//! ## Usage
//!
//! ```bash
//! # Run a headless match
//! cargo run --release -- --headless match_config.json --seed 42
//! ```
//!
//! ## JSON Configuration
//!
//! ```json
//! {
//!   "blue": "Hero",
//!   "red": "Boss",
//!   "max_duration_secs": 120,
//!   "random_seed": 42,
//!   "output_path": "logs/bout.json"
//! }
//! ```

pub mod config;
pub mod runner;

pub use config::HeadlessMatchConfig;
pub use runner::{run_headless_match, FighterResult, MatchResult};
