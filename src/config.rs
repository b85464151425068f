//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "workout-timer")]
#[command(about = "Run a timed workout session from a template file")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Path to the workout template JSON file
    pub template: PathBuf,

    /// Append completed-workout records to this JSONL file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Start the countdown immediately instead of waiting for `start`
    #[arg(short, long)]
    pub auto_start: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
