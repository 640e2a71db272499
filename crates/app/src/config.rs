use std::time::Duration;

use clap::{Parser, Subcommand};
use services::{Pacing, PacingError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid pacing: {0}")]
    Pacing(#[from] PacingError),
}

#[derive(Debug, Parser)]
#[command(name = "learn", version, about = "Lessons, quizzes, XP and levels")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Milliseconds feedback stays on screen before the next question.
    #[arg(long, env = "QUIZ_ADVANCE_DELAY_MS", default_value_t = 900, global = true)]
    pub advance_delay_ms: u64,

    /// Milliseconds between engagement samples.
    #[arg(long, env = "QUIZ_TICK_MS", default_value_t = 1000, global = true)]
    pub tick_ms: u64,

    /// Open this topic's lesson at launch.
    #[arg(long, env = "QUIZ_TOPIC", global = true)]
    pub topic: Option<String>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, env = "QUIZ_LOG", default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Subcommand)]
pub enum Command {
    /// Interactive terminal quiz (default).
    #[default]
    Play,
    /// JSON lines: user intents on stdin, render commands on stdout.
    Pipe,
    /// Desktop window (requires the `desktop` feature).
    Ui,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub command: Command,
    pub pacing: Pacing,
    pub initial_topic: Option<String>,
    pub log_level: String,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::Pacing` for a zero tick or an oversized delay.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let pacing = Pacing::new(
            Duration::from_millis(cli.advance_delay_ms),
            Duration::from_millis(cli.tick_ms),
        )?;
        let initial_topic = cli
            .topic
            .map(|topic| topic.trim().to_string())
            .filter(|topic| !topic.is_empty());

        Ok(Self {
            command: cli.command.unwrap_or_default(),
            pacing,
            initial_topic,
            log_level: cli.log_level,
        })
    }
}
