//! CLI configuration

use std::path::PathBuf;

use anyhow::bail;
use clap::{Args, ValueEnum};
use kitline::roster::JerseyDisplay;

/// Log output format.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "warn", global = true)]
    pub(crate) log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub(crate) log_format: LogFormat,
}

/// Name printed on jerseys.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum JerseyDisplayMode {
    /// Each player's name.
    PlayerName,

    /// The team name for everyone; requires `--team-name`.
    TeamName,

    /// No name.
    None,
}

/// Settings shared by every command.
#[derive(Debug, Args)]
pub(crate) struct AppConfig {
    /// Directory holding `catalog/`, `orders/` and `designs/` fixture files
    #[arg(long, env = "KITLINE_FIXTURES", default_value = "./fixtures", global = true)]
    pub(crate) fixtures: PathBuf,

    /// Fixture set name
    #[arg(long, env = "KITLINE_FIXTURE_SET", default_value = "club", global = true)]
    pub(crate) fixture_set: String,

    /// Expected catalog currency (ISO 4217)
    #[arg(long, env = "KITLINE_CURRENCY", default_value = "CLP", global = true)]
    pub(crate) currency: String,

    /// Jersey name policy
    #[arg(
        long,
        env = "KITLINE_JERSEY_DISPLAY",
        value_enum,
        default_value_t = JerseyDisplayMode::PlayerName,
        global = true
    )]
    pub(crate) jersey_display: JerseyDisplayMode,

    /// Team name printed when the jersey policy is `team-name`
    #[arg(long, env = "KITLINE_TEAM_NAME", global = true)]
    pub(crate) team_name: Option<String>,

    #[command(flatten)]
    pub(crate) logging: LoggingConfig,
}

impl AppConfig {
    /// Jersey display policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the team-name policy is selected without a team name.
    pub(crate) fn jersey_display(&self) -> anyhow::Result<JerseyDisplay> {
        Ok(match self.jersey_display {
            JerseyDisplayMode::PlayerName => JerseyDisplay::PlayerName,
            JerseyDisplayMode::None => JerseyDisplay::None,
            JerseyDisplayMode::TeamName => {
                let Some(team) = self.team_name.as_deref().filter(|t| !t.trim().is_empty()) else {
                    bail!("--jersey-display team-name requires --team-name");
                };

                JerseyDisplay::TeamName(team.trim().to_string())
            }
        })
    }
}
