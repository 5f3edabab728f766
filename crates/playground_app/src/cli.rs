use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use playground_core::{ConfigError, Origin, PlaygroundConfig};
use playground_engine::FetchSettings;

use crate::logging::LogDestination;

#[derive(Debug, Parser)]
#[clap(
    name = "sheet_playground",
    about = "Turn a shared spreadsheet URL into its JSON API endpoint and preview the response"
)]
pub struct Args {
    /// Base URL of the sheet API server, e.g. `https://api.example.com`.
    ///
    /// Values without an http(s) scheme are ignored and `--origin` is used instead.
    #[clap(long, env = "SHEET_API_BASE")]
    pub api_base: Option<String>,

    /// Origin the playground is served from, for same-origin deployments.
    #[clap(long)]
    pub origin: Option<String>,

    /// Shareable spreadsheet URL. Leaving it empty submits nothing.
    #[clap(long, default_value = "")]
    pub sheet_url: String,

    /// Rows to skip.
    #[clap(long, default_value = "")]
    pub offset: String,

    /// Maximum number of rows.
    #[clap(long, default_value = "")]
    pub limit: String,

    /// Row selector passed through to the API.
    #[clap(long, default_value = "")]
    pub row: String,

    /// Per-request timeout in seconds.
    #[clap(long, default_value_t = 60)]
    pub timeout_secs: u64,

    #[clap(long, value_enum, default_value = "terminal")]
    pub log_to: LogDestination,

    #[clap(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Args {
    pub fn playground_config(&self) -> Result<PlaygroundConfig, ConfigError> {
        let origin = self.origin.as_deref().map(Origin::parse).transpose()?;
        Ok(PlaygroundConfig::new(self.api_base.as_deref(), origin))
    }

    /// Engine settings for the resolved base. Requests need an absolute base,
    /// so a purely relative configuration is rejected here.
    pub fn fetch_settings(&self, config: &PlaygroundConfig) -> anyhow::Result<FetchSettings> {
        let base_url = config
            .api_base
            .request_base()
            .context("no API base: pass --api-base (or SHEET_API_BASE) or --origin")?;
        Ok(FetchSettings {
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..FetchSettings::with_base_url(base_url)
        })
    }

    /// Longest time to wait for the engine before giving up on a settle.
    pub fn settle_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs) + Duration::from_secs(5)
    }
}
