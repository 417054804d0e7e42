use core_types::WinRatePolicy;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub cache: CacheConfig,
    pub dashboard: DashboardConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Rejects combinations that cannot produce a usable record source.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.source.kind {
            SourceKind::Local if self.source.path.as_os_str().is_empty() => Err(
                ConfigError::ValidationError("source.path must be set for a local source".into()),
            ),
            SourceKind::Sheet if self.source.sheet_id.trim().is_empty() => Err(
                ConfigError::ValidationError("source.sheet_id must be set for a sheet source".into()),
            ),
            _ => Ok(()),
        }
    }
}

/// Where the play records come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SourceKind {
    /// A CSV file on local disk.
    #[default]
    Local,
    /// A published spreadsheet exported as CSV.
    Sheet,
}

/// Identity of the record source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Path of the CSV file when `kind = "local"`.
    pub path: PathBuf,
    /// Spreadsheet id when `kind = "sheet"`.
    pub sheet_id: String,
    /// Optional worksheet (tab) id within the spreadsheet.
    pub gid: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Local,
            path: PathBuf::from("top_plays.csv"),
            sheet_id: String::new(),
            gid: None,
        }
    }
}

/// Refresh policy for loaded records.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a successful load is reused before the source is fetched again.
    #[serde(with = "humantime_serde")]
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
        }
    }
}

/// Defaults for the dashboard queries.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Size of the all-time top performer cohort.
    pub top_n: usize,
    /// How many plays the recent-plays list shows.
    pub recent_limit: usize,
    pub win_rate_policy: WinRatePolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            recent_limit: 10,
            win_rate_policy: WinRatePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to daily-rolling files in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
