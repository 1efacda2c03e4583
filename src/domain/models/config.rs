use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for a sync run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Store (Notion) connection settings
    #[serde(default)]
    pub notion: NotionConfig,

    /// Where the triggering webhook payload comes from
    #[serde(default)]
    pub github: GitHubConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Notion API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NotionConfig {
    /// Integration token used as the bearer credential
    #[serde(default)]
    pub token: String,

    /// Identifier of the database holding one page per issue
    #[serde(default)]
    pub database_id: String,

    /// API base URL, overridable for tests and proxies
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value sent in the `Notion-Version` header
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Client-side request budget
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

fn default_base_url() -> String {
    "https://api.notion.com".to_string()
}

fn default_api_version() -> String {
    "2022-06-28".to_string()
}

/// Notion documents an average of three requests per second per integration.
const fn default_requests_per_second() -> u32 {
    3
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            database_id: String::new(),
            base_url: default_base_url(),
            api_version: default_api_version(),
            requests_per_second: default_requests_per_second(),
        }
    }
}

/// GitHub event source configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GitHubConfig {
    /// Path to the JSON webhook payload (`GITHUB_EVENT_PATH` on Actions runners)
    #[serde(default)]
    pub event_path: Option<PathBuf>,
}

/// Output format of the stdout log layer
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for an additional JSON log file (stdout only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
        }
    }
}
