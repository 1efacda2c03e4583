use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = ".notion-issue-sync.yaml";

/// Prefix for environment overrides, e.g. `NOTION_ISSUE_SYNC_LOGGING__LEVEL`.
pub const ENV_PREFIX: &str = "NOTION_ISSUE_SYNC_";

/// GitHub Actions `with:` inputs and the config keys they populate.
const ACTION_INPUTS: [(&str, &str); 2] = [
    ("INPUT_NOTION-TOKEN", "notion.token"),
    ("INPUT_NOTION-DB", "notion.database_id"),
];

/// Set by the Actions runner to the webhook payload file.
const EVENT_PATH_VAR: &str = "GITHUB_EVENT_PATH";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Notion token is empty. Set the `notion-token` input or notion.token")]
    EmptyToken,

    #[error("Notion database id is empty. Set the `notion-db` input or notion.database_id")]
    EmptyDatabaseId,

    #[error("No event payload path. Set GITHUB_EVENT_PATH or github.event_path")]
    MissingEventPath,

    #[error("Invalid requests_per_second: {0}. Must be positive")]
    InvalidRateLimit(u32),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Config file not found: {0}")]
    MissingFile(PathBuf),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. YAML file: `config_path`, or `.notion-issue-sync.yaml` if present
    /// 3. GitHub Actions inputs (`INPUT_NOTION-TOKEN`, `INPUT_NOTION-DB`)
    /// 4. `GITHUB_EVENT_PATH`
    /// 5. Environment variables (`NOTION_ISSUE_SYNC_*` prefix, `__` nesting)
    /// 6. `event_path` passed on the command line
    pub fn load(config_path: Option<&Path>, event_path: Option<&Path>) -> Result<Config> {
        let config: Config = Self::figment(config_path, event_path)?
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Build the merged figment without extracting or validating it.
    pub fn figment(config_path: Option<&Path>, event_path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        figment = match config_path {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::MissingFile(path.to_path_buf()).into());
                }
                figment.merge(Yaml::file(path))
            }
            None => figment.merge(Yaml::file(DEFAULT_CONFIG_FILE)),
        };

        // Inputs are merged as literal strings so numeric-looking ids stay strings.
        for (var, key) in ACTION_INPUTS {
            if let Some(value) = non_empty_var(var) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }
        if let Some(path) = non_empty_var(EVENT_PATH_VAR) {
            figment = figment.merge(Serialized::default("github.event_path", path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        if let Some(path) = event_path {
            figment = figment.merge(Serialized::default("github.event_path", path));
        }
        Ok(figment)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.notion.token.trim().is_empty() {
            return Err(ConfigError::EmptyToken);
        }

        if config.notion.database_id.trim().is_empty() {
            return Err(ConfigError::EmptyDatabaseId);
        }

        if config
            .github
            .event_path
            .as_ref()
            .is_none_or(|path| path.as_os_str().is_empty())
        {
            return Err(ConfigError::MissingEventPath);
        }

        if config.notion.requests_per_second == 0 {
            return Err(ConfigError::InvalidRateLimit(
                config.notion.requests_per_second,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
