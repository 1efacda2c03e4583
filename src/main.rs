//! notion-issue-sync entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use notion_issue_sync::application;
use notion_issue_sync::domain::models::SyncOutcome;
use notion_issue_sync::infrastructure::config::ConfigLoader;
use notion_issue_sync::infrastructure::logging::LoggerImpl;

/// Mirror a GitHub issue event into a Notion database.
#[derive(Debug, Parser)]
#[command(name = "notion-issue-sync", version, about)]
struct Cli {
    /// YAML config file (defaults to ./.notion-issue-sync.yaml when present)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Webhook payload to process
    #[arg(long, value_name = "PATH", env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,
}

async fn execute(cli: Cli) -> Result<SyncOutcome> {
    let config = ConfigLoader::load(cli.config.as_deref(), cli.event_path.as_deref())?;
    let _logger = LoggerImpl::init(&config.logging)?;
    application::run(&config).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match execute(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = format!("{err:#}"), "Sync failed");
            if std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true") {
                println!("::error::{}", workflow_escape(&format!("{err:#}")));
            } else {
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Escape a message for a workflow command (`%`, CR and LF are reserved).
fn workflow_escape(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
