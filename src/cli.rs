use std::path::PathBuf;

use clap::Parser;

use crate::error::{AppError, Result};
use crate::providers::Selection;

const ISSUES_SEPARATOR: char = ',';

/// Render GitHub issues as printable story cards.
#[derive(Parser, Debug, Default)]
#[command(name = "issuecards", version)]
#[command(about = "Render GitHub issues as printable HTML story cards")]
pub struct Cli {
    /// Repository owner
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long)]
    pub repository: Option<String>,

    /// Access token for authenticated access (empty for public repositories)
    #[arg(long = "access-token", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Milestone number
    #[arg(long, default_value = "")]
    pub milestone: String,

    /// Comma-separated issue numbers list
    #[arg(long, default_value = "")]
    pub issues: String,

    /// GitHub API base URL
    #[arg(long = "api-url")]
    pub api_url: Option<String>,

    /// Path to config file (defaults to ~/.issuecards/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Decide which issues to fetch. Explicit numbers take precedence over a milestone.
    pub fn selection(&self) -> Result<Selection> {
        if !self.issues.is_empty() {
            if !self.milestone.is_empty() {
                tracing::warn!(
                    milestone = %self.milestone,
                    "both milestone and issues given, ignoring milestone"
                );
            }
            return Ok(Selection::Numbers(parse_issue_numbers(&self.issues)?));
        }
        if !self.milestone.is_empty() {
            return Ok(Selection::Milestone(self.milestone.clone()));
        }
        Err(AppError::MissingSelector)
    }
}

/// Parse a comma-separated list like `"12,15, 19"` into issue numbers, keeping order.
pub fn parse_issue_numbers(list: &str) -> Result<Vec<u64>> {
    list.split(ISSUES_SEPARATOR)
        .map(|token| {
            token
                .trim()
                .parse::<u64>()
                .map_err(|_| AppError::InvalidIssueNumber(token.to_string()))
        })
        .collect()
}
