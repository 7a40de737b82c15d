pub mod github;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::model::issue::RawIssue;

/// Which issues a run should print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Milestone(String),
    Numbers(Vec<u64>),
}

#[async_trait]
pub trait IssueTracker: Send + Sync {
    fn name(&self) -> &str;
    /// All issues of the milestone, open and closed, in the order the tracker returns them.
    async fn list_by_milestone(&self, milestone: &str) -> Result<Vec<RawIssue>>;
    async fn get_issue(&self, number: u64) -> Result<RawIssue>;
}

/// Fetch the selected issues. Numbers are fetched one by one; the first failure aborts.
pub async fn fetch_issues(tracker: &dyn IssueTracker, selection: &Selection) -> Result<Vec<RawIssue>> {
    match selection {
        Selection::Milestone(milestone) => {
            tracing::info!(tracker = tracker.name(), %milestone, "fetching issues by milestone");
            tracker
                .list_by_milestone(milestone)
                .await
                .with_context(|| format!("Failed to list issues for milestone {milestone}"))
        }
        Selection::Numbers(numbers) => {
            tracing::info!(tracker = tracker.name(), count = numbers.len(), "fetching issues by number");
            let mut issues = Vec::with_capacity(numbers.len());
            for &number in numbers {
                let issue = tracker
                    .get_issue(number)
                    .await
                    .with_context(|| format!("Failed to fetch issue #{number}"))?;
                issues.push(issue);
            }
            Ok(issues)
        }
    }
}
