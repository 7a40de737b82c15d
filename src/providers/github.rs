use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::Deserialize;

use super::IssueTracker;
use crate::config::RunConfig;
use crate::model::issue::RawIssue;

const PER_PAGE: usize = 100;
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("issuecards/", env!("CARGO_PKG_VERSION"));

pub struct GitHubTracker {
    base_url: String,
    owner: String,
    repository: String,
    auth_header: Option<String>,
    client: reqwest::Client,
}

impl GitHubTracker {
    /// Without a token the client talks to the API anonymously, which works for public repositories.
    pub fn new(
        base_url: String,
        owner: String,
        repository: String,
        access_token: Option<String>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            owner,
            repository,
            auth_header: access_token
                .filter(|t| !t.is_empty())
                .map(|t| format!("Bearer {t}")),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(
            config.api_url.clone(),
            config.owner.clone(),
            config.repository.clone(),
            config.access_token.clone(),
        )
    }

    fn issues_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/issues",
            self.base_url,
            urlencoding::encode(&self.owner),
            urlencoding::encode(&self.repository)
        )
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let request = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        match &self.auth_header {
            Some(auth) => request.header("Authorization", auth),
            None => request,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Turn a non-2xx response into an error that carries GitHub's own message.
async fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => bail!("GitHub API returned {status}: {}", body.message),
        Err(_) => bail!("GitHub API returned {status}"),
    }
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    fn name(&self) -> &str {
        "GitHub"
    }

    async fn list_by_milestone(&self, milestone: &str) -> Result<Vec<RawIssue>> {
        let url = self.issues_url();
        let per_page = PER_PAGE.to_string();
        let mut issues = Vec::new();
        let mut page = 1u32;

        loop {
            let page_param = page.to_string();
            let resp = self
                .get(&url)
                .query(&[
                    ("milestone", milestone),
                    ("state", "all"),
                    ("per_page", per_page.as_str()),
                    ("page", page_param.as_str()),
                ])
                .send()
                .await
                .context("GitHub API request failed")?;
            let resp = check_status(resp).await?;

            let batch: Vec<RawIssue> = resp
                .json()
                .await
                .context("Failed to parse GitHub issue list")?;
            tracing::debug!(page, received = batch.len(), "received issue page");

            let last_page = batch.len() < PER_PAGE;
            issues.extend(batch);
            if last_page {
                break;
            }
            page += 1;
        }

        Ok(issues)
    }

    async fn get_issue(&self, number: u64) -> Result<RawIssue> {
        let url = format!("{}/{number}", self.issues_url());
        tracing::debug!(number, "fetching issue");

        let resp = self
            .get(&url)
            .send()
            .await
            .context("GitHub API request failed")?;
        let resp = check_status(resp).await?;

        resp.json().await.context("Failed to parse GitHub issue")
    }
}
