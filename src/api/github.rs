//! GitHub REST client: just the commit listing used by `ghcommits`.

use super::error::GithubError;
use crate::config::GithubConfig;
use crate::constants::{GITHUB_API_BASE, GITHUB_TIMEOUT_SECS};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Commit {
    pub sha: String,
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CommitDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CommitAuthor {
    pub name: String,
}

impl Commit {
    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }

    pub fn summary(&self) -> &str {
        self.commit.message.lines().next().unwrap_or("")
    }

    pub fn author_name(&self) -> &str {
        self.commit
            .author
            .as_ref()
            .map(|a| a.name.as_str())
            .unwrap_or("unknown")
    }
}

/// Outcome of a commit listing that reached the API.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitListing {
    Commits(Vec<Commit>),
    /// Any non-200 answer, with its status code.
    Status(u16),
}

#[async_trait]
pub trait CommitSource: Send + Sync {
    /// Most recent commits on the default branch of `owner/repo`.
    async fn recent_commits(&self, full_repo: &str, count: usize)
    -> Result<CommitListing, GithubError>;
}

pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GithubClient {
    pub fn new(cfg: &GithubConfig) -> Result<Self, reqwest::Error> {
        Self::with_base_url(cfg, GITHUB_API_BASE)
    }

    pub fn with_base_url(cfg: &GithubConfig, base_url: &str) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("pve_bot/", env!("CARGO_PKG_VERSION"))),
        );
        if let Some(token) = &cfg.token
            && let Ok(mut value) = HeaderValue::from_str(&format!("Bearer {token}"))
        {
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(GITHUB_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CommitSource for GithubClient {
    #[instrument(level = "debug", target = "github", skip(self))]
    async fn recent_commits(
        &self,
        full_repo: &str,
        count: usize,
    ) -> Result<CommitListing, GithubError> {
        let url = format!("{}/repos/{full_repo}/commits", self.base_url);
        let resp = self
            .http
            .get(url)
            .query(&[("per_page", count)])
            .send()
            .await?;
        if resp.status() != reqwest::StatusCode::OK {
            return Ok(CommitListing::Status(resp.status().as_u16()));
        }
        Ok(CommitListing::Commits(resp.json().await?))
    }
}
