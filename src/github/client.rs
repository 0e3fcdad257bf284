use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};

use crate::codeowners::codeowners_url;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::source::CodeownersSource;
use crate::models::{Repository, ResolvedTarget};

/// Only the first page of an organization listing is read.
const REPOS_PER_PAGE: u32 = 100;

pub struct GitHubClient {
    client: Client,
    base_url: String,
    raw_base_url: String,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = &config.github_token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("haggis/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            raw_base_url: config.raw_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get_org_repos(&self, org: &str) -> Result<Vec<Repository>> {
        let url = format!("{}/orgs/{}/repos?per_page={}", self.base_url, org, REPOS_PER_PAGE);
        tracing::info!("Fetching repositories for organization: {}", org);

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("organization '{}'", org)));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transport(format!(
                "Failed to fetch repositories for {}: {} - {}",
                org, status, body
            )));
        }

        let body = response.text().await?;
        let repos: Vec<Repository> = serde_json::from_str(&body)?;
        tracing::debug!("Organization {} lists {} repositories", org, repos.len());
        Ok(repos)
    }

    pub async fn get_repo(&self, owner: &str, repo: &str) -> Result<Repository> {
        let url = format!("{}/repos/{}/{}", self.base_url, owner, repo);
        tracing::debug!("Fetching repository: {}/{}", owner, repo);

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("repository '{}/{}'", owner, repo)));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transport(format!(
                "Failed to fetch repository {}/{}: {} - {}",
                owner, repo, status, body
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn get_codeowners(&self, target: &ResolvedTarget) -> Result<Option<String>> {
        let url = codeowners_url(&self.raw_base_url, target)?;
        tracing::debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "Failed to fetch CODEOWNERS for {}: HTTP {}",
                target,
                response.status()
            )));
        }

        let content = response.text().await.map_err(|e| {
            Error::Transport(format!("Failed to read CODEOWNERS for {}: {}", target, e))
        })?;
        Ok(Some(content))
    }
}

#[async_trait]
impl CodeownersSource for GitHubClient {
    async fn list_repositories(&self, organization: &str) -> Result<Vec<Repository>> {
        self.get_org_repos(organization).await
    }

    async fn get_repository(&self, organization: &str, repository: &str) -> Result<Repository> {
        self.get_repo(organization, repository).await
    }

    async fn fetch_codeowners(&self, target: &ResolvedTarget) -> Result<Option<String>> {
        self.get_codeowners(target).await
    }
}
