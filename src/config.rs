use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_RAW_URL: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_CODEOWNERS_PATH: &str = ".github/CODEOWNERS";
pub const DEFAULT_HEAD_PATH: &str = ".git/HEAD";

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub api_base_url: String,
    pub raw_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let github_token = env::var("GITHUB_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let api_base_url = env::var("GITHUB_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let raw_base_url = env::var("GITHUB_RAW_URL")
            .unwrap_or_else(|_| DEFAULT_RAW_URL.to_string());

        for (name, value) in [("GITHUB_API_URL", &api_base_url), ("GITHUB_RAW_URL", &raw_base_url)] {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(Error::Config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, value
                )));
            }
        }

        Ok(Self {
            github_token,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            raw_base_url: raw_base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            api_base_url: DEFAULT_API_URL.to_string(),
            raw_base_url: DEFAULT_RAW_URL.to_string(),
        }
    }
}

/// Inputs for one remote scan, built once per invocation.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub organization: String,
    pub repository: Option<String>,
    pub branch: Option<String>,
    pub verbose: bool,
    pub show_progress: bool,
}

impl ScanConfig {
    pub fn new(
        organization: &str,
        repository: Option<&str>,
        branch: Option<&str>,
        verbose: bool,
    ) -> Result<Self> {
        let organization = organization.trim();
        if organization.is_empty() {
            return Err(Error::Usage(
                "a GitHub organization is required (--org)".to_string(),
            ));
        }

        Ok(Self {
            organization: organization.to_string(),
            repository: non_empty(repository),
            branch: non_empty(branch),
            verbose,
            show_progress: false,
        })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

/// Inputs for reading a CODEOWNERS file from a local checkout.
#[derive(Debug, Clone)]
pub struct LocalConfig {
    pub file: PathBuf,
    pub head_path: PathBuf,
    pub branch: Option<String>,
    pub verbose: bool,
}

impl LocalConfig {
    pub fn new(file: Option<PathBuf>, branch: Option<&str>, verbose: bool) -> Self {
        Self {
            file: file.unwrap_or_else(|| PathBuf::from(DEFAULT_CODEOWNERS_PATH)),
            head_path: PathBuf::from(DEFAULT_HEAD_PATH),
            branch: non_empty(branch),
            verbose,
        }
    }

    pub fn with_head_path(mut self, head_path: impl Into<PathBuf>) -> Self {
        self.head_path = head_path.into();
        self
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
