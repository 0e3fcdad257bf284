use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};

use crate::codeowners::{BranchResolver, BranchSource};
use crate::config::ScanConfig;
use crate::error::{Error, Result};
use crate::github::CodeownersSource;
use crate::models::{
    CodeownersDocument, Repository, RepositoryOutcome, RepositoryReport, ResolvedTarget,
    ScanResult,
};

/// Progress notices are `info` in verbose mode and `debug` otherwise.
macro_rules! notice {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            tracing::info!($($arg)+);
        } else {
            tracing::debug!($($arg)+);
        }
    };
}

pub struct OrgScanner {
    source: Arc<dyn CodeownersSource>,
}

impl OrgScanner {
    pub fn new(source: impl CodeownersSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Scans every repository of the organization in listing order.
    ///
    /// A listing failure aborts the scan. Per-repository failures are
    /// recorded and the scan moves on; the scan only fails when no
    /// repository yielded a CODEOWNERS file.
    pub async fn scan(&self, config: &ScanConfig) -> Result<ScanResult> {
        let org = config.organization.as_str();
        let repos = self.source.list_repositories(org).await?;
        tracing::info!("Found {} repositories in {}", repos.len(), org);

        let pb = progress_bar(repos.len() as u64, config.show_progress && !config.verbose);
        let mut result = ScanResult::new(org);

        for repo in &repos {
            pb.set_message(repo.name.clone());
            let report = self.scan_one(org, repo, config.branch.as_deref(), config.verbose).await;
            result.record(report);
            pb.inc(1);
        }

        pb.finish_and_clear();

        if !result.has_matches() {
            return Err(Error::NotFound(format!(
                "no CODEOWNERS files found for organization {}",
                org
            )));
        }

        tracing::info!(
            "CODEOWNERS found in {} of {} repositories",
            result.found_count(),
            result.repositories.len()
        );
        Ok(result)
    }

    /// Scans the single repository named in `config`. Every failure is
    /// fatal, including a missing CODEOWNERS file.
    pub async fn scan_repository(&self, config: &ScanConfig) -> Result<ScanResult> {
        let org = config.organization.as_str();
        let name = config
            .repository
            .as_deref()
            .ok_or_else(|| Error::Usage("no repository given (--repo)".to_string()))?;

        let repo = self.source.get_repository(org, name).await?;
        let branch = BranchResolver::resolve(
            config.branch.as_deref(),
            BranchSource::Remote {
                default_branch: repo.default_branch.as_deref(),
            },
        )?;
        notice!(config.verbose, "Using branch '{}' for repository '{}'", branch, repo.name);

        let target = ResolvedTarget::new(org, &repo.name, &branch);
        let document = self
            .fetch_document(&target)
            .await?
            .ok_or_else(|| Error::NotFound(format!("no CODEOWNERS file in {}", target)))?;

        let mut result = ScanResult::new(org);
        result.record(RepositoryReport {
            repository: repo.name,
            branch: Some(branch),
            outcome: RepositoryOutcome::Found { document },
        });
        Ok(result)
    }

    async fn scan_one(
        &self,
        org: &str,
        repo: &Repository,
        explicit_branch: Option<&str>,
        verbose: bool,
    ) -> RepositoryReport {
        let branch = match BranchResolver::resolve(
            explicit_branch,
            BranchSource::Remote {
                default_branch: repo.default_branch.as_deref(),
            },
        ) {
            Ok(branch) => branch,
            Err(e) => {
                tracing::warn!("Skipping repository {}: {}", repo.name, e);
                return RepositoryReport {
                    repository: repo.name.clone(),
                    branch: None,
                    outcome: RepositoryOutcome::BranchFailed {
                        reason: e.to_string(),
                    },
                };
            }
        };

        notice!(verbose, "Fetching CODEOWNERS from branch '{}' for repository '{}'", branch, repo.name);

        let target = ResolvedTarget::new(org, &repo.name, &branch);
        let outcome = match self.fetch_document(&target).await {
            Ok(Some(document)) => RepositoryOutcome::Found { document },
            Ok(None) => {
                notice!(
                    verbose,
                    "No CODEOWNERS file found in repository '{}' (branch: {})",
                    repo.name,
                    branch
                );
                RepositoryOutcome::NotFound
            }
            Err(e) => {
                tracing::warn!("Failed to fetch CODEOWNERS for repository {}: {}", repo.name, e);
                RepositoryOutcome::FetchError {
                    reason: e.to_string(),
                }
            }
        };

        RepositoryReport {
            repository: repo.name.clone(),
            branch: Some(branch),
            outcome,
        }
    }

    /// A file holding only comments and blank lines counts as absent.
    async fn fetch_document(&self, target: &ResolvedTarget) -> Result<Option<CodeownersDocument>> {
        let Some(raw) = self.source.fetch_codeowners(target).await? else {
            return Ok(None);
        };

        let document = CodeownersDocument::new(raw);
        tracing::debug!(
            "{}: {} bytes, {} entries",
            target,
            document.raw_content().len(),
            document.filtered_lines().len()
        );
        Ok((!document.is_empty()).then_some(document))
    }
}

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} repos {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}
