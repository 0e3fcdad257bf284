use serde::Serialize;

use super::codeowners::CodeownersDocument;

/// Terminal state of one repository within a scan.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RepositoryOutcome {
    BranchFailed { reason: String },
    FetchError { reason: String },
    NotFound,
    Found { document: CodeownersDocument },
}

impl RepositoryOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, RepositoryOutcome::Found { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            RepositoryOutcome::BranchFailed { .. } | RepositoryOutcome::FetchError { .. }
        )
    }

    /// Failure reason for the error states.
    pub fn reason(&self) -> Option<&str> {
        match self {
            RepositoryOutcome::BranchFailed { reason } | RepositoryOutcome::FetchError { reason } => {
                Some(reason)
            }
            _ => None,
        }
    }

    pub fn document(&self) -> Option<&CodeownersDocument> {
        match self {
            RepositoryOutcome::Found { document } => Some(document),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RepositoryReport {
    pub repository: String,
    /// Absent when the branch could not be resolved.
    pub branch: Option<String>,
    #[serde(flatten)]
    pub outcome: RepositoryOutcome,
}

/// Per-repository outcomes of a scan, in listing order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanResult {
    pub organization: String,
    pub repositories: Vec<RepositoryReport>,
}

impl ScanResult {
    pub fn new(organization: &str) -> Self {
        Self {
            organization: organization.to_string(),
            repositories: Vec::new(),
        }
    }

    pub fn record(&mut self, report: RepositoryReport) {
        self.repositories.push(report);
    }

    pub fn get(&self, repository: &str) -> Option<&RepositoryReport> {
        self.repositories.iter().find(|r| r.repository == repository)
    }

    pub fn found(&self) -> impl Iterator<Item = &RepositoryReport> {
        self.repositories.iter().filter(|r| r.outcome.is_found())
    }

    pub fn errors(&self) -> impl Iterator<Item = &RepositoryReport> {
        self.repositories.iter().filter(|r| r.outcome.is_error())
    }

    pub fn found_count(&self) -> usize {
        self.found().count()
    }

    pub fn has_matches(&self) -> bool {
        self.found_count() > 0
    }
}
