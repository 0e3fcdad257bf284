use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub default_branch: Option<String>,
}

impl Repository {
    pub fn new(name: impl Into<String>, default_branch: Option<&str>) -> Self {
        Self {
            name: name.into(),
            default_branch: default_branch.map(str::to_string),
        }
    }
}

/// Coordinates of a single CODEOWNERS fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTarget {
    pub organization: String,
    pub repository: String,
    pub branch: String,
}

impl ResolvedTarget {
    pub fn new(organization: &str, repository: &str, branch: &str) -> Self {
        Self {
            organization: organization.to_string(),
            repository: repository.to_string(),
            branch: branch.to_string(),
        }
    }
}

impl std::fmt::Display for ResolvedTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}@{}", self.organization, self.repository, self.branch)
    }
}
