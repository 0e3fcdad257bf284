use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Repository, ResolvedTarget};

/// Remote capability the scanner drives: list repositories and read the
/// CODEOWNERS file at a resolved target.
#[async_trait]
pub trait CodeownersSource: Send + Sync {
    async fn list_repositories(&self, organization: &str) -> Result<Vec<Repository>>;
    async fn get_repository(&self, organization: &str, repository: &str) -> Result<Repository>;
    /// `Ok(None)` means the file does not exist on that branch.
    async fn fetch_codeowners(&self, target: &ResolvedTarget) -> Result<Option<String>>;
}
