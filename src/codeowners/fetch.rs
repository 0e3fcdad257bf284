use std::path::Path;

use url::Url;

use crate::error::{Error, Result};
use crate::models::ResolvedTarget;

pub const CODEOWNERS_SUBPATH: &str = ".github/CODEOWNERS";

/// Raw-content URL of the CODEOWNERS file on the target's branch. Each
/// segment is percent-encoded; `/` inside a branch name stays a separator.
pub fn codeowners_url(raw_base_url: &str, target: &ResolvedTarget) -> Result<Url> {
    let mut url = Url::parse(raw_base_url)?;
    url.path_segments_mut()
        .map_err(|_| Error::Config(format!("'{}' cannot be a base URL", raw_base_url)))?
        .pop_if_empty()
        .push(&target.organization)
        .push(&target.repository)
        .extend(target.branch.split('/'))
        .extend(CODEOWNERS_SUBPATH.split('/'));
    Ok(url)
}

/// Reads a named CODEOWNERS file. A missing file is an error here: the
/// caller asked for that exact path.
pub fn read_local_codeowners(path: &Path) -> Result<String> {
    tracing::debug!("Reading CODEOWNERS file: {}", path.display());
    std::fs::read_to_string(path).map_err(|source| Error::LocalFile {
        path: path.to_path_buf(),
        source,
    })
}
