use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// The head marker is a single short line.
const HEAD_READ_LIMIT: u64 = 1024;

/// Where to look for a branch when no explicit override is given.
#[derive(Debug, Clone, Copy)]
pub enum BranchSource<'a> {
    /// Default branch reported by a remote repository listing.
    Remote { default_branch: Option<&'a str> },
    /// Head marker of a local checkout.
    Local { head_path: &'a Path },
}

pub struct BranchResolver;

impl BranchResolver {
    /// Resolution is purely textual: an explicit branch is returned
    /// verbatim without checking that it exists.
    pub fn resolve(explicit: Option<&str>, source: BranchSource<'_>) -> Result<String> {
        if let Some(branch) = explicit.filter(|b| !b.is_empty()) {
            return Ok(branch.to_string());
        }

        match source {
            BranchSource::Remote { default_branch } => default_branch
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .map(str::to_string)
                .ok_or_else(|| {
                    Error::Resolution(
                        "repository does not report a default branch".to_string(),
                    )
                }),
            BranchSource::Local { head_path } => read_head_marker(head_path),
        }
    }
}

/// Reads a `.git/HEAD` style marker. A symbolic ref yields the branch
/// name; a detached head yields the trimmed commit id.
pub fn read_head_marker(path: &Path) -> Result<String> {
    tracing::debug!("Reading head marker from {}", path.display());

    let file = File::open(path).map_err(|e| {
        Error::Resolution(format!("could not open {}: {}", path.display(), e))
    })?;

    let mut buffer = Vec::new();
    file.take(HEAD_READ_LIMIT)
        .read_to_end(&mut buffer)
        .map_err(|e| Error::Resolution(format!("could not read {}: {}", path.display(), e)))?;

    let content = String::from_utf8(buffer).map_err(|_| {
        Error::Resolution(format!("{} is not valid UTF-8", path.display()))
    })?;

    let branch = parse_head_marker(&content).ok_or_else(|| {
        Error::Resolution(format!("{} is empty", path.display()))
    })?;

    tracing::debug!("Detected branch: {}", branch);
    Ok(branch)
}

fn parse_head_marker(content: &str) -> Option<String> {
    let content = content.trim();
    if content.is_empty() {
        return None;
    }

    match content.strip_prefix("ref:") {
        Some(reference) => {
            let reference = reference.trim();
            let name = reference.strip_prefix("refs/heads/").unwrap_or(reference);
            (!name.is_empty()).then(|| name.to_string())
        }
        None => Some(content.to_string()),
    }
}
