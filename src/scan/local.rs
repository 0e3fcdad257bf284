use crate::codeowners::{read_local_codeowners, BranchResolver, BranchSource};
use crate::config::LocalConfig;
use crate::error::Result;
use crate::models::{CodeownersDocument, LocalReport};

/// Reads a local CODEOWNERS file. Failing to read the file is fatal; the
/// branch is only a label and is left unknown when it cannot be resolved.
pub fn scan_local(config: &LocalConfig) -> Result<LocalReport> {
    let branch = match BranchResolver::resolve(
        config.branch.as_deref(),
        BranchSource::Local {
            head_path: &config.head_path,
        },
    ) {
        Ok(branch) => {
            if config.verbose {
                tracing::info!("Using branch: {}", branch);
            }
            Some(branch)
        }
        Err(e) => {
            tracing::debug!("Branch unknown: {}", e);
            None
        }
    };

    if config.verbose {
        tracing::info!("Reading CODEOWNERS file: {}", config.file.display());
    }

    let raw = read_local_codeowners(&config.file)?;
    tracing::debug!("Read {} bytes from {}", raw.len(), config.file.display());

    Ok(LocalReport {
        path: config.file.clone(),
        branch,
        document: CodeownersDocument::new(raw),
    })
}
