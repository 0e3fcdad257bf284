pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod codeowners;
pub mod scan;

pub use config::{Config, LocalConfig, ScanConfig};
pub use error::{Error, Result};
pub use github::{CodeownersSource, GitHubClient};
pub use codeowners::{filter_content, BranchResolver, BranchSource};
pub use scan::{scan_local, OrgScanner};
