use std::path::PathBuf;

use serde::Serialize;

use crate::codeowners::filter_content;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeownersDocument {
    #[serde(skip_serializing)]
    raw_content: String,
    filtered_lines: Vec<String>,
}

impl CodeownersDocument {
    pub fn new(raw_content: String) -> Self {
        let filtered_lines = filter_content(&raw_content);
        Self {
            raw_content,
            filtered_lines,
        }
    }

    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    pub fn filtered_lines(&self) -> &[String] {
        &self.filtered_lines
    }

    /// True when the file exists but holds only comments and blank lines.
    pub fn is_empty(&self) -> bool {
        self.filtered_lines.is_empty()
    }
}

/// Result of reading a CODEOWNERS file from a local checkout.
#[derive(Debug, Clone, Serialize)]
pub struct LocalReport {
    pub path: PathBuf,
    /// Absent when the file is read outside a resolvable checkout.
    pub branch: Option<String>,
    pub document: CodeownersDocument,
}
