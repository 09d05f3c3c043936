use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::domain::error::DomainError;

/// Name of a Terraform module: the final segment of its directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModuleName(String);

impl ModuleName {
    /// Derive the module name from a resolved directory path.
    ///
    /// Fails for paths without a final normal component (`/`, `..`).
    pub fn from_directory(directory: &Path) -> Result<Self, DomainError> {
        directory
            .file_name()
            .map(|n| Self(n.to_string_lossy().into_owned()))
            .ok_or_else(|| DomainError::InvalidTarget {
                path: directory.display().to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
