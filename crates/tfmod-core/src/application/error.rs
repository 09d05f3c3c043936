//! Application layer errors.
//!
//! These errors come from the directory rules and the filesystem, not from
//! invalid values. Value errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while preparing a module directory or writing files.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The target directory already holds `.tf` files.
    #[error(
        "Directory '{}' already contains Terraform files: {}",
        .directory.display(),
        format_file_list(.files)
    )]
    AlreadyExists {
        directory: PathBuf,
        files: Vec<String>,
    },

    /// The parent of the target is missing and parent creation was not requested.
    #[error(
        "Parent directory '{}' does not exist. Use --parents / -p to create parent directories.",
        .parent.display()
    )]
    MissingParent { parent: PathBuf },

    /// Any other OS-level failure while resolving, inspecting, creating or writing.
    #[error("Failed to {operation} '{}': {reason}", .path.display())]
    CreationFailed {
        path: PathBuf,
        operation: &'static str,
        reason: String,
    },
}

/// Render names as `['a.tf', 'b.tf']`.
fn format_file_list(files: &[String]) -> String {
    let quoted: Vec<String> = files.iter().map(|f| format!("'{f}'")).collect();
    format!("[{}]", quoted.join(", "))
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AlreadyExists { directory, .. } => vec![
                format!("A module already exists in {}", directory.display()),
                "Choose a different directory for the new module".into(),
            ],
            Self::MissingParent { parent } => vec![
                format!("Create {} first, or", parent.display()),
                "Re-run with --parents / -p to create it automatically".into(),
            ],
            Self::CreationFailed { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AlreadyExists { .. } => ErrorCategory::Conflict,
            Self::MissingParent { .. } => ErrorCategory::Validation,
            Self::CreationFailed { .. } => ErrorCategory::Internal,
        }
    }
}
