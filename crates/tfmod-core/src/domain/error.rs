use thiserror::Error;

use crate::error::ErrorCategory;

/// Domain errors: values that cannot be turned into a valid module.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Cannot derive a module name from '{path}'")]
    InvalidTarget { path: String },

    #[error("Invalid Terraform version '{value}': expected MAJOR.MINOR.PATCH")]
    InvalidVersion { value: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidTarget { .. } => vec![
                "The module directory must end in a named path segment".into(),
                "Example: tfmod modules/network".into(),
            ],
            Self::InvalidVersion { .. } => vec![
                "Versions use three numeric components, e.g. 1.14.4".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}
