//! Unified error handling for tfmod Core.
//!
//! Wraps domain and application errors behind one type that carries a
//! display category and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for tfmod Core operations.
///
/// Both variants are transparent: the message the user sees is the message
/// of the wrapped error, with no layer prefix.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TfmodError {
    /// Errors from the domain layer (invalid values).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (directory rules, filesystem).
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl TfmodError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller asked for something invalid.
    Validation,
    /// The target location conflicts with existing state.
    Conflict,
    /// Operating system failure.
    Internal,
}

/// Convenient result type alias.
pub type TfmodResult<T> = Result<T, TfmodError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn message_is_not_prefixed() {
        let err: TfmodError = ApplicationError::MissingParent {
            parent: PathBuf::from("/srv/missing"),
        }
        .into();
        assert!(err.to_string().starts_with("Parent directory '/srv/missing'"));
    }

    #[test]
    fn category_is_forwarded() {
        let err: TfmodError = DomainError::InvalidTarget { path: "/".into() }.into();
        assert_eq!(err.category(), ErrorCategory::Validation);

        let err: TfmodError = ApplicationError::AlreadyExists {
            directory: PathBuf::from("/m"),
            files: vec!["a.tf".into()],
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Conflict);
    }
}
