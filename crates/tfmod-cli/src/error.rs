//! Error handling for the tfmod CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use tfmod_core::error::TfmodError;

use crate::output::JsonOutputError;

pub use tfmod_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// An error propagated from `tfmod-core`: AlreadyExists, MissingParent,
    /// CreationFailed or InvalidTarget.
    #[error(transparent)]
    Core(#[from] TfmodError),

    /// A configuration file or value could not be read or parsed.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Writing to stdout failed, or the report couldn't be serialised.
    #[error("Output error: {message}")]
    OutputError {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Core(core_err) => core_err.suggestions(),

            Self::ConfigError { .. } => vec![
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Check TFMOD_* environment variables".into(),
            ],

            Self::OutputError { .. } => vec!["Check that stdout is writable".into()],
        }
    }

    /// Get the error category for styling and log severity.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Conflict => ErrorCategory::UserError,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::OutputError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// Every handled failure exits with `1`; `2` is reserved for argument
    /// parse errors reported by clap before any handler runs.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Format the error for display with colors.
    ///
    /// The first line is always `Error: <message>`; cause chain and
    /// suggestions follow only when `verbose`.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = format!("{} {}\n", "Error:".red().bold(), self);

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "  {} {}\n",
                    "\u{2192}".dimmed(), // →
                    err.to_string().dimmed()
                ));
                source = err.source();
            }

            let suggestions = self.suggestions();
            if !suggestions.is_empty() {
                output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
                for suggestion in suggestions {
                    output.push_str(&format!("  {suggestion}\n"));
                }
            }
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = format!("Error: {self}\n");

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }

            let suggestions = self.suggestions();
            if !suggestions.is_empty() {
                out.push_str("\nSuggestions:\n");
                for s in &suggestions {
                    out.push_str(&format!("  {s}\n"));
                }
            }
        }

        out
    }

    /// Log the error using tracing.
    ///
    /// Debug level only: the `Error:` line is the sole stderr output of a
    /// default run, and `-vv` adds these events on top of it.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::debug!("User error: {}", self),
            ErrorCategory::Configuration => tracing::debug!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::debug!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The request conflicts with the filesystem or is invalid.
    UserError,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::OutputError {
            message: f().into(),
            source: Box::new(e),
        })
    }
}

impl<T> IntoCli<T> for Result<T, JsonOutputError> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::OutputError {
            message: f().into(),
            source: Box::new(e),
        })
    }
}
