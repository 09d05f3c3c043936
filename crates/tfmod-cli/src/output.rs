//! Output management and formatting.
//!
//! Everything the user is meant to read on success goes through
//! [`OutputManager`]; logs and errors go to stderr elsewhere.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Writes user-facing lines to stdout according to the resolved format.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Auto → Human on a TTY, Plain when piped or redirected.
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Bold green header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.styled() {
            text.green().bold().to_string()
        } else {
            text.to_owned()
        };
        self.term.write_line(&line)
    }

    /// Indented list entry: `  - <item>`.
    pub fn item(&self, item: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.styled() {
            format!("  {} {}", "-".dimmed(), item)
        } else {
            format!("  - {item}")
        };
        self.term.write_line(&line)
    }

    /// Pretty-printed JSON document. Not suppressed by `--quiet`: asking for
    /// JSON is asking for output.
    pub fn json<T: Serialize>(&self, value: &T) -> Result<(), JsonOutputError> {
        let rendered = serde_json::to_string_pretty(value)?;
        self.term.write_line(&rendered)?;
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    fn styled(&self) -> bool {
        self.resolved_format == OutputFormat::Human && !self.no_color
    }
}

/// Failure while emitting [`OutputManager::json`].
#[derive(Debug, thiserror::Error)]
pub enum JsonOutputError {
    #[error("failed to serialise report: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write report: {0}")]
    Write(#[from] io::Error),
}

// ── tests ─────────────────────────────────────────────────────────────────────
