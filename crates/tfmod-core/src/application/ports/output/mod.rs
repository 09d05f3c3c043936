//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `tfmod-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::VersionLookup;
use crate::error::TfmodResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `tfmod_adapters::filesystem::LocalFilesystem` (production)
///
/// Every fallible operation reports OS failures as
/// `ApplicationError::CreationFailed`.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Turn `path` into an absolute path with `.`/`..` collapsed and the
    /// existing prefix canonicalized. The path itself need not exist.
    fn resolve(&self, path: &Path) -> TfmodResult<PathBuf>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Names of the non-directory entries directly inside `dir` whose
    /// extension is `extension`, sorted.
    fn list_with_extension(&self, dir: &Path, extension: &str) -> TfmodResult<Vec<String>>;

    /// Create a single directory. Succeeds if it already exists.
    fn create_dir(&self, path: &Path) -> TfmodResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> TfmodResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> TfmodResult<()>;
}

/// Port for discovering the installed Terraform version.
///
/// Implemented by:
/// - `tfmod_adapters::version::CommandVersionProbe` (runs `terraform --version`)
/// - `tfmod_adapters::version::FixedVersionProbe` (user-pinned version)
///
/// Never fails; inability to determine a version is a normal outcome.
#[cfg_attr(test, mockall::automock)]
pub trait VersionProbe: Send + Sync {
    fn probe(&self) -> VersionLookup;
}
