//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Component, Path, PathBuf};

use tfmod_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::normalize_lexically,
    error::{TfmodError, TfmodResult},
};
use tracing::trace;
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn resolve(&self, path: &Path) -> TfmodResult<PathBuf> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|e| map_io_error(path, e, "resolve current directory for"))?
                .join(path)
        };

        // The OS resolves the longest existing prefix, so `link/..` follows
        // the link first. Only the missing tail is folded lexically.
        let components: Vec<Component<'_>> = absolute.components().collect();
        for split in (1..=components.len()).rev() {
            let prefix: PathBuf = components[..split].iter().collect();
            if let Ok(canonical) = std::fs::canonicalize(&prefix) {
                let tail: PathBuf = components[split..].iter().collect();
                let resolved = normalize_lexically(&canonical.join(tail));
                trace!(input = %path.display(), resolved = %resolved.display(), "Path resolved");
                return Ok(resolved);
            }
        }
        Ok(normalize_lexically(&absolute))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_with_extension(&self, dir: &Path, extension: &str) -> TfmodResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                map_io_error(&path, io::Error::from(e), "read directory")
            })?;
            if entry.file_type().is_dir() {
                continue;
            }
            if entry.path().extension().is_some_and(|ext| ext == extension) {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }

    fn create_dir(&self, path: &Path) -> TfmodResult<()> {
        match std::fs::create_dir(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
            Err(e) => Err(map_io_error(path, e, "create directory")),
        }
    }

    fn create_dir_all(&self, path: &Path) -> TfmodResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> TfmodResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &'static str) -> TfmodError {
    ApplicationError::CreationFailed {
        path: path.to_path_buf(),
        operation,
        reason: e.to_string(),
    }
    .into()
}
