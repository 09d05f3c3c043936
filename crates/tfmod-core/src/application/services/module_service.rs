//! Module Service - main application orchestrator.
//!
//! This service coordinates the whole scaffolding workflow:
//! 1. Prepare the target directory (fails fast, before any process runs)
//! 2. Resolve the Terraform version
//! 3. Render and write the template set

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, VersionProbe},
    },
    domain::{
        ModuleName, ProviderPin, RenderContext, ResolvedVersion, TERRAFORM_FILE_EXTENSION,
        TerraformVersion, VersionLookup, VersionSettings, VersionSource, render_templates,
    },
    error::TfmodResult,
};

/// What the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRequest {
    pub directory: PathBuf,
    /// Create missing ancestors, like `mkdir -p`.
    pub parents: bool,
    /// Also write `outputs.tf`.
    pub with_outputs: bool,
}

impl ModuleRequest {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            parents: false,
            with_outputs: false,
        }
    }

    pub fn parents(mut self, parents: bool) -> Self {
        self.parents = parents;
        self
    }

    pub fn with_outputs(mut self, with_outputs: bool) -> Self {
        self.with_outputs = with_outputs;
        self
    }
}

/// A directory that passed the existence rules and now exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedDirectory {
    pub path: PathBuf,
    pub module_name: ModuleName,
}

/// Result of a successful scaffold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    pub directory: PathBuf,
    pub module_name: ModuleName,
    pub terraform_version: TerraformVersion,
    pub version_source: VersionSource,
    /// Absolute paths, in template declaration order.
    pub files: Vec<PathBuf>,
}

impl ScaffoldReport {
    /// Bare file names of the written files, in order.
    pub fn file_names(&self) -> Vec<String> {
        self.files
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }
}

/// Main scaffolding service.
pub struct ModuleService {
    filesystem: Box<dyn Filesystem>,
    probe: Box<dyn VersionProbe>,
    settings: VersionSettings,
    provider: ProviderPin,
}

impl ModuleService {
    /// Create a new module service with the given adapters.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        probe: Box<dyn VersionProbe>,
        settings: VersionSettings,
    ) -> Self {
        Self {
            filesystem,
            probe,
            settings,
            provider: ProviderPin::default(),
        }
    }

    /// Scaffold a new module.
    #[instrument(
        skip_all,
        fields(
            directory = %request.directory.display(),
            parents = request.parents,
            with_outputs = request.with_outputs
        )
    )]
    pub fn create(&self, request: &ModuleRequest) -> TfmodResult<ScaffoldReport> {
        let prepared = self.prepare(&request.directory, request.parents)?;
        info!(path = %prepared.path.display(), module = %prepared.module_name, "Directory ready");

        let resolved = self.resolve_version();

        let files = self.write_templates(
            &prepared.path,
            &prepared.module_name,
            &resolved.version,
            request.with_outputs,
        )?;
        info!(files = files.len(), "Module scaffolded");

        Ok(ScaffoldReport {
            directory: prepared.path,
            module_name: prepared.module_name,
            terraform_version: resolved.version,
            version_source: resolved.source,
            files,
        })
    }

    /// Resolve `directory` and make sure it exists and holds no `.tf` files.
    ///
    /// Nothing is created when the directory already contains Terraform
    /// files, when its parent is missing without `parents`, or when no
    /// module name can be derived from it.
    pub fn prepare(&self, directory: &Path, parents: bool) -> TfmodResult<PreparedDirectory> {
        let path = self.filesystem.resolve(directory)?;
        let module_name = ModuleName::from_directory(&path)?;
        debug!(resolved = %path.display(), "Target resolved");

        if self.filesystem.exists(&path) {
            if !self.filesystem.is_dir(&path) {
                return Err(ApplicationError::CreationFailed {
                    path,
                    operation: "use",
                    reason: "path exists and is not a directory".into(),
                }
                .into());
            }

            let existing = self
                .filesystem
                .list_with_extension(&path, TERRAFORM_FILE_EXTENSION)?;
            if !existing.is_empty() {
                return Err(ApplicationError::AlreadyExists {
                    directory: path,
                    files: existing,
                }
                .into());
            }
            debug!("Reusing existing empty directory");
        } else if parents {
            self.filesystem.create_dir_all(&path)?;
        } else {
            // A resolved absolute path with a file name always has a parent.
            let parent = path.parent().unwrap_or(Path::new("/"));
            if !self.filesystem.exists(parent) {
                return Err(ApplicationError::MissingParent {
                    parent: parent.to_path_buf(),
                }
                .into());
            }
            self.filesystem.create_dir(&path)?;
        }

        Ok(PreparedDirectory { path, module_name })
    }

    /// Ask the probe for the installed version, falling back to the default.
    pub fn resolve_version(&self) -> ResolvedVersion {
        let lookup = self.probe.probe();
        if let VersionLookup::Unresolved(reason) = &lookup {
            debug!(%reason, default = %self.settings.default_version, "Using default Terraform version");
        }
        let resolved = self.settings.resolve(lookup);
        info!(version = %resolved.version, source = ?resolved.source, "Terraform version resolved");
        resolved
    }

    /// Render the template set and write each file into `directory`.
    pub fn write_templates(
        &self,
        directory: &Path,
        module_name: &ModuleName,
        version: &TerraformVersion,
        include_outputs: bool,
    ) -> TfmodResult<Vec<PathBuf>> {
        let ctx = RenderContext::new(module_name, version, self.provider);

        render_templates(&ctx, include_outputs)
            .into_iter()
            .map(|file| {
                let path = directory.join(file.file_name);
                debug!(file = file.file_name, "Writing template");
                self.filesystem.write_file(&path, &file.content)?;
                Ok(path)
            })
            .collect()
    }
}
