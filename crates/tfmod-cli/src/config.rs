//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the values derived from
//! it ([`VersionSettings`], the probe's binary and timeout).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `TFMOD_<SECTION>__<KEY>`, e.g. `TFMOD_VERSION__TIMEOUT_SECS`
//! 3. Config file (`--config FILE`, else the per-user config file if present)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tfmod_adapters::CommandVersionProbe;
use tfmod_core::domain::{DEFAULT_TERRAFORM_VERSION, TerraformVersion, VersionSettings};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Terraform version detection.
    pub version: VersionConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionConfig {
    /// Executable run with `--version`.
    pub binary: String,
    /// Version pinned when detection fails.
    pub default: String,
    /// Seconds to wait for the executable before giving up.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: VersionConfig {
                binary: CommandVersionProbe::DEFAULT_BINARY.into(),
                default: DEFAULT_TERRAFORM_VERSION.into(),
                timeout_secs: CommandVersionProbe::DEFAULT_TIMEOUT.as_secs(),
            },
            output: OutputConfig { no_color: false },
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to build default configuration")?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                config::Environment::with_prefix("TFMOD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        let cfg: Self = settings
            .try_deserialize()
            .context("Invalid configuration values")?;
        cfg.version_settings()?;
        Ok(cfg)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.tfmod.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "tfmod", "tfmod")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".tfmod.toml"))
    }

    /// Settings handed to the core service.
    pub fn version_settings(&self) -> anyhow::Result<VersionSettings> {
        let default: TerraformVersion = self
            .version
            .default
            .parse()
            .context("version.default must be MAJOR.MINOR.PATCH")?;
        Ok(VersionSettings::new(default))
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.version.timeout_secs)
    }
}
