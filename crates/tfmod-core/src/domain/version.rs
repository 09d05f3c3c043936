//! Terraform version values and the probe result type.
//!
//! A probe never fails: it reports either [`VersionLookup::Resolved`] or
//! [`VersionLookup::Unresolved`] with a reason, and [`VersionSettings`]
//! turns the latter into the configured default.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use regex::Regex;
use serde::Serialize;

use crate::domain::error::DomainError;

/// Version pinned in `versions.tf` when the installed one can't be detected.
pub const DEFAULT_TERRAFORM_VERSION: &str = "1.14.4";

/// A `MAJOR.MINOR.PATCH` Terraform version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TerraformVersion(String);

impl TerraformVersion {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TerraformVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = 0;
        for part in s.split('.') {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(DomainError::InvalidVersion { value: s.into() });
            }
            parts += 1;
        }
        if parts != 3 {
            return Err(DomainError::InvalidVersion { value: s.into() });
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for TerraformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a probe could not produce a version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// The binary was not found on `PATH` (or at the given location).
    NotInstalled,
    /// The process did not exit before the deadline and was killed.
    TimedOut { after: Duration },
    /// The process exited unsuccessfully. `None` when killed by a signal.
    ExitStatus { code: Option<i32> },
    /// Exit status was zero but no `Terraform vX.Y.Z` line was printed.
    UnrecognisedOutput,
    /// Any other OS error while spawning or reading the process.
    Io(String),
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInstalled => write!(f, "terraform is not installed"),
            Self::TimedOut { after } => write!(f, "timed out after {}s", after.as_secs()),
            Self::ExitStatus { code: Some(code) } => write!(f, "exited with status {code}"),
            Self::ExitStatus { code: None } => write!(f, "terminated by signal"),
            Self::UnrecognisedOutput => write!(f, "no version found in output"),
            Self::Io(msg) => write!(f, "{msg}"),
        }
    }
}

/// Outcome of querying the installed Terraform for its version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionLookup {
    Resolved(TerraformVersion),
    Unresolved(UnresolvedReason),
}

/// Where the version written to `versions.tf` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionSource {
    Detected,
    Default,
}

/// A version ready for template substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub version: TerraformVersion,
    pub source: VersionSource,
}

/// Settings consumed by version resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSettings {
    pub default_version: TerraformVersion,
}

impl VersionSettings {
    pub fn new(default_version: TerraformVersion) -> Self {
        Self { default_version }
    }

    /// Map a probe outcome onto a concrete version.
    pub fn resolve(&self, lookup: VersionLookup) -> ResolvedVersion {
        match lookup {
            VersionLookup::Resolved(version) => ResolvedVersion {
                version,
                source: VersionSource::Detected,
            },
            VersionLookup::Unresolved(_) => ResolvedVersion {
                version: self.default_version.clone(),
                source: VersionSource::Default,
            },
        }
    }
}

impl Default for VersionSettings {
    fn default() -> Self {
        Self {
            default_version: TerraformVersion(DEFAULT_TERRAFORM_VERSION.to_string()),
        }
    }
}

/// Extract the version from `terraform --version` output.
///
/// Looks for the first `Terraform vX.Y.Z` anywhere in the text; trailing
/// pre-release suffixes (`-beta1`) are ignored.
pub fn parse_version_output(output: &str) -> Option<TerraformVersion> {
    let pattern = Regex::new(r"Terraform v(\d+\.\d+\.\d+)").ok()?;
    let caps = pattern.captures(output)?;
    Some(TerraformVersion(caps[1].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_output() {
        let out = "Terraform v1.9.8\non linux_amd64\n+ provider registry.terraform.io/x/y v1.0.0\n";
        assert_eq!(parse_version_output(out).unwrap().as_str(), "1.9.8");
    }

    #[test]
    fn ignores_prerelease_suffix() {
        let out = "Terraform v1.10.0-beta1\non darwin_arm64\n";
        assert_eq!(parse_version_output(out).unwrap().as_str(), "1.10.0");
    }

    #[test]
    fn other_tools_do_not_match() {
        assert!(parse_version_output("OpenTofu v1.8.0\n").is_none());
        assert!(parse_version_output("").is_none());
    }

    #[test]
    fn version_from_str_requires_three_numeric_parts() {
        assert!("1.14.4".parse::<TerraformVersion>().is_ok());
        assert!("1.14".parse::<TerraformVersion>().is_err());
        assert!("1.14.4.1".parse::<TerraformVersion>().is_err());
        assert!("1.x.4".parse::<TerraformVersion>().is_err());
        assert!("v1.14.4".parse::<TerraformVersion>().is_err());
        assert!("1..4".parse::<TerraformVersion>().is_err());
    }

    #[test]
    fn unresolved_maps_to_default() {
        let settings = VersionSettings::new("1.5.7".parse().unwrap());
        let resolved = settings.resolve(VersionLookup::Unresolved(UnresolvedReason::NotInstalled));
        assert_eq!(resolved.version.as_str(), "1.5.7");
        assert_eq!(resolved.source, VersionSource::Default);
    }

    #[test]
    fn resolved_is_kept() {
        let settings = VersionSettings::default();
        let resolved = settings.resolve(VersionLookup::Resolved("1.9.0".parse().unwrap()));
        assert_eq!(resolved.version.as_str(), "1.9.0");
        assert_eq!(resolved.source, VersionSource::Detected);
    }

    #[test]
    fn default_settings_use_builtin_version() {
        assert_eq!(
            VersionSettings::default().default_version.as_str(),
            DEFAULT_TERRAFORM_VERSION
        );
    }
}
