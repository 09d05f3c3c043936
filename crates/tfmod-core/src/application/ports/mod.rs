//! Application ports (traits) for external dependencies.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: directory inspection, creation and file writes
//!   - `VersionProbe`: asks the installed Terraform for its version

pub mod output;

pub use output::{Filesystem, VersionProbe};

#[cfg(test)]
pub use output::{MockFilesystem, MockVersionProbe};
