//! tfmod Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the tfmod
//! Terraform module scaffolder, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            tfmod-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (ModuleService)              │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │       (Filesystem, VersionProbe)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     tfmod-adapters (Infrastructure)     │
//! │ (LocalFilesystem, CommandVersionProbe)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tfmod_core::prelude::*;
//!
//! let service = ModuleService::new(filesystem, probe, VersionSettings::default());
//! let report = service.create(&ModuleRequest::new("modules/network"))?;
//! println!("{}", report.directory.display());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ModuleRequest, ModuleService, ScaffoldReport,
        ports::{Filesystem, VersionProbe},
    };
    pub use crate::domain::{
        ModuleName, ResolvedVersion, TerraformVersion, UnresolvedReason, VersionLookup,
        VersionSettings, VersionSource,
    };
    pub use crate::error::{TfmodError, TfmodResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
