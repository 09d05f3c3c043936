//! Application layer for tfmod.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ModuleService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. Naming, version and template rules live in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{ModuleRequest, ModuleService, PreparedDirectory, ScaffoldReport};

pub use ports::{Filesystem, VersionProbe};

pub use error::ApplicationError;
