//! Infrastructure adapters for tfmod.
//!
//! This crate implements the ports defined in `tfmod-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod version;

// Re-export commonly used adapters
pub use filesystem::LocalFilesystem;
pub use version::{CommandVersionProbe, FixedVersionProbe};
