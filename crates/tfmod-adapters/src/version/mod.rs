//! Terraform version probes.

mod command;
mod fixed;

pub use command::CommandVersionProbe;
pub use fixed::FixedVersionProbe;
