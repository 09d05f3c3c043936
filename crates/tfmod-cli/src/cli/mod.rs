//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value parsers.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser};
use tfmod_core::domain::TerraformVersion;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "tfmod",
    bin_name = "tfmod",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Create an empty Terraform module with template files.",
    long_about = "tfmod creates a Terraform module directory containing main.tf, \
                  variables.tf and versions.tf (plus outputs.tf on request). \
                  versions.tf pins the locally installed Terraform version.",
    after_help = "EXAMPLES:\n\
        \x20 tfmod modules/my_new_module\n\
        \x20 tfmod -p modules/nested/deep/module\n\
        \x20 tfmod -o modules/module_with_outputs\n\
        \x20 tfmod -p -o modules/full_module",
)]
pub struct Cli {
    /// Flags controlling logging and output.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// What to create.
    #[command(flatten)]
    pub module: ModuleArgs,
}

/// Arguments describing the module to create.
#[derive(Debug, Args)]
pub struct ModuleArgs {
    /// Target directory for the new module. Its last segment is the module name.
    #[arg(value_name = "DIRECTORY", help = "Target directory path for the new module")]
    pub directory: PathBuf,

    /// Create missing parent directories.
    #[arg(
        short = 'p',
        long = "parents",
        help = "Create parent directories if they don't exist (like mkdir -p)"
    )]
    pub parents: bool,

    /// Also write `outputs.tf`.
    #[arg(
        short = 'o',
        long = "with-outputs",
        help = "Include an outputs.tf file in the module"
    )]
    pub with_outputs: bool,

    /// Terraform executable queried for its version.
    #[arg(
        long = "terraform-bin",
        value_name = "PATH",
        help = "Terraform executable to query for its version"
    )]
    pub terraform_bin: Option<PathBuf>,

    /// Pin `required_version` instead of asking Terraform.
    #[arg(
        long = "terraform-version",
        value_name = "X.Y.Z",
        help = "Use this Terraform version instead of detecting it"
    )]
    pub terraform_version: Option<TerraformVersion>,
}
