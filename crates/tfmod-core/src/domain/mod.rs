//! Core domain layer for tfmod.
//!
//! Pure values and rules: module naming, Terraform version parsing, the
//! fixed template set and lexical path normalization. All I/O happens
//! behind the ports in `crate::application::ports`.

pub mod error;
pub mod module_name;
pub mod path;
pub mod templates;
pub mod version;

pub use error::DomainError;
pub use module_name::ModuleName;
pub use path::normalize_lexically;
pub use templates::{
    ProviderPin, RenderContext, RenderedFile, TEMPLATE_SET, TemplateBody, TemplateEntry,
    TemplateRole, TERRAFORM_FILE_EXTENSION, render_templates,
};
pub use version::{
    DEFAULT_TERRAFORM_VERSION, ResolvedVersion, TerraformVersion, UnresolvedReason,
    VersionLookup, VersionSettings, VersionSource, parse_version_output,
};
