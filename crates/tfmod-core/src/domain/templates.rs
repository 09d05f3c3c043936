//! The fixed set of files written into a new module.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  TEMPLATE_SET (ordered)                                  │
//! │  ├── Main       main.tf       {{MODULE_NAME}}            │
//! │  ├── Variables  variables.tf  literal                    │
//! │  ├── Versions   versions.tf   {{TERRAFORM_VERSION}} …    │
//! │  └── Outputs    outputs.tf    literal, opt-in            │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Order is part of the contract: rendered files are written and reported
//! in declaration order.

use std::collections::BTreeMap;

use crate::domain::{module_name::ModuleName, version::TerraformVersion};

/// Extension shared by every generated file, and by the conflict check.
pub const TERRAFORM_FILE_EXTENSION: &str = "tf";

const MAIN_TF: &str = "\
# ============================================================================
# Module: {{MODULE_NAME}}
# ============================================================================
# Description: [Add module description here]
# ============================================================================

# Add your Terraform resources here
";

const VARIABLES_TF: &str = "\
# ============================================================================
# Module Variables
# ============================================================================

# Add your input variables here
";

const OUTPUTS_TF: &str = "\
# ============================================================================
# Module Outputs
# ============================================================================

# Add your output values here
";

const VERSIONS_TF: &str = "\
terraform {
  required_version = \"= {{TERRAFORM_VERSION}}\"

  required_providers {
    {{PROVIDER_NAME}} = {
      source  = \"{{PROVIDER_SOURCE}}\"
      version = \"= {{PROVIDER_VERSION}}\"
    }
  }
}
";

/// What a generated file is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateRole {
    Main,
    Variables,
    Versions,
    Outputs,
}

/// Template text and whether it needs variable substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateBody {
    /// Copied as-is.
    Literal(&'static str),
    /// `{{VARIABLE}}` placeholders replaced from a [`RenderContext`].
    Parameterized(&'static str),
}

/// One `(role, filename, body)` row of the template set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateEntry {
    pub role: TemplateRole,
    pub file_name: &'static str,
    pub body: TemplateBody,
}

impl TemplateEntry {
    /// Whether this entry is written for the given outputs flag.
    pub fn is_selected(&self, include_outputs: bool) -> bool {
        self.role != TemplateRole::Outputs || include_outputs
    }

    pub fn render(&self, ctx: &RenderContext) -> String {
        match self.body {
            TemplateBody::Literal(text) => text.to_string(),
            TemplateBody::Parameterized(text) => ctx.render(text),
        }
    }
}

pub const TEMPLATE_SET: [TemplateEntry; 4] = [
    TemplateEntry {
        role: TemplateRole::Main,
        file_name: "main.tf",
        body: TemplateBody::Parameterized(MAIN_TF),
    },
    TemplateEntry {
        role: TemplateRole::Variables,
        file_name: "variables.tf",
        body: TemplateBody::Literal(VARIABLES_TF),
    },
    TemplateEntry {
        role: TemplateRole::Versions,
        file_name: "versions.tf",
        body: TemplateBody::Parameterized(VERSIONS_TF),
    },
    TemplateEntry {
        role: TemplateRole::Outputs,
        file_name: "outputs.tf",
        body: TemplateBody::Literal(OUTPUTS_TF),
    },
];

/// Provider pinned in `versions.tf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderPin {
    pub name: &'static str,
    pub source: &'static str,
    pub version: &'static str,
}

impl Default for ProviderPin {
    fn default() -> Self {
        Self {
            name: "snowflake",
            source: "snowflakedb/snowflake",
            version: "2.12.0",
        }
    }
}

/// Variables available to parameterized templates.
///
/// | Variable            | Example                 |
/// |---------------------|-------------------------|
/// | `MODULE_NAME`       | `mod_a`                 |
/// | `TERRAFORM_VERSION` | `1.14.4`                |
/// | `PROVIDER_NAME`     | `snowflake`             |
/// | `PROVIDER_SOURCE`   | `snowflakedb/snowflake` |
/// | `PROVIDER_VERSION`  | `2.12.0`                |
#[derive(Debug, Clone)]
pub struct RenderContext {
    variables: BTreeMap<&'static str, String>,
}

impl RenderContext {
    pub fn new(module_name: &ModuleName, version: &TerraformVersion, provider: ProviderPin) -> Self {
        let mut variables = BTreeMap::new();
        variables.insert("MODULE_NAME", module_name.to_string());
        variables.insert("TERRAFORM_VERSION", version.to_string());
        variables.insert("PROVIDER_NAME", provider.name.to_string());
        variables.insert("PROVIDER_SOURCE", provider.source.to_string());
        variables.insert("PROVIDER_VERSION", provider.version.to_string());
        Self { variables }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|s| s.as_str())
    }

    /// Replace `{{VARIABLE}}` placeholders. Unknown placeholders stay as-is.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();
        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{key}}}}}");
            result = result.replace(&placeholder, value);
        }
        result
    }
}

/// A template rendered for a specific module, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub role: TemplateRole,
    pub file_name: &'static str,
    pub content: String,
}

/// Render every selected entry of [`TEMPLATE_SET`], in order.
pub fn render_templates(ctx: &RenderContext, include_outputs: bool) -> Vec<RenderedFile> {
    TEMPLATE_SET
        .iter()
        .filter(|entry| entry.is_selected(include_outputs))
        .map(|entry| RenderedFile {
            role: entry.role,
            file_name: entry.file_name,
            content: entry.render(ctx),
        })
        .collect()
}
