//! Module creation: the only thing `tfmod` does.
//!
//! Responsibility: pick the adapters the flags ask for, call the core
//! service, and display the report. No business logic lives here.

use tracing::{debug, info, instrument};

use tfmod_adapters::{CommandVersionProbe, FixedVersionProbe, LocalFilesystem};
use tfmod_core::{
    application::{ModuleRequest, ModuleService, ScaffoldReport, ports::VersionProbe},
    domain::VersionSource,
};

use crate::{
    cli::{ModuleArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute a module creation.
#[instrument(skip_all, fields(directory = %args.directory.display()))]
pub fn execute(args: ModuleArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let settings = config
        .version_settings()
        .map_err(|e| CliError::ConfigError {
            message: format!("{e:#}"),
            source: None,
        })?;

    let service = ModuleService::new(
        Box::new(LocalFilesystem::new()),
        build_probe(&args, &config),
        settings,
    );

    let request = ModuleRequest::new(args.directory)
        .parents(args.parents)
        .with_outputs(args.with_outputs);

    let report = service.create(&request)?;

    if report.version_source == VersionSource::Default {
        info!(
            version = %report.terraform_version,
            "Terraform version not detected, pinned the default"
        );
    }

    render_report(&report, &output)
}

/// `--terraform-version` wins over probing; `--terraform-bin` over config.
fn build_probe(args: &ModuleArgs, config: &AppConfig) -> Box<dyn VersionProbe> {
    if let Some(version) = &args.terraform_version {
        debug!(%version, "Using pinned Terraform version");
        return Box::new(FixedVersionProbe::pinned(version.clone()));
    }

    let binary = args
        .terraform_bin
        .clone()
        .unwrap_or_else(|| config.version.binary.clone().into());
    debug!(binary = %binary.display(), "Probing Terraform version");
    Box::new(CommandVersionProbe::new(binary, config.probe_timeout()))
}

fn render_report(report: &ScaffoldReport, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        return output
            .json(report)
            .with_cli_context(|| "Failed to print creation report");
    }

    output
        .header(&format!(
            "Created Terraform module at: {}",
            report.directory.display()
        ))
        .with_cli_context(|| "Failed to print creation report")?;
    for name in report.file_names() {
        output
            .item(&name)
            .with_cli_context(|| "Failed to print creation report")?;
    }
    Ok(())
}
