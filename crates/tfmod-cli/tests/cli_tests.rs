//! End-to-end tests for the `tfmod` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MISSING_BIN: &str = "/nonexistent/tfmod-test/terraform";

/// A `tfmod` invocation rooted in `dir`, isolated from the caller's
/// environment, with Terraform detection pointed at `terraform_bin`.
fn tfmod(dir: &Path, terraform_bin: &str) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("tfmod");
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("TFMOD_VERSION__DEFAULT")
        .env_remove("TFMOD_VERSION__TIMEOUT_SECS")
        .env_remove("TFMOD_VERSION__BINARY")
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("NO_COLOR", "1")
        .args(["--terraform-bin", terraform_bin]);
    cmd
}

fn canonical(dir: &TempDir) -> PathBuf {
    dir.path().canonicalize().unwrap()
}

fn versions_tf(module: &Path) -> String {
    fs::read_to_string(module.join("versions.tf")).unwrap()
}

#[cfg(unix)]
fn stub_terraform(dir: &Path, body: &str) -> String {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("terraform-stub");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.to_string_lossy().into_owned()
}

// ── success paths ─────────────────────────────────────────────────────────────

#[test]
fn creates_module_in_existing_parent() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("build")).unwrap();
    let module = canonical(&tmp).join("build").join("mod_a");

    tfmod(tmp.path(), MISSING_BIN)
        .arg("build/mod_a")
        .assert()
        .success()
        .stdout(format!(
            "Created Terraform module at: {}\n  - main.tf\n  - variables.tf\n  - versions.tf\n",
            module.display()
        ));

    for name in ["main.tf", "variables.tf", "versions.tf"] {
        let content = fs::read_to_string(module.join(name)).unwrap();
        assert!(!content.is_empty(), "{name} is empty");
    }
    assert!(!module.join("outputs.tf").exists());

    let main = fs::read_to_string(module.join("main.tf")).unwrap();
    assert!(main.contains("# Module: mod_a"));
}

#[test]
fn missing_terraform_pins_default_version() {
    let tmp = TempDir::new().unwrap();

    tfmod(tmp.path(), MISSING_BIN).arg("net").assert().success();

    let versions = versions_tf(&tmp.path().join("net"));
    assert!(versions.contains("required_version = \"= 1.14.4\""));
    assert!(versions.contains("source  = \"snowflakedb/snowflake\""));
}

#[test]
fn with_outputs_adds_fourth_file() {
    let tmp = TempDir::new().unwrap();

    tfmod(tmp.path(), MISSING_BIN)
        .args(["-o", "mod_o"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("  - versions.tf\n  - outputs.tf\n"));

    assert!(tmp.path().join("mod_o/outputs.tf").is_file());
}

#[test]
fn parents_flag_creates_nested_chain() {
    let tmp = TempDir::new().unwrap();

    tfmod(tmp.path(), MISSING_BIN)
        .args(["-p", "modules/nested/deep/module"])
        .assert()
        .success();

    assert!(tmp.path().join("modules/nested/deep/module/main.tf").is_file());
}

#[test]
fn existing_empty_directory_is_reused() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("empty")).unwrap();
    fs::write(tmp.path().join("empty/README.md"), "notes").unwrap();

    tfmod(tmp.path(), MISSING_BIN).arg("empty").assert().success();

    assert!(tmp.path().join("empty/main.tf").is_file());
    assert_eq!(
        fs::read_to_string(tmp.path().join("empty/README.md")).unwrap(),
        "notes"
    );
}

#[test]
fn pinned_version_flag_skips_detection() {
    let tmp = TempDir::new().unwrap();

    tfmod(tmp.path(), MISSING_BIN)
        .args(["--terraform-version", "1.3.0", "pinned"])
        .assert()
        .success();

    assert!(versions_tf(&tmp.path().join("pinned")).contains("\"= 1.3.0\""));
}

#[test]
fn quiet_suppresses_report() {
    let tmp = TempDir::new().unwrap();

    tfmod(tmp.path(), MISSING_BIN)
        .args(["--quiet", "silent"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(tmp.path().join("silent/versions.tf").is_file());
}

#[test]
fn json_output_reports_files_and_source() {
    let tmp = TempDir::new().unwrap();

    let out = tfmod(tmp.path(), MISSING_BIN)
        .args(["--output-format", "json", "-o", "js"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["module_name"], "js");
    assert_eq!(report["terraform_version"], "1.14.4");
    assert_eq!(report["version_source"], "default");
    assert_eq!(report["files"].as_array().unwrap().len(), 4);
}

#[test]
fn config_file_changes_default_version() {
    let tmp = TempDir::new().unwrap();
    let cfg = tmp.path().join("tfmod.toml");
    fs::write(&cfg, "[version]\ndefault = \"1.6.6\"\n").unwrap();

    tfmod(tmp.path(), MISSING_BIN)
        .args(["-c", cfg.to_str().unwrap(), "cfg_mod"])
        .assert()
        .success();

    assert!(versions_tf(&tmp.path().join("cfg_mod")).contains("\"= 1.6.6\""));
}

#[test]
fn env_changes_default_version() {
    let tmp = TempDir::new().unwrap();

    tfmod(tmp.path(), MISSING_BIN)
        .env("TFMOD_VERSION__DEFAULT", "1.7.0")
        .arg("env_mod")
        .assert()
        .success();

    assert!(versions_tf(&tmp.path().join("env_mod")).contains("\"= 1.7.0\""));
}

// ── failure paths ─────────────────────────────────────────────────────────────

#[test]
fn existing_tf_file_is_rejected_without_writes() {
    let tmp = TempDir::new().unwrap();
    let module = tmp.path().join("build/mod_a");
    fs::create_dir_all(&module).unwrap();
    fs::write(module.join("legacy.tf"), "# keep").unwrap();
    let expected_dir = module.canonicalize().unwrap();

    tfmod(tmp.path(), MISSING_BIN)
        .arg("build/mod_a")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(format!(
            "Error: Directory '{}' already contains Terraform files: ['legacy.tf']\n",
            expected_dir.display()
        ));

    let entries: Vec<_> = fs::read_dir(&module).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(fs::read_to_string(module.join("legacy.tf")).unwrap(), "# keep");
}

#[test]
fn missing_parent_without_flag_fails() {
    let tmp = TempDir::new().unwrap();

    tfmod(tmp.path(), MISSING_BIN)
        .arg("absent/child")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: Parent directory '"))
        .stderr(predicate::str::contains(
            "does not exist. Use --parents / -p to create parent directories.",
        ));

    assert!(!tmp.path().join("absent").exists());
}

#[test]
fn failure_writes_a_single_stderr_line() {
    let tmp = TempDir::new().unwrap();

    let output = tfmod(tmp.path(), MISSING_BIN)
        .arg("absent/child")
        .assert()
        .code(1)
        .get_output()
        .clone();

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr.lines().count(), 1, "unexpected stderr: {stderr}");
    assert!(stderr.starts_with("Error: "));
}

#[cfg(target_os = "linux")]
#[test]
fn per_user_config_is_read_from_config_home() {
    let tmp = TempDir::new().unwrap();
    let user_cfg = tmp.path().join(".config/tfmod");
    fs::create_dir_all(&user_cfg).unwrap();
    fs::write(user_cfg.join("config.toml"), "[version]\ndefault = \"1.8.8\"\n").unwrap();

    tfmod(tmp.path(), MISSING_BIN).arg("home_mod").assert().success();

    assert!(versions_tf(&tmp.path().join("home_mod")).contains("\"= 1.8.8\""));
}

#[test]
fn verbose_error_lists_suggestions() {
    let tmp = TempDir::new().unwrap();

    tfmod(tmp.path(), MISSING_BIN)
        .args(["-v", "absent/child"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn target_that_is_a_file_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("plain"), "x").unwrap();

    tfmod(tmp.path(), MISSING_BIN)
        .arg("plain")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: Failed to "));
}

#[test]
fn missing_explicit_config_fails() {
    let tmp = TempDir::new().unwrap();

    tfmod(tmp.path(), MISSING_BIN)
        .args(["-c", "nope.toml", "m"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: Configuration error:"));

    assert!(!tmp.path().join("m").exists());
}

#[test]
fn missing_directory_argument_is_usage_error() {
    let tmp = TempDir::new().unwrap();

    tfmod(tmp.path(), MISSING_BIN).assert().code(2);
}

#[test]
fn invalid_pinned_version_is_usage_error() {
    let tmp = TempDir::new().unwrap();

    tfmod(tmp.path(), MISSING_BIN)
        .args(["--terraform-version", "latest", "m"])
        .assert()
        .code(2);
}

// ── version detection through a stub executable ───────────────────────────────

#[cfg(unix)]
mod detection {
    use super::*;

    #[test]
    fn detected_version_is_pinned() {
        let tmp = TempDir::new().unwrap();
        let bin = stub_terraform(tmp.path(), "echo 'Terraform v1.5.7'\necho 'on linux_amd64'");

        tfmod(tmp.path(), &bin).arg("detected").assert().success();

        assert!(versions_tf(&tmp.path().join("detected"))
            .contains("required_version = \"= 1.5.7\""));
    }

    #[test]
    fn non_zero_exit_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let bin = stub_terraform(tmp.path(), "echo 'Terraform v1.5.7'\nexit 1");

        tfmod(tmp.path(), &bin).arg("failing").assert().success();

        assert!(versions_tf(&tmp.path().join("failing")).contains("\"= 1.14.4\""));
    }

    #[test]
    fn unrecognised_output_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let bin = stub_terraform(tmp.path(), "echo 'OpenTofu v1.8.0'");

        tfmod(tmp.path(), &bin).arg("tofu").assert().success();

        assert!(versions_tf(&tmp.path().join("tofu")).contains("\"= 1.14.4\""));
    }

    #[test]
    fn slow_binary_times_out_to_default() {
        let tmp = TempDir::new().unwrap();
        let bin = stub_terraform(tmp.path(), "exec sleep 5");

        tfmod(tmp.path(), &bin)
            .env("TFMOD_VERSION__TIMEOUT_SECS", "1")
            .arg("slow")
            .assert()
            .success();

        assert!(versions_tf(&tmp.path().join("slow")).contains("\"= 1.14.4\""));
    }

    #[test]
    fn json_reports_detected_source() {
        let tmp = TempDir::new().unwrap();
        let bin = stub_terraform(tmp.path(), "echo 'Terraform v1.9.8'");

        let out = tfmod(tmp.path(), &bin)
            .args(["--output-format", "json", "j"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["terraform_version"], "1.9.8");
        assert_eq!(report["version_source"], "detected");
    }
}
