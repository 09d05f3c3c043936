//! Version probe that runs `terraform --version`.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tfmod_core::{
    application::ports::VersionProbe,
    domain::{UnresolvedReason, VersionLookup, parse_version_output},
};
use tracing::{debug, instrument, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Spawns the Terraform binary and parses its version banner.
///
/// The child is killed and reaped if it outlives `timeout`.
#[derive(Debug, Clone)]
pub struct CommandVersionProbe {
    binary: PathBuf,
    timeout: Duration,
}

impl CommandVersionProbe {
    pub const DEFAULT_BINARY: &'static str = "terraform";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    pub fn binary(&self) -> &std::path::Path {
        &self.binary
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `<binary> --version` and return its stdout if it exits 0 in time.
    fn run(&self) -> Result<String, UnresolvedReason> {
        let mut child = Command::new(&self.binary)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => UnresolvedReason::NotInstalled,
                _ => UnresolvedReason::Io(e.to_string()),
            })?;

        // Drain stdout on its own thread so a chatty child can't block on a
        // full pipe while we poll for exit.
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| UnresolvedReason::Io("stdout was not captured".into()))?;
        let reader = thread::spawn(move || {
            let mut buf = String::new();
            stdout.read_to_string(&mut buf).map(|_| buf)
        });

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    if let Err(e) = child.kill() {
                        warn!(error = %e, "Failed to kill timed-out terraform process");
                    }
                    let _ = child.wait();
                    // The reader is detached; it ends once every holder of
                    // the pipe's write end has exited.
                    return Err(UnresolvedReason::TimedOut {
                        after: self.timeout,
                    });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(UnresolvedReason::Io(e.to_string()));
                }
            }
        };

        if !status.success() {
            return Err(UnresolvedReason::ExitStatus {
                code: status.code(),
            });
        }

        reader
            .join()
            .map_err(|_| UnresolvedReason::Io("stdout reader panicked".into()))?
            .map_err(|e| UnresolvedReason::Io(e.to_string()))
    }
}

impl Default for CommandVersionProbe {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BINARY, Self::DEFAULT_TIMEOUT)
    }
}

impl VersionProbe for CommandVersionProbe {
    #[instrument(skip_all, fields(binary = %self.binary.display()))]
    fn probe(&self) -> VersionLookup {
        let lookup = match self.run() {
            Ok(stdout) => match parse_version_output(&stdout) {
                Some(version) => VersionLookup::Resolved(version),
                None => VersionLookup::Unresolved(UnresolvedReason::UnrecognisedOutput),
            },
            Err(reason) => VersionLookup::Unresolved(reason),
        };
        debug!(?lookup, "Terraform version probed");
        lookup
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;

    fn stub(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("terraform");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn probe(binary: PathBuf, timeout: Duration) -> VersionLookup {
        CommandVersionProbe::new(binary, timeout).probe()
    }

    #[test]
    fn parses_version_from_stub() {
        let tmp = TempDir::new().unwrap();
        let bin = stub(tmp.path(), "echo 'Terraform v1.7.5'\necho 'on linux_amd64'");
        assert_eq!(
            probe(bin, Duration::from_secs(5)),
            VersionLookup::Resolved("1.7.5".parse().unwrap())
        );
    }

    #[test]
    fn missing_binary_is_not_installed() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            probe(tmp.path().join("nope"), Duration::from_secs(5)),
            VersionLookup::Unresolved(UnresolvedReason::NotInstalled)
        );
    }

    #[test]
    fn non_zero_exit_is_unresolved() {
        let tmp = TempDir::new().unwrap();
        let bin = stub(tmp.path(), "echo 'Terraform v1.7.5'\nexit 3");
        assert_eq!(
            probe(bin, Duration::from_secs(5)),
            VersionLookup::Unresolved(UnresolvedReason::ExitStatus { code: Some(3) })
        );
    }

    #[test]
    fn unexpected_output_is_unresolved() {
        let tmp = TempDir::new().unwrap();
        let bin = stub(tmp.path(), "echo 'OpenTofu v1.8.0'");
        assert_eq!(
            probe(bin, Duration::from_secs(5)),
            VersionLookup::Unresolved(UnresolvedReason::UnrecognisedOutput)
        );
    }

    #[test]
    fn slow_binary_times_out() {
        let tmp = TempDir::new().unwrap();
        let bin = stub(tmp.path(), "exec sleep 5");
        let started = Instant::now();
        let lookup = probe(bin, Duration::from_millis(300));

        assert!(matches!(
            lookup,
            VersionLookup::Unresolved(UnresolvedReason::TimedOut { .. })
        ));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn defaults_target_terraform_with_ten_second_timeout() {
        let probe = CommandVersionProbe::default();
        assert_eq!(probe.binary(), Path::new("terraform"));
        assert_eq!(probe.timeout(), Duration::from_secs(10));
    }
}
