//! Spawning the scanner process.

use std::path::Path;
use std::process::{Command, Stdio};

use miette::{Context as _, IntoDiagnostic as _};
use tracing::debug;

use crate::env::var_nonempty;
use crate::errors::LaunchError;
use crate::install::SONAR_SCANNER_VERSION;
use crate::params::ExecOptions;

/// Client identity reported to the SonarQube server.
const SCANNER_CLIENT: &str = "ScannerNpm";

/// Scanner versions older than this reject the `--from` identity flag.
const MIN_IDENTITY_VERSION: &str = "4.4";

/// Command name of the scanner, with the Windows entry-point extension when
/// the launcher itself runs on Windows.
pub fn scanner_command_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "sonar-scanner.bat"
    } else {
        "sonar-scanner"
    }
}

/// Identity arguments prepended to every scanner invocation.
pub fn identity_args() -> Vec<String> {
    identity_args_for(var_nonempty(SONAR_SCANNER_VERSION).as_deref())
}

// A forced legacy scanner predates the identity flag; send nothing rather
// than an argument it would reject.
fn identity_args_for(forced_version: Option<&str>) -> Vec<String> {
    match forced_version {
        Some(version) if version < MIN_IDENTITY_VERSION => Vec::new(),
        _ => vec![format!(
            "--from={SCANNER_CLIENT}/{}",
            env!("CARGO_PKG_VERSION")
        )],
    }
}

/// Probe the execution search path for an installed scanner. Never
/// downloads; the caller decides what a miss means.
pub fn local_scanner_command() -> Result<String, LaunchError> {
    let command = scanner_command_name();

    println!("Trying to find a local install of the SonarScanner");

    let probe = Command::new(command)
        .arg("-v")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match probe {
        Ok(status) if status.success() => {
            println!("Local install of SonarScanner found. Using it.");
            Ok(command.to_string())
        }
        _ => Err(LaunchError::LocalExecutableNotFound),
    }
}

/// Run the scanner with the merged environment, forwarding `args` after the
/// identity flag. Stdio is inherited so scanner output streams through; a
/// non-zero exit surfaces as `ChildProcessFailure` carrying the code.
pub fn run_scanner(executable: &Path, args: &[String], options: &ExecOptions) -> miette::Result<()> {
    let mut cmd = Command::new(executable);

    cmd.args(identity_args());
    cmd.args(args);
    cmd.env_clear();
    cmd.envs(&options.env);
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    debug!("running scanner: {cmd:?}");

    let status = cmd
        .status()
        .into_diagnostic()
        .context("failed to run the SonarScanner executable")?;

    if !status.success() {
        return Err(LaunchError::ChildProcessFailure {
            code: status.code().unwrap_or(1),
        }
        .into());
    }

    Ok(())
}
