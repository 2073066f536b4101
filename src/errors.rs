//! Failure modes of a launcher invocation.

use miette::Diagnostic;
use thiserror::Error;

use crate::platform::TargetOs;

#[derive(Debug, Error, Diagnostic)]
pub enum LaunchError {
    #[error("Your platform '{0}' is currently not supported.")]
    UnsupportedPlatform(String),

    #[error("Local install of SonarScanner not found.")]
    #[diagnostic(help("install the SonarScanner CLI and make sure it is on your PATH"))]
    LocalExecutableNotFound,

    #[error("impossible to download and extract binary: {reason}")]
    #[diagnostic(help(
        "SonarScanner binaries probably don't exist for your OS ({os}).\nIn such situation, the best solution is to install the standard SonarScanner (requires a JVM).\nCheck it out at https://redirect.sonarsource.com/doc/install-configure-scanner.html"
    ))]
    DownloadOrExtractFailed { reason: String, os: TargetOs },

    #[error("invalid JSON in SONARQUBE_SCANNER_PARAMS")]
    MalformedEnvironmentParams(#[source] serde_json::Error),

    #[error("SonarScanner exited with code {code}")]
    ChildProcessFailure { code: i32 },
}
