//! Target-platform detection for scanner downloads.

use std::fmt::Display;
use std::str::FromStr;

use crate::env::var_nonempty;
use crate::errors::LaunchError;

pub const SONAR_SCANNER_TARGET_OS: &str = "SONAR_SCANNER_TARGET_OS";

/// Platform bucket used to select a download artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOs {
    Windows,
    Linux,
    Macosx,
    Universal,
}

impl TargetOs {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetOs::Windows => "windows",
            TargetOs::Linux => "linux",
            TargetOs::Macosx => "macosx",
            TargetOs::Universal => "universal",
        }
    }

    /// Suffix of the download artifact and install directory for this
    /// platform. The universal archive carries no suffix.
    pub fn suffix(&self) -> &'static str {
        match self {
            TargetOs::Windows => "-windows",
            TargetOs::Linux => "-linux",
            TargetOs::Macosx => "-macosx",
            TargetOs::Universal => "",
        }
    }
}

impl FromStr for TargetOs {
    type Err = LaunchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "windows" => Ok(TargetOs::Windows),
            "linux" => Ok(TargetOs::Linux),
            "macosx" => Ok(TargetOs::Macosx),
            "universal" => Ok(TargetOs::Universal),
            other => Err(LaunchError::UnsupportedPlatform(other.to_string())),
        }
    }
}

impl Display for TargetOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform suffix for an arbitrary platform string, validated against the
/// supported set.
pub fn platform_suffix(platform: &str) -> Result<&'static str, LaunchError> {
    Ok(platform.parse::<TargetOs>()?.suffix())
}

/// Target platform of the current invocation, honoring the
/// `SONAR_SCANNER_TARGET_OS` override.
pub fn find_target_os() -> Result<TargetOs, LaunchError> {
    resolve_target_os(os_identity(), var_nonempty(SONAR_SCANNER_TARGET_OS))
}

fn resolve_target_os(
    raw_os: &str,
    override_os: Option<String>,
) -> Result<TargetOs, LaunchError> {
    if let Some(os) = override_os {
        return os.parse();
    }

    let mapped = if raw_os.starts_with("win") {
        "windows"
    } else if raw_os.starts_with("linux") {
        "linux"
    } else if raw_os.starts_with("darwin") {
        "macosx"
    } else {
        // unknown identities fall through to validation unmapped
        raw_os
    };

    mapped.parse()
}

// Kernel-style identity of the running OS.
fn os_identity() -> &'static str {
    if cfg!(target_os = "macos") {
        "darwin"
    } else {
        std::env::consts::OS
    }
}
