//! Locating and installing the scanner binaries.
//!
//! Downloaded scanners live in a versioned on-disk cache keyed by version
//! and platform suffix. The cache is probed first; the archive is only
//! fetched when nothing runnable is installed yet.

use std::path::{Path, PathBuf};

use miette::{Context as _, IntoDiagnostic as _};
use tracing::debug;

use crate::env::{var_nonempty, var_or};
use crate::errors::LaunchError;
use crate::exec::scanner_command_name;
use crate::platform::find_target_os;

pub const SONAR_SCANNER_VERSION: &str = "SONAR_SCANNER_VERSION";
pub const SONAR_SCANNER_MIRROR: &str = "SONAR_SCANNER_MIRROR";
pub const SONAR_SCANNER_BIN: &str = "SONAR_SCANNER_BIN";
pub const SONAR_BINARY_CACHE: &str = "SONAR_BINARY_CACHE";

const DEFAULT_SCANNER_VERSION: &str = "4.5.0.2216";
const DEFAULT_SCANNER_MIRROR: &str =
    "https://binaries.sonarsource.com/Distribution/sonar-scanner-cli/";

/// Version of the scanner to resolve, honoring the override variable.
pub fn scanner_version() -> String {
    var_or(SONAR_SCANNER_VERSION, DEFAULT_SCANNER_VERSION)
}

/// Base directory of the on-disk scanner cache.
pub fn install_folder_path() -> miette::Result<PathBuf> {
    install_folder_from(var_nonempty(SONAR_BINARY_CACHE).map(PathBuf::from))
}

fn install_folder_from(base: Option<PathBuf>) -> miette::Result<PathBuf> {
    let base = match base {
        Some(base) => base,
        None => dirs::home_dir().ok_or_else(|| miette::miette!("failed to get home directory"))?,
    };

    Ok(base.join(".sonar").join("native-sonar-scanner"))
}

// Archives unpack to `sonar-scanner-<version><suffix>/bin/sonar-scanner`,
// with a `.bat` entry point on Windows.
fn executable_path(install_folder: &Path, version: &str, suffix: &str) -> PathBuf {
    install_folder
        .join(format!("sonar-scanner-{version}{suffix}"))
        .join("bin")
        .join(scanner_command_name())
}

// The mirror is concatenated as-is, so a custom mirror must end with '/'.
fn download_url(mirror: &str, version: &str, suffix: &str) -> String {
    format!("{mirror}sonar-scanner-cli-{version}{suffix}.zip")
}

/// Resolve a runnable scanner executable, downloading the platform archive
/// into the cache when nothing is installed yet. `SONAR_SCANNER_BIN`
/// bypasses the path computation entirely.
pub fn resolve_executable() -> miette::Result<PathBuf> {
    let version = scanner_version();
    let target_os = find_target_os()?;
    let suffix = target_os.suffix();
    let install_folder = install_folder_path()?;

    let executable = match var_nonempty(SONAR_SCANNER_BIN) {
        Some(path) => PathBuf::from(path),
        None => executable_path(&install_folder, &version, suffix),
    };

    println!("Checking if executable exists: {}", executable.display());

    if executable.is_file() {
        println!("Platform binaries for SonarScanner found. Using it.");
        return Ok(executable);
    }

    println!("Could not find executable in \"{}\".", install_folder.display());
    println!("Proceed with download of the platform binaries for SonarScanner...");
    println!("Creating {}", install_folder.display());

    std::fs::create_dir_all(&install_folder)
        .into_diagnostic()
        .context("creating scanner cache directory")?;

    let mirror = var_or(SONAR_SCANNER_MIRROR, DEFAULT_SCANNER_MIRROR);
    let url = download_url(&mirror, &version, suffix);

    println!("Downloading from {url}");
    println!(
        "(executable will be saved in cache folder: {})",
        install_folder.display()
    );

    block_on_runtime_aware(download_and_extract(&url, &install_folder)).map_err(|report| {
        LaunchError::DownloadOrExtractFailed {
            reason: report.to_string(),
            os: target_os,
        }
    })?;

    Ok(executable)
}

/// Fetch the scanner archive and unpack it into the cache directory. The
/// zip is staged in a temporary directory so a failed transfer leaves no
/// partial archive behind.
async fn download_and_extract(url: &str, install_folder: &Path) -> miette::Result<()> {
    let client = reqwest::Client::new();
    let response = client.get(url).send().await.into_diagnostic()?;

    if !response.status().is_success() {
        return Err(miette::miette!("download failed: HTTP {}", response.status()));
    }

    if let Some(total) = response.content_length() {
        println!("Downloaded total: {total}");
    }

    let temp_dir = tempfile::TempDir::new().into_diagnostic()?;
    let zip_path = temp_dir.path().join("sonar-scanner-cli.zip");

    let content = response.bytes().await.into_diagnostic()?;
    std::fs::write(&zip_path, &content).into_diagnostic()?;

    debug!(
        "extracting {} into {}",
        zip_path.display(),
        install_folder.display()
    );

    let file = std::fs::File::open(&zip_path).into_diagnostic()?;
    let mut archive = zip::ZipArchive::new(file).into_diagnostic()?;
    archive.extract(install_folder).into_diagnostic()?;

    Ok(())
}

fn block_on_runtime_aware<F, T>(future: F) -> miette::Result<T>
where
    F: std::future::Future<Output = miette::Result<T>>,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => tokio::task::block_in_place(|| handle.block_on(future)),
        Err(_) => {
            let runtime = tokio::runtime::Runtime::new().into_diagnostic()?;
            runtime.block_on(future)
        }
    }
}
