use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;


/// Environment variables the launcher consumes. Scrubbed from every test
/// invocation so ambient CI configuration cannot leak in.
const LAUNCHER_VARS: &[&str] = &[
    "SONARQUBE_SCANNER_PARAMS",
    "SONAR_SCANNER_VERSION",
    "SONAR_SCANNER_MIRROR",
    "SONAR_SCANNER_TARGET_OS",
    "SONAR_SCANNER_BIN",
    "SONAR_BINARY_CACHE",
];

/// A test context that provides an isolated temporary directory.
/// Tests can run in parallel because each has its own temp directory.
pub struct TestContext {
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    /// Returns the path to the temporary directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Run the launcher in this temp directory with a controlled environment
    pub fn run_launcher(&self, args: &[&str], envs: &[(&str, &str)]) -> CommandResult {
        let mut cmd =
            Command::cargo_bin("sonar-launcher").expect("Failed to find sonar-launcher binary");
        cmd.args(args);
        cmd.current_dir(self.path());

        for var in LAUNCHER_VARS {
            cmd.env_remove(var);
        }
        for (key, value) in envs {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute sonar-launcher");

        CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            status: output.status,
        }
    }

    /// Get full path to a file in the temp directory
    pub fn file_path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.path().join(path)
    }

    /// Write file to temp directory (creates parent directories)
    pub fn write_file(&self, path: impl AsRef<Path>, content: &str) -> PathBuf {
        let full_path = self.file_path(&path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|_| panic!("Failed to create directory: {}", parent.display()));
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|_| panic!("Failed to write file: {}", full_path.display()));
        full_path
    }

    /// Write an executable stub that stands in for the scanner binary
    #[cfg(unix)]
    pub fn write_stub_scanner(&self, path: impl AsRef<Path>, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let full_path = self.write_file(path, script);
        fs::set_permissions(&full_path, fs::Permissions::from_mode(0o755))
            .unwrap_or_else(|_| panic!("Failed to chmod: {}", full_path.display()));
        full_path
    }
}

pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

pub fn assert_success(result: &CommandResult) {
    assert!(
        result.success(),
        "Expected command to succeed but it failed.\n\nSTDOUT:\n{}\n\nSTDERR:\n{}",
        result.stdout,
        result.stderr
    );
}

pub fn assert_failure(result: &CommandResult) {
    assert!(
        !result.success(),
        "Expected command to fail but it succeeded.\n\nSTDOUT:\n{}\n\nSTDERR:\n{}",
        result.stdout,
        result.stderr
    );
}

pub fn assert_output_contains(result: &CommandResult, pattern: &str) {
    assert!(
        result.stdout.contains(pattern),
        "Expected stdout to contain '{}', but it didn't.\n\nSTDOUT:\n{}\n\nSTDERR:\n{}",
        pattern,
        result.stdout,
        result.stderr
    );
}

pub fn assert_output_lacks(result: &CommandResult, pattern: &str) {
    assert!(
        !result.stdout.contains(pattern),
        "Expected stdout to not contain '{}', but it did.\n\nSTDOUT:\n{}",
        pattern,
        result.stdout
    );
}

pub fn assert_stderr_contains(result: &CommandResult, pattern: &str) {
    assert!(
        result.stderr.contains(pattern),
        "Expected stderr to contain '{}', but it didn't.\n\nSTDOUT:\n{}\n\nSTDERR:\n{}",
        pattern,
        result.stdout,
        result.stderr
    );
}
