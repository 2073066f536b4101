//! Analysis-parameter resolution.
//!
//! Parameters reach the scanner as a JSON object serialized into the
//! `SONARQUBE_SCANNER_PARAMS` environment variable. Three sources are
//! merged, later ones winning per key: defaults computed from the working
//! directory, parameters a previous tool already exported into the
//! environment, and parameters supplied by the caller.

use std::collections::HashMap;
use std::path::Path;

use miette::IntoDiagnostic as _;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::LaunchError;

pub const SONARQUBE_SCANNER_PARAMS: &str = "SONARQUBE_SCANNER_PARAMS";

/// Globs excluded from analysis unless the caller says otherwise.
pub const DEFAULT_EXCLUSIONS: &str =
    "node_modules/**,bower_components/**,jspm_packages/**,typings/**,lib-cov/**";

/// Cap on captured child output, applied where output is collected.
pub const MAX_OUTPUT_BUFFER: usize = 1024 * 1024;

/// Analysis properties keyed by dotted names like `sonar.host.url`.
pub type ParameterSet = Map<String, Value>;

/// Options for spawning the scanner process. The runner inherits
/// stdin/stdout/stderr so scanner output streams straight through.
pub struct ExecOptions {
    /// Full child environment: inherited variables plus the serialized
    /// parameter set under `SONARQUBE_SCANNER_PARAMS`.
    pub env: HashMap<String, String>,
    pub max_buffer: usize,
}

#[derive(Deserialize)]
struct ProjectManifest {
    name: Option<String>,
    version: Option<String>,
    description: Option<String>,
}

fn project_defaults(working_dir: &Path) -> ParameterSet {
    let mut params = ParameterSet::new();
    params.insert("sonar.projectDescription".into(), "No description.".into());
    params.insert("sonar.sources".into(), ".".into());
    params.insert("sonar.exclusions".into(), DEFAULT_EXCLUSIONS.into());

    let manifest_path = working_dir.join("package.json");
    let Ok(raw) = std::fs::read_to_string(&manifest_path) else {
        return params;
    };

    // a manifest that does not parse contributes nothing
    let Ok(manifest) = serde_json::from_str::<ProjectManifest>(&raw) else {
        debug!("ignoring unparseable manifest at {}", manifest_path.display());
        return params;
    };

    if let Some(name) = manifest.name {
        params.insert("sonar.projectKey".into(), name.clone().into());
        params.insert("sonar.projectName".into(), name.into());
    }

    if let Some(version) = manifest.version {
        params.insert("sonar.projectVersion".into(), version.into());
    }

    if let Some(description) = manifest.description {
        params.insert("sonar.projectDescription".into(), description.into());
    }

    params
}

/// Merge analysis properties from all sources. Later sources win per key:
/// computed defaults, then environment-provided parameters, then
/// caller-supplied parameters.
pub fn resolve(
    caller_params: &ParameterSet,
    working_dir: &Path,
    env_params: &ParameterSet,
) -> ParameterSet {
    let mut merged = project_defaults(working_dir);

    for (key, value) in env_params {
        merged.insert(key.clone(), value.clone());
    }

    for (key, value) in caller_params {
        merged.insert(key.clone(), value.clone());
    }

    merged
}

/// Decode the parameter set a previous tool exported into the environment.
/// An absent variable yields an empty set; JSON that does not parse is a
/// hard error so caller misconfiguration surfaces before the scanner runs.
pub fn decode_env_params(raw: Option<&str>) -> Result<ParameterSet, LaunchError> {
    match raw {
        Some(raw) => serde_json::from_str(raw).map_err(LaunchError::MalformedEnvironmentParams),
        None => Ok(ParameterSet::new()),
    }
}

/// Build the child-process options for a scan: the inherited environment
/// with the merged parameter set layered in under
/// `SONARQUBE_SCANNER_PARAMS`.
pub fn prepare_exec_environment(caller_params: &ParameterSet) -> miette::Result<ExecOptions> {
    let working_dir = std::env::current_dir().into_diagnostic()?;

    let raw = crate::env::var_nonempty(SONARQUBE_SCANNER_PARAMS);
    let env_params = decode_env_params(raw.as_deref())?;

    let merged = resolve(caller_params, &working_dir, &env_params);

    let mut env: HashMap<String, String> = std::env::vars().collect();
    env.insert(
        SONARQUBE_SCANNER_PARAMS.to_string(),
        serde_json::to_string(&merged).into_diagnostic()?,
    );

    Ok(ExecOptions {
        env,
        max_buffer: MAX_OUTPUT_BUFFER,
    })
}
