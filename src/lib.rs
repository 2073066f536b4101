//! sonar-launcher - launcher for the SonarScanner CLI
//!
//! This library provides the core functionality of the sonar-launcher CLI
//! tool: analysis-parameter resolution, target-platform detection, and
//! download/caching of the scanner binaries.

pub mod cli;
pub mod commands;
mod env;
pub mod errors;
pub mod exec;
pub mod install;
pub mod params;
pub mod platform;
