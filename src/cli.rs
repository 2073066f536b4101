//! CLI parsing for sonar-launcher

use clap::{Parser, Subcommand};

use crate::commands;

#[derive(Parser)]
#[command(name = "sonar-launcher")]
#[command(about = "Launcher for the SonarScanner CLI", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an analysis, downloading the scanner binaries if needed
    Scan(commands::scan::Args),

    /// Run an analysis with a SonarScanner already installed on the PATH
    Local(commands::local::Args),
}
