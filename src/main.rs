use clap::Parser;
use miette::Result;

use sonar_launcher::cli::{Cli, Commands};
use sonar_launcher::commands::{local, scan};
use sonar_launcher::errors::LaunchError;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    let result = match cli.command {
        Commands::Scan(args) => scan::run(args),
        Commands::Local(args) => local::run(args),
    };

    // a scanner failure ends the invocation with the child's own exit status
    if let Err(report) = result {
        if let Some(LaunchError::ChildProcessFailure { code }) =
            report.downcast_ref::<LaunchError>()
        {
            std::process::exit(*code);
        }

        return Err(report);
    }

    Ok(())
}
