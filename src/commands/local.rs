use std::path::Path;

use clap::Args as ClapArgs;

use crate::params::ParameterSet;
use crate::{exec, params};

#[derive(ClapArgs)]
pub struct Args {
    /// Extra arguments forwarded to the scanner
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub scanner_args: Vec<String>,
}

pub fn run(args: Args) -> miette::Result<()> {
    println!("Starting analysis (with local install of the SonarScanner)...");

    let options = params::prepare_exec_environment(&ParameterSet::new())?;
    let command = exec::local_scanner_command()?;

    exec::run_scanner(Path::new(&command), &args.scanner_args, &options)?;

    println!("Analysis finished.");
    Ok(())
}
