use clap::Args as ClapArgs;

use crate::params::ParameterSet;
use crate::{exec, install, params};

#[derive(ClapArgs)]
pub struct Args {
    /// Analysis properties merged on top of the environment-provided ones
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE")]
    pub define: Vec<String>,

    /// Extra arguments forwarded to the scanner
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub scanner_args: Vec<String>,
}

pub fn run(args: Args) -> miette::Result<()> {
    println!("Starting analysis...");

    let caller_params = parse_defines(&args.define)?;
    let options = params::prepare_exec_environment(&caller_params)?;
    let executable = install::resolve_executable()?;

    exec::run_scanner(&executable, &args.scanner_args, &options)?;

    println!("Analysis finished.");
    Ok(())
}

fn parse_defines(defines: &[String]) -> miette::Result<ParameterSet> {
    let mut caller_params = ParameterSet::new();

    for define in defines {
        let Some((key, value)) = define.split_once('=') else {
            miette::bail!("invalid property '{define}', expected KEY=VALUE");
        };

        caller_params.insert(key.to_string(), value.into());
    }

    Ok(caller_params)
}
