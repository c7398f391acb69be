//! assemble-prune: prune source trees against an assemble manifest
//!
//! Deletes upstream copies of every path listed in the manifest, leaving the
//! assembled target tree untouched.

use std::process::ExitCode;

use assemble_prune::cli::{CliArgs, Commands};
use assemble_prune::config::Config;
use assemble_prune::error::PruneError;
use assemble_prune::init;
use assemble_prune::pruner;

fn main() -> ExitCode {
    let args = CliArgs::parse_args();

    if let Some(Commands::Init) = args.command {
        return match init::run_init(args.config.as_deref()) {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("assemble-prune: {:#}", e);
                ExitCode::FAILURE
            }
        };
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("assemble-prune: {}", e);
            e.exit_code().into()
        }
    }
}

/// Main execution logic
fn run(args: CliArgs) -> Result<(), PruneError> {
    let cwd = std::env::current_dir().map_err(PruneError::CurrentDir)?;

    let settings = Config::load(args.config.as_deref())?.into_settings(
        args.manifest,
        args.target,
        args.sources,
    );

    pruner::run(&settings, &cwd)?;
    Ok(())
}
