//! serial-junk CLI
//!
//! Builds Game Boy edition catalogs from dump records and cross-checks them
//! against master lists.

mod cli_types;
mod commands;
mod config;
mod error;
mod logging;

use clap::Parser;

use cli_types::{Cli, Commands, RulesAction};
use commands::build::run_build;
use commands::compare::run_compare;
use commands::rules::{run_rules_path, run_rules_show};
use commands::shared::run_shared;
pub(crate) use error::CliError;

/// Print an empty info line.
pub(crate) fn log_blank() {
    log::info!("");
}

fn run(cli: Cli) -> Result<(), CliError> {
    let rules = cli.rules.as_deref();
    match cli.command {
        Commands::Build(args) => run_build(args, rules),
        Commands::Compare(args) => run_compare(args),
        Commands::Shared(args) => run_shared(args, rules),
        Commands::Rules { action } => match action {
            RulesAction::Show => run_rules_show(rules),
            RulesAction::Path => {
                run_rules_path();
                Ok(())
            }
        },
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{e}");
        log::logger().flush();
        std::process::exit(1);
    }
}
