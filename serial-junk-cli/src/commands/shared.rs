use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use serial_junk_import::{RecordSource, write_shared_report};
use serial_junk_xref::SharedSerialScan;

use crate::CliError;
use crate::cli_types::SharedArgs;
use crate::config::resolve_rules;

pub(crate) fn run_shared(args: SharedArgs, rules_flag: Option<&Path>) -> Result<(), CliError> {
    let (rules, origin) = resolve_rules(rules_flag)?;
    log::debug!("Rules from {}, keyset {}", origin, args.keyset);

    let mut scan = SharedSerialScan::new(&rules, args.keyset.clone());
    for record in RecordSource::new(args.inputs.clone()).records() {
        scan.observe(&record?);
    }
    let report = scan.finish();

    let written = write_shared_report(&args.output, &report)?;

    log::info!(
        "{}",
        "Shared Serials".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Shared codes:    {:>6}", report.shared.len());
    log::info!("  Disjoint codes:  {:>6}", report.disjoint.len());
    crate::log_blank();
    for path in &written {
        log::info!(
            "Wrote {}",
            path.display().if_supports_color(Stdout, |t| t.cyan())
        );
    }
    Ok(())
}
