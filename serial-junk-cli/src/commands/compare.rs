use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use serial_junk_catalog::load_catalog;
use serial_junk_import::{read_master_lists, write_diff_report};
use serial_junk_xref::{diff_against_master, diff_catalogs};

use crate::CliError;
use crate::cli_types::CompareArgs;

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), CliError> {
    let catalog = load_catalog(&args.catalog)?;
    log::debug!("Loaded {} entries from {}", catalog.len(), args.catalog.display());

    let diff = match &args.against_catalog {
        Some(reference) => {
            let reference = load_catalog(reference)?;
            diff_catalogs(&catalog, &reference)
        }
        None => {
            let master = read_master_lists(&args.masters)?;
            log::debug!("{} master entries", master.len());
            diff_against_master(&catalog, &master)
        }
    };

    let written = write_diff_report(&args.output, &diff)?;

    log::info!(
        "{}",
        "Catalog Comparison".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Missing from catalog:      {:>6}", diff.master_only.len());
    log::info!("  Missing from master list:  {:>6}", diff.derived_only.len());
    crate::log_blank();
    for path in &written {
        log::info!(
            "Wrote {}",
            path.display().if_supports_color(Stdout, |t| t.cyan())
        );
    }
    Ok(())
}
