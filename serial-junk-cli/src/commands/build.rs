use std::fs::File;
use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use serial_junk_catalog::{AccumulateStats, CatalogBuild, CodeAccumulator, build_catalog, save_catalog};
use serial_junk_core::SystemPrefix;
use serial_junk_import::{RecordSource, write_code_list};

use crate::CliError;
use crate::cli_types::BuildArgs;
use crate::config::{resolve_rules, split_catalog_path};

pub(crate) fn run_build(args: BuildArgs, rules_flag: Option<&Path>) -> Result<(), CliError> {
    let (mut rules, origin) = resolve_rules(rules_flag)?;
    if let Some(policy) = args.on_unresolved_region {
        rules.on_unresolved_region = policy.into();
    }
    log::debug!(
        "Rules from {}, unresolved regions: {}",
        origin,
        rules.on_unresolved_region
    );

    let source = RecordSource::new(args.inputs.clone());
    let mut acc = CodeAccumulator::new(&rules);
    for record in source.records() {
        acc.push(&record?)?;
    }
    let accumulated = acc.finish();

    print_stats(&accumulated.stats);
    for (hash, name) in &accumulated.uncoded {
        log::debug!("  no code: {} ({})", name, hash);
    }

    if let Some(codes) = &args.codes {
        write_code_list(
            File::create(codes)?,
            &accumulated.entries,
            &accumulated.uncatalogued,
        )?;
        log::info!("Wrote code list to {}", codes.display());
    }

    let build = build_catalog(accumulated.entries);

    save_catalog(&args.output, &build.catalog)?;
    log::info!(
        "Wrote catalog to {}",
        args.output.display().if_supports_color(Stdout, |t| t.cyan())
    );
    if !args.no_split {
        for &system in SystemPrefix::all() {
            let path = split_catalog_path(&args.output, system.slug());
            save_catalog(&path, &build.catalog.for_system(system))?;
            log::info!(
                "Wrote {} catalog to {}",
                system,
                path.display().if_supports_color(Stdout, |t| t.cyan())
            );
        }
    }

    crate::log_blank();
    print_summary(&build);
    Ok(())
}

fn print_stats(stats: &AccumulateStats) {
    log::info!(
        "{}",
        "Derived Codes".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Records read:       {:>8}", stats.records);
    log::info!("  Bad dumps:          {:>8}", stats.bad_dumps);
    log::info!("  Already settled:    {:>8}", stats.already_settled);
    log::info!("  Unknown serial:     {:>8}", stats.unknown_serial);
    log::info!("  Excluded:           {:>8}", stats.excluded);
    log::info!("  Unknown system:     {:>8}", stats.unknown_system);
    log::info!("  Malformed:          {:>8}", stats.malformed);
    log::info!("  Uncatalogued chip:  {:>8}", stats.uncatalogued);
    if stats.unresolved_region > 0 {
        log::info!("  Unresolved region:  {:>8}", stats.unresolved_region);
    }
    log::info!(
        "has code: {}/{} ({} synthetic)",
        stats.coded,
        stats.hashes,
        stats.synthetic
    );
    crate::log_blank();
}

fn print_summary(build: &CatalogBuild) {
    let summary = build.summary();
    log::info!(
        "{}",
        "Catalog Summary".if_supports_color(Stdout, |t| t.bold()),
    );
    for &system in SystemPrefix::all() {
        let counts = summary.system(system);
        log::info!(
            "  {}:  {:>6} games  {:>6} revisions",
            system,
            counts.games,
            counts.revisions
        );
    }
    let total = summary.total();
    log::info!(
        "  All:  {:>6} games  {:>6} revisions",
        total.games,
        total.revisions
    );

    if build.conflicts.is_empty() {
        log::info!(
            "  Conflicts: {}",
            "none".if_supports_color(Stdout, |t| t.green())
        );
    } else {
        log::info!(
            "  Conflicts: {}",
            build
                .conflicts
                .len()
                .if_supports_color(Stdout, |t| t.yellow())
        );
    }
}
