//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use serial_junk_core::UnresolvedRegionPolicy;
use serial_junk_xref::RegionKeyset;

#[derive(Parser)]
#[command(name = "serial-junk")]
#[command(about = "Build and cross-check Game Boy edition catalogs from dump records", long_about = None)]
pub(crate) struct Cli {
    /// Derivation rules file (defaults to <config dir>/serial-junk/rules.toml if present)
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Derive codes from dump records and write the catalog
    Build(BuildArgs),

    /// Diff a catalog against master lists or another catalog
    Compare(CompareArgs),

    /// Find hashes with conflicting chip codes and regions with differing dumps
    Shared(SharedArgs),

    /// Inspect derivation rules
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Semicolon-delimited dump record files, read in order
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Catalog YAML to write
    #[arg(short, long)]
    pub output: PathBuf,

    /// Also write a flat `hash;code;name;is_synthetic` list
    #[arg(long)]
    pub codes: Option<PathBuf>,

    /// Don't write the per-system catalogs next to the combined one
    #[arg(long)]
    pub no_split: bool,

    /// What to do when a release name has no known region marker
    #[arg(long, value_enum)]
    pub on_unresolved_region: Option<PolicyArg>,
}

#[derive(Args)]
pub(crate) struct CompareArgs {
    /// Catalog YAML produced by `build`
    pub catalog: PathBuf,

    /// Master list files (one per system)
    #[arg(required_unless_present = "against_catalog")]
    pub masters: Vec<PathBuf>,

    /// Compare against another catalog instead of master lists
    #[arg(long, conflicts_with = "masters")]
    pub against_catalog: Option<PathBuf>,

    /// Directory for the report files
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Args)]
pub(crate) struct SharedArgs {
    /// Semicolon-delimited dump record files, read in order
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory for the report files
    #[arg(short, long)]
    pub output: PathBuf,

    /// Two or three region letters to compare, in priority order
    #[arg(long, default_value = "EPU")]
    pub keyset: RegionKeyset,
}

#[derive(Subcommand)]
pub(crate) enum RulesAction {
    /// Print the effective rules as TOML
    Show,

    /// Print the default rules file path
    Path,
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum PolicyArg {
    /// Stop at the first unresolved release; nothing is written
    Abort,
    /// Log the release and continue without a code for it
    Skip,
}

impl From<PolicyArg> for UnresolvedRegionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Abort => Self::Abort,
            PolicyArg::Skip => Self::Skip,
        }
    }
}
