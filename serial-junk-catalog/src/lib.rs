//! Edition catalog construction from per-dump records.
//!
//! The pipeline is strictly sequential and order-sensitive:
//!
//! ```text
//! DumpRecord ─▶ derive ─▶ CodeAccumulator (one code per hash) ─▶ CatalogBuilder ─▶ GameCatalog
//! ```
//!
//! [`derive`] is a pure function of one record and the rules tables.
//! [`CodeAccumulator`] applies the per-hash precedence (a chip code is never
//! replaced) and the unresolved-region policy. [`CatalogBuilder`] files each
//! surviving entry under game → region → revision, reporting duplicate and
//! cross-system conflicts instead of overwriting.

pub mod accumulate;
pub mod builder;
pub mod catalog;
pub mod derive;
pub mod yaml;

pub use accumulate::{
    AccumulateError, AccumulateStats, Accumulated, CodeAccumulator, Precedence,
    UncataloguedCode, accumulate, decide_precedence,
};
pub use builder::{CatalogBuild, CatalogBuilder, Conflict, build_catalog};
pub use catalog::{CatalogEntry, CatalogSummary, GameCatalog, SystemCounts};
pub use derive::{DeriveError, DerivedCode, Derivation, SkipReason, derive};
pub use yaml::{YamlError, catalog_from_yaml_str, catalog_to_yaml_string, load_catalog, save_catalog};
