//! Cross-referencing derived catalogs against each other and against the
//! manufacturer's master list.
//!
//! Two independent passes live here:
//!
//! - [`diff`]: which editions one side lists and the other lacks.
//! - [`shared`]: per-hash chip-code disagreements and per-game regional
//!   splits, computed straight from dump records.
//!
//! Both are pure over fully built inputs.

pub mod diff;
pub mod master;
pub mod shared;

pub use diff::{DerivedOnlyMiss, DiffResult, MasterOnlyMiss, diff_against_master, diff_catalogs};
pub use master::{MasterEntry, MasterList};
pub use shared::{
    DisjointCode, KeysetError, RegionKeyset, SharedCode, SharedSerialReport, SharedSerialScan,
    scan_shared_serials,
};
