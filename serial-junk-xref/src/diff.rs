//! Catalog-versus-master diff.

use serial_junk_catalog::GameCatalog;
use serial_junk_core::CanonicalCode;

use crate::master::MasterList;

/// An edition the master list has and the derived catalog lacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterOnlyMiss {
    pub code: CanonicalCode,
    pub master_id: String,
    pub name: String,
}

/// A dumped edition with no master-list record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedOnlyMiss {
    pub code: CanonicalCode,
    pub hash: String,
    pub name: String,
    pub is_synthetic: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Derived catalog entries with no master record, in catalog order.
    pub derived_only: Vec<DerivedOnlyMiss>,
    /// Master entries missing from the derived catalog, in master order.
    pub master_only: Vec<MasterOnlyMiss>,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.derived_only.is_empty() && self.master_only.is_empty()
    }
}

/// Compare a derived catalog against the master list in both directions.
///
/// Master entries are looked up by (game, region, revision) slot; catalog
/// entries by their composed code string.
pub fn diff_against_master(catalog: &GameCatalog, master: &MasterList) -> DiffResult {
    let master_only = master
        .entries()
        .iter()
        .filter(|m| catalog.get(&m.game_key(), m.region, m.revision).is_none())
        .map(|m| MasterOnlyMiss {
            code: m.code(),
            master_id: m.master_id.clone(),
            name: m.name.clone(),
        })
        .collect();

    let derived_only = catalog
        .entries()
        .filter(|e| !master.contains_code(&e.code.to_string()))
        .map(|e| DerivedOnlyMiss {
            code: e.code.clone(),
            hash: e.hash.clone(),
            name: e.name.clone(),
            is_synthetic: e.is_synthetic,
        })
        .collect();

    DiffResult {
        derived_only,
        master_only,
    }
}

/// Compare two derived catalogs, treating `reference` as the master list.
pub fn diff_catalogs(catalog: &GameCatalog, reference: &GameCatalog) -> DiffResult {
    diff_against_master(catalog, &MasterList::from(reference))
}
