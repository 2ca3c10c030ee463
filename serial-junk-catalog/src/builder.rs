//! Catalog construction with conflict detection.

use std::collections::HashMap;

use serial_junk_core::{CanonicalCode, SystemPrefix};

use crate::catalog::{CatalogEntry, CatalogSummary, GameCatalog};

/// A non-fatal inconsistency found while filing entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// Two different hashes resolved to the same catalog slot. The first
    /// one stays in the catalog.
    DuplicateCode {
        code: CanonicalCode,
        kept_hash: String,
        kept_name: String,
        rejected_hash: String,
        rejected_name: String,
    },
    /// A bare game id already claimed by the other hardware family. The
    /// later entry is left out of the catalog.
    CrossSystem {
        game_id: String,
        claimed_by: SystemPrefix,
        code: CanonicalCode,
        hash: String,
        name: String,
    },
}

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateCode {
                code,
                kept_name,
                rejected_name,
                ..
            } => write!(
                f,
                "duplicate code {}: '{}' already filed, '{}' rejected",
                code, kept_name, rejected_name
            ),
            Self::CrossSystem {
                game_id,
                claimed_by,
                code,
                name,
                ..
            } => write!(
                f,
                "game id {} already claimed by {}: {} ('{}') rejected",
                game_id, claimed_by, code, name
            ),
        }
    }
}

/// Output of a build pass.
#[derive(Debug, Clone, Default)]
pub struct CatalogBuild {
    pub catalog: GameCatalog,
    pub conflicts: Vec<Conflict>,
}

impl CatalogBuild {
    pub fn summary(&self) -> CatalogSummary {
        self.catalog.summary()
    }
}

/// Files entries into a fresh [`GameCatalog`], first entry per slot wins.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: GameCatalog,
    conflicts: Vec<Conflict>,
    /// Bare game id → family that filed it first.
    claims: HashMap<String, SystemPrefix>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: CatalogEntry) {
        let system = entry.code.system;
        let claimed_by = *self
            .claims
            .entry(entry.code.game_id.clone())
            .or_insert(system);

        if claimed_by != system {
            let conflict = Conflict::CrossSystem {
                game_id: entry.code.game_id.clone(),
                claimed_by,
                code: entry.code,
                hash: entry.hash,
                name: entry.name,
            };
            log::warn!("{}", conflict);
            self.conflicts.push(conflict);
            return;
        }

        if let Err(rejected) = self.catalog.try_insert(entry) {
            // try_insert only fails when the slot is occupied.
            let Some(kept) = self.catalog.get_code(&rejected.code) else {
                return;
            };
            if kept.hash == rejected.hash {
                return;
            }
            let conflict = Conflict::DuplicateCode {
                code: rejected.code,
                kept_hash: kept.hash.clone(),
                kept_name: kept.name.clone(),
                rejected_hash: rejected.hash,
                rejected_name: rejected.name,
            };
            log::warn!("{}", conflict);
            self.conflicts.push(conflict);
        }
    }

    pub fn finish(self) -> CatalogBuild {
        CatalogBuild {
            catalog: self.catalog,
            conflicts: self.conflicts,
        }
    }
}

/// Build a catalog from entries in the given order.
pub fn build_catalog<I>(entries: I) -> CatalogBuild
where
    I: IntoIterator<Item = CatalogEntry>,
{
    let mut builder = CatalogBuilder::new();
    for entry in entries {
        builder.insert(entry);
    }
    builder.finish()
}
