//! The game → region → revision catalog.

use std::collections::BTreeMap;

use serial_junk_core::{CanonicalCode, Region, SystemPrefix};

/// One catalogued edition: the code one hash resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub code: CanonicalCode,
    pub hash: String,
    pub name: String,
    pub is_synthetic: bool,
}

type RevisionMap = BTreeMap<u8, CatalogEntry>;
type RegionMap = BTreeMap<Region, RevisionMap>;

/// Nested catalog keyed by game (`DMG-ZL`), region letter, and revision.
///
/// At most one entry exists per (game, region, revision). Entries can only
/// be added through [`CatalogBuilder`](crate::CatalogBuilder) or by loading
/// a persisted catalog, so the slot is never silently overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameCatalog {
    games: BTreeMap<String, RegionMap>,
}

impl GameCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, game_key: &str, region: Region, revision: u8) -> Option<&CatalogEntry> {
        self.games.get(game_key)?.get(&region)?.get(&revision)
    }

    /// Entry occupying the slot `code` would be filed under.
    pub fn get_code(&self, code: &CanonicalCode) -> Option<&CatalogEntry> {
        self.get(&code.game_key(), code.region, code.revision)
    }

    pub fn contains_code(&self, code: &CanonicalCode) -> bool {
        self.get_code(code).is_some()
    }

    /// All entries in catalog order: game key, then region, then revision.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.games
            .values()
            .flat_map(|regions| regions.values())
            .flat_map(|revisions| revisions.values())
    }

    /// Game keys in catalog order.
    pub fn game_keys(&self) -> impl Iterator<Item = &str> {
        self.games.keys().map(String::as_str)
    }

    /// Number of entries (revisions) across all games.
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    /// Filed under its code's slot. Returns the entry back when the slot is
    /// already taken.
    pub(crate) fn try_insert(&mut self, entry: CatalogEntry) -> Result<(), CatalogEntry> {
        let revisions = self
            .games
            .entry(entry.code.game_key())
            .or_default()
            .entry(entry.code.region)
            .or_default();
        if revisions.contains_key(&entry.code.revision) {
            return Err(entry);
        }
        revisions.insert(entry.code.revision, entry);
        Ok(())
    }

    /// Sub-catalog holding only one hardware family's games.
    pub fn for_system(&self, system: SystemPrefix) -> GameCatalog {
        let prefix = format!("{}-", system);
        GameCatalog {
            games: self
                .games
                .iter()
                .filter(|(key, _)| key.starts_with(&prefix))
                .map(|(key, regions)| (key.clone(), regions.clone()))
                .collect(),
        }
    }

    /// Distinct game and revision counts per hardware family.
    pub fn summary(&self) -> CatalogSummary {
        let mut summary = CatalogSummary::default();
        for regions in self.games.values() {
            let Some(first) = regions.values().flat_map(|r| r.values()).next() else {
                continue;
            };
            let counts = summary.per_system.entry(first.code.system).or_default();
            counts.games += 1;
            counts.revisions += regions.values().map(BTreeMap::len).sum::<usize>();
        }
        summary
    }
}

/// Games and revisions counted for one hardware family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemCounts {
    pub games: usize,
    pub revisions: usize,
}

/// Per-family counts of a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    pub per_system: BTreeMap<SystemPrefix, SystemCounts>,
}

impl CatalogSummary {
    pub fn system(&self, system: SystemPrefix) -> SystemCounts {
        self.per_system.get(&system).copied().unwrap_or_default()
    }

    pub fn total(&self) -> SystemCounts {
        self.per_system
            .values()
            .fold(SystemCounts::default(), |acc, c| SystemCounts {
                games: acc.games + c.games,
                revisions: acc.revisions + c.revisions,
            })
    }
}
