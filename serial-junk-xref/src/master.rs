//! The manufacturer's master list of official editions.

use std::collections::HashMap;

use serial_junk_catalog::GameCatalog;
use serial_junk_core::{CanonicalCode, Region, SystemPrefix};

/// One official edition from the master list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterEntry {
    pub system: SystemPrefix,
    /// Game id without the region letter.
    pub game_id: String,
    pub region: Region,
    pub revision: u8,
    pub name: String,
    /// The manufacturer's own identifier for the edition.
    pub master_id: String,
}

impl MasterEntry {
    pub fn code(&self) -> CanonicalCode {
        CanonicalCode::new(self.system, self.game_id.clone(), self.region, self.revision)
    }

    /// Catalog key of the game (`DMG-ZL`).
    pub fn game_key(&self) -> String {
        format!("{}-{}", self.system, self.game_id)
    }
}

/// Master entries in list order, indexed by code string.
#[derive(Debug, Clone, Default)]
pub struct MasterList {
    entries: Vec<MasterEntry>,
    by_code: HashMap<String, usize>,
}

impl MasterList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. A code listed twice keeps its first entry in the
    /// index; the duplicate is still listed so it can be diffed.
    pub fn push(&mut self, entry: MasterEntry) {
        let code = entry.code().to_string();
        if self.by_code.contains_key(&code) {
            log::warn!("Master list repeats {} ('{}')", code, entry.name);
        } else {
            self.by_code.insert(code, self.entries.len());
        }
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[MasterEntry] {
        &self.entries
    }

    pub fn get(&self, code: &str) -> Option<&MasterEntry> {
        self.by_code.get(code).map(|&i| &self.entries[i])
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<MasterEntry> for MasterList {
    fn from_iter<T: IntoIterator<Item = MasterEntry>>(iter: T) -> Self {
        let mut list = Self::new();
        for entry in iter {
            list.push(entry);
        }
        list
    }
}

impl Extend<MasterEntry> for MasterList {
    fn extend<T: IntoIterator<Item = MasterEntry>>(&mut self, iter: T) {
        for entry in iter {
            self.push(entry);
        }
    }
}

/// Treat a derived catalog as a master list; the dump hash stands in for
/// the manufacturer id.
impl From<&GameCatalog> for MasterList {
    fn from(catalog: &GameCatalog) -> Self {
        catalog
            .entries()
            .map(|e| MasterEntry {
                system: e.code.system,
                game_id: e.code.game_id.clone(),
                region: e.code.region,
                revision: e.code.revision,
                name: e.name.clone(),
                master_id: e.hash.clone(),
            })
            .collect()
    }
}
