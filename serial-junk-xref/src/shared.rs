//! Shared and disjoint chip-code detection.
//!
//! Works on raw dump records, independent of the catalog:
//!
//! - **Shared codes**: one hash seen with two different chip codes. The
//!   same image cannot legitimately carry two official codes, so this is an
//!   upstream data error.
//! - **Disjoint codes**: one bare game seen under several regions of
//!   interest with different hashes. Editions that should share a dump
//!   differ, which usually points at a data-entry mistake rather than a
//!   real regional variant.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serial_junk_core::{DeriveRules, DumpRecord, Region};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeysetError {
    #[error("keyset must be two to three region letters, got {0}")]
    Length(usize),
    #[error("keyset contains an invalid region letter: '{0}'")]
    InvalidLetter(char),
}

/// The two or three regions the disjoint detector compares, in priority
/// order (`EPU` = USA, Europe, Australia).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionKeyset(Vec<Region>);

impl RegionKeyset {
    pub fn contains(&self, region: Region) -> bool {
        self.0.contains(&region)
    }

    pub fn first(&self) -> Region {
        self.0[0]
    }

    pub fn second(&self) -> Region {
        self.0[1]
    }

    /// Fallback key: the last letter (equal to the second for two-letter
    /// keysets).
    pub fn fallback(&self) -> Region {
        self.0[self.0.len() - 1]
    }

    pub fn regions(&self) -> &[Region] {
        &self.0
    }
}

impl Default for RegionKeyset {
    fn default() -> Self {
        // "EPU" is always valid.
        Self(
            ['E', 'P', 'U']
                .into_iter()
                .filter_map(|c| Region::new(c).ok())
                .collect(),
        )
    }
}

impl std::str::FromStr for RegionKeyset {
    type Err = KeysetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letters: Vec<char> = s.chars().collect();
        if !(2..=3).contains(&letters.len()) {
            return Err(KeysetError::Length(letters.len()));
        }
        letters
            .into_iter()
            .map(|c| Region::new(c).map_err(|_| KeysetError::InvalidLetter(c)))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl std::fmt::Display for RegionKeyset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for region in &self.0 {
            write!(f, "{}", region)?;
        }
        Ok(())
    }
}

/// One hash reported under two different chip codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedCode {
    pub hash: String,
    pub code1: String,
    pub code2: String,
    pub name1: String,
    pub name2: String,
}

/// One bare game whose compared regions resolve to different hashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisjointCode {
    pub game_id: String,
    pub region1: Region,
    pub region2: Region,
    pub hash1: String,
    pub hash2: String,
    pub code1: String,
    pub code2: String,
    pub name1: String,
    pub name2: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedSerialReport {
    /// In input order.
    pub shared: Vec<SharedCode>,
    /// In first-seen game order.
    pub disjoint: Vec<DisjointCode>,
}

struct HashSighting {
    /// Name of the first good record for the hash.
    name: String,
    /// First chip code recorded for the hash.
    code: Option<String>,
}

#[derive(Debug, Clone)]
struct RegionSighting {
    hash: String,
    code: String,
    name: String,
}

/// Single-pass accumulator over one or more ingestion batches.
pub struct SharedSerialScan<'a> {
    rules: &'a DeriveRules,
    keyset: RegionKeyset,
    hashes: HashMap<String, HashSighting>,
    games: IndexMap<String, IndexMap<Region, RegionSighting>>,
    shared: Vec<SharedCode>,
}

impl<'a> SharedSerialScan<'a> {
    pub fn new(rules: &'a DeriveRules, keyset: RegionKeyset) -> Self {
        Self {
            rules,
            keyset,
            hashes: HashMap::new(),
            games: IndexMap::new(),
            shared: Vec::new(),
        }
    }

    pub fn observe(&mut self, record: &DumpRecord) {
        if !record.is_good_dump {
            return;
        }

        let sighting = self
            .hashes
            .entry(record.hash.clone())
            .or_insert_with(|| HashSighting {
                name: record.name.clone(),
                code: None,
            });

        if self.rules.is_unknown_serial(&record.label_serial)
            || self.rules.has_excluded_suffix(&record.label_serial)
            || self.rules.has_excluded_name_marker(&record.name)
            || record.chip_code.is_empty()
        {
            return;
        }

        let chip = record.chip_code.as_str();
        let mut parts = chip.split('-');
        let first = parts.next().unwrap_or_default();
        // Legacy single-segment chip codes carry the game segment directly.
        let segment = parts.next().unwrap_or(first);

        let mut chars = segment.chars();
        if let Some(last) = chars.next_back()
            && let Ok(region) = Region::new(last)
            && self.keyset.contains(region)
        {
            self.games
                .entry(chars.as_str().to_string())
                .or_default()
                .insert(
                    region,
                    RegionSighting {
                        hash: record.hash.clone(),
                        code: chip.to_string(),
                        name: record.name.clone(),
                    },
                );
        }

        match &sighting.code {
            Some(existing) if existing != chip => {
                let shared = SharedCode {
                    hash: record.hash.clone(),
                    code1: existing.clone(),
                    code2: chip.to_string(),
                    name1: sighting.name.clone(),
                    name2: record.name.clone(),
                };
                log::warn!(
                    "{} is listed as both {} and {}",
                    shared.hash,
                    shared.code1,
                    shared.code2
                );
                self.shared.push(shared);
            }
            Some(_) => {}
            None => sighting.code = Some(chip.to_string()),
        }
    }

    pub fn finish(self) -> SharedSerialReport {
        let mut disjoint = Vec::new();

        for (game_id, regions) in &self.games {
            if regions.len() < 2 {
                continue;
            }
            let hashes: HashSet<&str> = regions.values().map(|s| s.hash.as_str()).collect();
            if hashes.len() < 2 {
                continue;
            }

            let pick = |preferred: Region| {
                if regions.contains_key(&preferred) {
                    preferred
                } else {
                    self.keyset.fallback()
                }
            };
            let region1 = pick(self.keyset.first());
            let region2 = pick(self.keyset.second());
            let (Some(a), Some(b)) = (regions.get(&region1), regions.get(&region2)) else {
                continue;
            };

            disjoint.push(DisjointCode {
                game_id: game_id.clone(),
                region1,
                region2,
                hash1: a.hash.clone(),
                hash2: b.hash.clone(),
                code1: a.code.clone(),
                code2: b.code.clone(),
                name1: a.name.clone(),
                name2: b.name.clone(),
            });
        }

        SharedSerialReport {
            shared: self.shared,
            disjoint,
        }
    }
}

/// Scan a whole record stream in one go.
pub fn scan_shared_serials<I>(records: I, rules: &DeriveRules, keyset: RegionKeyset) -> SharedSerialReport
where
    I: IntoIterator<Item = DumpRecord>,
{
    let mut scan = SharedSerialScan::new(rules, keyset);
    for record in records {
        scan.observe(&record);
    }
    scan.finish()
}
