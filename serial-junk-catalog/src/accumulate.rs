//! Per-hash accumulation of derived codes.
//!
//! Several records can describe the same dump. The first record for a hash
//! registers it; later records may refine its code until a verbatim chip
//! code has been seen, after which the hash is settled and further records
//! for it are not even derived. A chip code with no catalog slot settles
//! the hash just the same.

use indexmap::IndexMap;
use serial_junk_core::{DeriveRules, DumpRecord, UnresolvedRegionPolicy};
use thiserror::Error;

use crate::catalog::CatalogEntry;
use crate::derive::{DeriveError, Derivation, DerivedCode, SkipReason, derive};

#[derive(Debug, Error)]
pub enum AccumulateError {
    /// Raised under [`UnresolvedRegionPolicy::Abort`]; the batch stops at
    /// this record.
    #[error("aborting batch: {0}")]
    UnresolvedRegion(#[from] DeriveError),
}

/// Which code survives when a hash already has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    KeepExisting,
    TakeCandidate,
}

/// Precedence rule between the code already recorded for a hash and a newly
/// derived one.
///
/// A verbatim chip code is never replaced. A synthetic code is replaced by
/// any later successful derivation for the same hash.
pub fn decide_precedence(existing: Option<&DerivedCode>, _candidate: &DerivedCode) -> Precedence {
    match existing {
        Some(current) if !current.is_synthetic => Precedence::KeepExisting,
        _ => Precedence::TakeCandidate,
    }
}

/// Counters for one accumulation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccumulateStats {
    pub records: usize,
    pub bad_dumps: usize,
    /// Records ignored because their hash already had a chip code.
    pub already_settled: usize,
    pub unknown_serial: usize,
    pub excluded: usize,
    pub unknown_system: usize,
    pub malformed: usize,
    /// Hashes settled by a chip code that has no catalog slot.
    pub uncatalogued: usize,
    /// Records reported and skipped under [`UnresolvedRegionPolicy::Skip`].
    pub unresolved_region: usize,
    /// Distinct good-dump hashes seen.
    pub hashes: usize,
    /// Hashes that ended up with a code, catalogued or not.
    pub coded: usize,
    /// Of `coded`, how many are synthetic.
    pub synthetic: usize,
}

/// A hash settled by a verbatim chip code that does not fit the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncataloguedCode {
    pub hash: String,
    pub name: String,
    pub chip_code: String,
}

/// Result of a full accumulation pass.
#[derive(Debug, Clone, Default)]
pub struct Accumulated {
    /// One entry per coded hash, in first-seen hash order.
    pub entries: Vec<CatalogEntry>,
    /// Hashes whose chip code has no catalog slot, in first-seen hash order.
    pub uncatalogued: Vec<UncataloguedCode>,
    /// `(hash, name)` of good dumps that never received a code.
    pub uncoded: Vec<(String, String)>,
    pub stats: AccumulateStats,
}

enum HashCode {
    Derived(DerivedCode),
    Uncatalogued(String),
}

impl HashCode {
    fn is_settled(&self) -> bool {
        match self {
            Self::Derived(d) => !d.is_synthetic,
            Self::Uncatalogued(_) => true,
        }
    }

    fn as_derived(&self) -> Option<&DerivedCode> {
        match self {
            Self::Derived(d) => Some(d),
            Self::Uncatalogued(_) => None,
        }
    }
}

impl std::fmt::Display for HashCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Derived(d) => write!(f, "{}", d.code),
            Self::Uncatalogued(chip) => f.write_str(chip),
        }
    }
}

struct HashState {
    name: String,
    code: Option<HashCode>,
}

/// Stateful per-hash collector. Feed records in input order with
/// [`push`](Self::push), then call [`finish`](Self::finish).
pub struct CodeAccumulator<'a> {
    rules: &'a DeriveRules,
    hashes: IndexMap<String, HashState>,
    stats: AccumulateStats,
}

impl<'a> CodeAccumulator<'a> {
    pub fn new(rules: &'a DeriveRules) -> Self {
        Self {
            rules,
            hashes: IndexMap::new(),
            stats: AccumulateStats::default(),
        }
    }

    /// Process one record.
    ///
    /// Only fails for an unresolved region under the abort policy; the
    /// caller is expected to stop feeding records at that point.
    pub fn push(&mut self, record: &DumpRecord) -> Result<(), AccumulateError> {
        self.stats.records += 1;

        if !record.is_good_dump {
            self.stats.bad_dumps += 1;
            return Ok(());
        }

        let state = self
            .hashes
            .entry(record.hash.clone())
            .or_insert_with(|| HashState {
                name: record.name.clone(),
                code: None,
            });

        if state.code.as_ref().is_some_and(HashCode::is_settled) {
            self.stats.already_settled += 1;
            return Ok(());
        }

        let candidate = match derive(record, self.rules) {
            Ok(Derivation::Coded(candidate)) => HashCode::Derived(candidate),
            Ok(Derivation::Uncatalogued(chip)) => HashCode::Uncatalogued(chip),
            Ok(Derivation::Skipped(reason)) => {
                log::debug!("No code for '{}': {}", record.name, reason.label());
                match reason {
                    SkipReason::BadDump => self.stats.bad_dumps += 1,
                    SkipReason::UnknownSerial => self.stats.unknown_serial += 1,
                    SkipReason::ExcludedSerialSuffix | SkipReason::ExcludedName => {
                        self.stats.excluded += 1
                    }
                    SkipReason::UnknownSystem(_) => self.stats.unknown_system += 1,
                    SkipReason::MalformedSerial(_) => self.stats.malformed += 1,
                }
                return Ok(());
            }
            Err(e) => match self.rules.on_unresolved_region {
                UnresolvedRegionPolicy::Abort => return Err(e.into()),
                UnresolvedRegionPolicy::Skip => {
                    log::warn!("{}; skipping record", e);
                    self.stats.unresolved_region += 1;
                    return Ok(());
                }
            },
        };

        // A verbatim chip code always beats the synthetic code it may replace.
        let take = match &candidate {
            HashCode::Derived(derived) => {
                let existing = state.code.as_ref().and_then(HashCode::as_derived);
                decide_precedence(existing, derived) == Precedence::TakeCandidate
            }
            HashCode::Uncatalogued(_) => true,
        };
        if take {
            if let Some(previous) = &state.code {
                log::debug!("{}: {} replaces {}", record.hash, candidate, previous);
            }
            state.code = Some(candidate);
        }

        Ok(())
    }

    pub fn stats(&self) -> &AccumulateStats {
        &self.stats
    }

    pub fn finish(self) -> Accumulated {
        let mut stats = self.stats;
        let mut entries = Vec::new();
        let mut uncatalogued = Vec::new();
        let mut uncoded = Vec::new();

        stats.hashes = self.hashes.len();
        for (hash, state) in self.hashes {
            match state.code {
                Some(HashCode::Derived(derived)) => {
                    stats.coded += 1;
                    if derived.is_synthetic {
                        stats.synthetic += 1;
                    }
                    entries.push(CatalogEntry {
                        code: derived.code,
                        hash,
                        name: state.name,
                        is_synthetic: derived.is_synthetic,
                    });
                }
                Some(HashCode::Uncatalogued(chip_code)) => {
                    stats.coded += 1;
                    stats.uncatalogued += 1;
                    uncatalogued.push(UncataloguedCode {
                        hash,
                        name: state.name,
                        chip_code,
                    });
                }
                None => uncoded.push((hash, state.name)),
            }
        }

        Accumulated {
            entries,
            uncatalogued,
            uncoded,
            stats,
        }
    }
}

/// Run a whole batch through a fresh accumulator.
pub fn accumulate<I>(records: I, rules: &DeriveRules) -> Result<Accumulated, AccumulateError>
where
    I: IntoIterator<Item = DumpRecord>,
{
    let mut acc = CodeAccumulator::new(rules);
    for record in records {
        acc.push(&record)?;
    }
    Ok(acc.finish())
}
