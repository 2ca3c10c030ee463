//! Derive a canonical code from a single dump record.
//!
//! Policy, in order:
//!
//! 1. Bad dumps are skipped.
//! 2. A non-empty chip code is taken verbatim (non-synthetic). A bare
//!    single-segment chip code gets the legacy prefix and the name's
//!    revision. One that still does not fit the canonical shape is kept
//!    as-is, outside the catalog.
//! 3. Blank/unknown label serials, excluded serial suffixes and excluded
//!    release-name markers are skipped.
//! 4. Otherwise a synthetic code is assembled from the label serial, with
//!    the revision read from a `(Rev X)` tag in the name and, when the
//!    serial does not embed one, the region read from the name's markers.
//!
//! Whether an earlier record for the same hash already settled the code is
//! not this module's concern; see [`crate::accumulate`].

use serial_junk_core::{CanonicalCode, DeriveRules, DumpRecord, SystemPrefix};
use thiserror::Error;

/// Opening of a revision tag in a release name: `(Rev A)`.
const REVISION_TAG_OPEN: &str = "(Rev ";

/// A code derived from one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedCode {
    pub code: CanonicalCode,
    /// True when region/revision were inferred from the release name
    /// rather than read verbatim from the chip.
    pub is_synthetic: bool,
}

/// Why a record produced no code. None of these stop processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    BadDump,
    /// Label serial is blank, `none` or `unk`.
    UnknownSerial,
    /// Label serial ends with an excluded suffix (e.g. ` CHN`).
    ExcludedSerialSuffix,
    /// Release name carries an excluded marker (e.g. a Virtual Console tag).
    ExcludedName,
    /// Serial prefix is not a known hardware family.
    UnknownSystem(String),
    /// The label serial cannot be turned into a game segment.
    MalformedSerial(String),
}

impl SkipReason {
    pub fn label(&self) -> &'static str {
        match self {
            Self::BadDump => "bad dump",
            Self::UnknownSerial => "unknown serial",
            Self::ExcludedSerialSuffix => "excluded serial suffix",
            Self::ExcludedName => "excluded release",
            Self::UnknownSystem(_) => "unknown system prefix",
            Self::MalformedSerial(_) => "malformed serial",
        }
    }
}

/// Outcome of deriving one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derivation {
    Coded(DerivedCode),
    /// A verbatim chip code that has no catalog slot. It still settles the
    /// hash.
    Uncatalogued(String),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeriveError {
    /// A synthetic code needs a region and no marker matched the name.
    #[error("cannot determine region for '{name}' (hash {hash})")]
    UnresolvedRegion { hash: String, name: String },
}

/// Derive the canonical code for one record.
pub fn derive(record: &DumpRecord, rules: &DeriveRules) -> Result<Derivation, DeriveError> {
    if !record.is_good_dump {
        return Ok(Derivation::Skipped(SkipReason::BadDump));
    }

    if !record.chip_code.is_empty() {
        return Ok(chip_derivation(record, rules));
    }

    let serial = record.label_serial.as_str();
    if rules.is_unknown_serial(serial) {
        return Ok(Derivation::Skipped(SkipReason::UnknownSerial));
    }
    if rules.has_excluded_suffix(serial) {
        return Ok(Derivation::Skipped(SkipReason::ExcludedSerialSuffix));
    }
    if rules.has_excluded_name_marker(&record.name) {
        return Ok(Derivation::Skipped(SkipReason::ExcludedName));
    }

    let revision = revision_from_name(&record.name, rules);

    let prefix = strip_serial_suffixes(serial);
    let (system, segment) = match prefix.split_once('-') {
        // Legacy short-form serial: bare game segment, region already inside.
        None => (rules.legacy_prefix, prefix.to_string()),
        Some((system, game)) => {
            let system: SystemPrefix = match system.parse() {
                Ok(s) => s,
                Err(_) => {
                    return Ok(Derivation::Skipped(SkipReason::UnknownSystem(
                        system.to_string(),
                    )));
                }
            };
            if game.chars().count() >= 3 {
                (system, game.to_string())
            } else {
                let region = rules.region_for_name(&record.name).ok_or_else(|| {
                    DeriveError::UnresolvedRegion {
                        hash: record.hash.clone(),
                        name: record.name.clone(),
                    }
                })?;
                (system, format!("{game}{region}"))
            }
        }
    };

    match CanonicalCode::from_segment(system, &segment, revision) {
        Ok(code) => Ok(Derivation::Coded(DerivedCode {
            code,
            is_synthetic: true,
        })),
        Err(e) => {
            log::debug!("Cannot build code from serial '{}': {}", serial, e);
            Ok(Derivation::Skipped(SkipReason::MalformedSerial(serial.to_string())))
        }
    }
}

/// Chip codes come as `DMG-ZLE-1`, as `DMG-ZLE` without a revision, or as
/// a bare legacy `ZLE`. The latter two take their revision from the name.
fn chip_derivation(record: &DumpRecord, rules: &DeriveRules) -> Derivation {
    let chip = record.chip_code.as_str();
    let parsed = match chip.split_once('-') {
        None => CanonicalCode::from_segment(
            rules.legacy_prefix,
            chip,
            revision_from_name(&record.name, rules),
        ),
        Some((system, segment)) if !segment.contains('-') => system
            .parse::<SystemPrefix>()
            .and_then(|system| {
                CanonicalCode::from_segment(system, segment, revision_from_name(&record.name, rules))
            }),
        Some(_) => chip.parse::<CanonicalCode>(),
    };

    match parsed {
        Ok(code) => Derivation::Coded(DerivedCode {
            code,
            is_synthetic: false,
        }),
        Err(e) => {
            log::warn!("Chip code of '{}' has no catalog slot: {}", record.name, e);
            Derivation::Uncatalogued(chip.to_string())
        }
    }
}

/// Keep a serial up to (not including) its second hyphen.
///
/// `DMG-ZLE-USA-1` carries extra suffixes after the official code; only
/// `DMG-ZLE` is meaningful.
fn strip_serial_suffixes(serial: &str) -> &str {
    match serial.match_indices('-').nth(1) {
        Some((pos, _)) => &serial[..pos],
        None => serial,
    }
}

/// Revision number from the last recognised `(Rev X)` tag in a release
/// name; 0 when there is none.
fn revision_from_name(name: &str, rules: &DeriveRules) -> u8 {
    let mut revision = 0;
    let mut rest = name;
    while let Some(pos) = rest.find(REVISION_TAG_OPEN) {
        rest = &rest[pos + REVISION_TAG_OPEN.len()..];
        if let Some(end) = rest.find(')')
            && let Some(rev) = rules.revision_for_tag(&rest[..end])
        {
            revision = rev;
        }
    }
    revision
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good(name: &str, serial: &str, chip: &str) -> DumpRecord {
        DumpRecord::new("d41d8cd9", name, serial, chip, true)
    }

    fn coded(record: &DumpRecord) -> DerivedCode {
        match derive(record, &DeriveRules::default()).unwrap() {
            Derivation::Coded(c) => c,
            other => panic!("expected a code, got {:?}", other),
        }
    }

    fn skipped(record: &DumpRecord) -> SkipReason {
        match derive(record, &DeriveRules::default()).unwrap() {
            Derivation::Skipped(reason) => reason,
            other => panic!("expected a skip, got {:?}", other),
        }
    }

    #[test]
    fn chip_code_is_verbatim() {
        let d = coded(&good("Tetris (Japan) (Rev A)", "unk", "DMG-TRE-3"));
        assert_eq!(d.code.to_string(), "DMG-TRE-3");
        assert!(!d.is_synthetic);
    }

    #[test]
    fn chip_code_wins_even_with_excluded_markers() {
        let d = coded(&good("Tetris (USA) (3DS Virtual Console)", "DMG-TR CHN", "DMG-TRE-0"));
        assert_eq!(d.code.to_string(), "DMG-TRE-0");
    }

    #[test]
    fn bad_dump_is_skipped_first() {
        let record = DumpRecord::new("h", "Tetris (USA)", "DMG-TR", "DMG-TRE-0", false);
        assert_eq!(skipped(&record), SkipReason::BadDump);
    }

    #[test]
    fn unknown_serials_are_skipped() {
        for serial in ["", "none", "unk"] {
            assert_eq!(skipped(&good("Tetris (USA)", serial, "")), SkipReason::UnknownSerial);
        }
    }

    #[test]
    fn chinese_suffix_is_excluded() {
        assert_eq!(
            skipped(&good("Pokemon (China)", "CGB-BXTC-CHN CHN", "")),
            SkipReason::ExcludedSerialSuffix
        );
    }

    #[test]
    fn virtual_console_is_excluded() {
        assert_eq!(
            skipped(&good("Tetris (World) (3DS Virtual Console)", "DMG-TR", "")),
            SkipReason::ExcludedName
        );
    }

    #[test]
    fn short_game_segment_takes_region_from_name() {
        let d = coded(&good("Zelda (USA, Europe) (Rev 2)", "DMG-ZL-USA", ""));
        assert_eq!(d.code.to_string(), "DMG-ZLE-2");
        assert!(d.is_synthetic);
    }

    #[test]
    fn embedded_region_needs_no_marker() {
        let d = coded(&good("Zelda (Korea)", "DMG-ZLE-USA-1", ""));
        assert_eq!(d.code.to_string(), "DMG-ZLE-0");
        assert!(d.is_synthetic);
    }

    #[test]
    fn legacy_serial_is_forced_to_legacy_prefix() {
        let d = coded(&good("Alleyway (Japan, USA) (Rev B)", "AWA", ""));
        assert_eq!(d.code.to_string(), "DMG-AWA-2");
        assert_eq!(d.code.system, SystemPrefix::Dmg);
    }

    #[test]
    fn unresolved_region_is_an_error() {
        let err = derive(&good("Zelda (Korea)", "DMG-ZL", ""), &DeriveRules::default()).unwrap_err();
        assert_eq!(
            err,
            DeriveError::UnresolvedRegion {
                hash: "d41d8cd9".to_string(),
                name: "Zelda (Korea)".to_string(),
            }
        );
    }

    #[test]
    fn unknown_prefix_is_skipped() {
        assert_eq!(
            skipped(&good("Golden Sun (USA)", "AGB-AGS-USA", "")),
            SkipReason::UnknownSystem("AGB".to_string())
        );
    }

    #[test]
    fn legacy_chip_code_gets_legacy_prefix() {
        let d = coded(&good("Alleyway (World)", "DMG-AW", "AWA"));
        assert_eq!(d.code.to_string(), "DMG-AWA-0");
        assert!(!d.is_synthetic);

        let d = coded(&good("Alleyway (World) (Rev 1)", "DMG-AW", "AWA"));
        assert_eq!(d.code.to_string(), "DMG-AWA-1");
        assert!(!d.is_synthetic);
    }

    #[test]
    fn chip_code_without_revision_reads_it_from_name() {
        let d = coded(&good("Pokemon Gold (Japan) (Rev A)", "", "CGB-AAUJ"));
        assert_eq!(d.code.to_string(), "CGB-AAUJ-1");
        assert!(!d.is_synthetic);
    }

    #[test]
    fn odd_chip_code_is_kept_outside_the_catalog() {
        for chip in ["LH5361", "AGB-AGSE-0", "DMG-ZLE-USA-1", "DMG-ZLE-x"] {
            assert_eq!(
                derive(&good("Tetris (USA)", "DMG-TR", chip), &DeriveRules::default()).unwrap(),
                Derivation::Uncatalogued(chip.to_string()),
                "{chip}"
            );
        }
    }

    #[test]
    fn revision_tags() {
        let rules = DeriveRules::default();
        assert_eq!(revision_from_name("Game (USA)", &rules), 0);
        for (tag, rev) in [("0", 0), ("1", 1), ("2", 2), ("3", 3)] {
            assert_eq!(revision_from_name(&format!("Game (Rev {tag})"), &rules), rev);
        }
        for (tag, rev) in [("A", 1), ("B", 2), ("C", 3), ("D", 4)] {
            assert_eq!(revision_from_name(&format!("Game (USA) (Rev {tag})"), &rules), rev);
        }
        assert_eq!(revision_from_name("Game (Rev 1.1)", &rules), 0);
        assert_eq!(revision_from_name("Game (Rev A) (Rev 2)", &rules), 2);
        assert_eq!(revision_from_name("Game (Rev A) (Rev 9)", &rules), 1);
    }

    #[test]
    fn serial_suffix_stripping() {
        assert_eq!(strip_serial_suffixes("DMG-ZLE-USA-1"), "DMG-ZLE");
        assert_eq!(strip_serial_suffixes("DMG-ZLE"), "DMG-ZLE");
        assert_eq!(strip_serial_suffixes("ZLE"), "ZLE");
    }

    #[test]
    fn derivation_is_repeatable() {
        let record = good("Zelda (France) (Rev C)", "DMG-ZL-FRA", "");
        let first = derive(&record, &DeriveRules::default()).unwrap();
        let second = derive(&record, &DeriveRules::default()).unwrap();
        assert_eq!(first, second);
    }
}
