//! Data-driven derivation rules.
//!
//! The code deriver never hard-codes release-name heuristics. Everything it
//! matches against (region markers, revision tags, exclusion markers) comes
//! from a [`DeriveRules`] value, which defaults to the built-in tables and
//! can be overridden from a TOML file:
//!
//! ```toml
//! on_unresolved_region = "skip"
//!
//! [[region_markers]]
//! marker = "(Germany)"
//! region = "D"
//!
//! [[revision_tags]]
//! tag = "A"
//! revision = 1
//! ```
//!
//! Arrays keep their file order; region markers are tried in that order and
//! the first match wins.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::region::Region;
use crate::system::SystemPrefix;

/// A substring of a release name that pins down the region letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionMarker {
    pub marker: String,
    pub region: Region,
}

/// The token inside a `(Rev X)` tag and the revision number it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionTag {
    pub tag: String,
    pub revision: u8,
}

/// What to do when a synthetic code needs a region and no marker matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedRegionPolicy {
    /// Stop the whole batch at the offending record. An unmatched name
    /// usually means the marker table is incomplete.
    #[default]
    Abort,
    /// Report the record and keep going without a code for it.
    Skip,
}

impl UnresolvedRegionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Skip => "skip",
        }
    }
}

impl std::fmt::Display for UnresolvedRegionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup tables and filters consulted by the code deriver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeriveRules {
    /// Label serial values that carry no information.
    pub unknown_serials: Vec<String>,
    /// Label serial suffixes that mark editions outside the catalog's scope.
    pub excluded_serial_suffixes: Vec<String>,
    /// Release-name substrings that mark re-releases outside the catalog's scope.
    pub excluded_name_markers: Vec<String>,
    /// Family assumed for legacy single-segment serials.
    pub legacy_prefix: SystemPrefix,
    pub on_unresolved_region: UnresolvedRegionPolicy,
    pub region_markers: Vec<RegionMarker>,
    pub revision_tags: Vec<RevisionTag>,
}

impl Default for DeriveRules {
    fn default() -> Self {
        let markers: &[(&str, char)] = &[
            ("(Germany)", 'D'),
            ("(France)", 'F'),
            ("(Europe)", 'X'),
            ("(Japan)", 'J'),
            ("(USA, Europe)", 'E'),
            ("(USA)", 'E'),
            ("(World)", 'X'),
            ("(Japan, Europe)", 'X'),
            ("(Spain)", 'S'),
            ("(Australia)", 'E'),
            ("(Japan, USA)", 'A'),
            ("(Netherlands)", 'H'),
            ("(USA, Australia)", 'E'),
            ("(Italy)", 'I'),
            ("(Sweden)", 'W'),
        ];
        let tags: &[(&str, u8)] = &[
            ("0", 0),
            ("1", 1),
            ("2", 2),
            ("3", 3),
            ("A", 1),
            ("B", 2),
            ("C", 3),
            ("D", 4),
        ];

        Self {
            unknown_serials: vec![String::new(), "none".to_string(), "unk".to_string()],
            excluded_serial_suffixes: vec![" CHN".to_string()],
            excluded_name_markers: vec!["(3DS Virtual Console)".to_string()],
            legacy_prefix: SystemPrefix::Dmg,
            on_unresolved_region: UnresolvedRegionPolicy::Abort,
            region_markers: markers
                .iter()
                .map(|&(marker, letter)| RegionMarker {
                    marker: marker.to_string(),
                    region: Region::known(letter),
                })
                .collect(),
            revision_tags: tags
                .iter()
                .map(|&(tag, revision)| RevisionTag {
                    tag: tag.to_string(),
                    revision,
                })
                .collect(),
        }
    }
}

impl DeriveRules {
    /// Parse rules from TOML text. Keys that are absent keep their defaults.
    pub fn from_toml_str(contents: &str, origin: &str) -> Result<Self, RulesError> {
        let rules: Self = toml::from_str(contents).map_err(|e| RulesError::Parse {
            path: origin.to_string(),
            source: e,
        })?;
        rules.validate()?;
        Ok(rules)
    }

    /// Load rules from a TOML file.
    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let contents = std::fs::read_to_string(path).map_err(|e| RulesError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&contents, &path.display().to_string())
    }

    pub fn to_toml_string(&self) -> Result<String, RulesError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject tables the deriver could not apply unambiguously.
    pub fn validate(&self) -> Result<(), RulesError> {
        if let Some(m) = self.region_markers.iter().find(|m| m.marker.is_empty()) {
            return Err(RulesError::invalid(format!(
                "region marker for '{}' is empty",
                m.region
            )));
        }
        let mut seen = HashSet::new();
        for tag in &self.revision_tags {
            if tag.tag.is_empty() || tag.tag.contains(')') {
                return Err(RulesError::invalid(format!(
                    "revision tag '{}' must be non-empty and contain no ')'",
                    tag.tag
                )));
            }
            if !seen.insert(tag.tag.as_str()) {
                return Err(RulesError::invalid(format!(
                    "revision tag '{}' is listed twice",
                    tag.tag
                )));
            }
        }
        if self.excluded_serial_suffixes.iter().any(String::is_empty) {
            return Err(RulesError::invalid("excluded serial suffixes must be non-empty"));
        }
        if self.excluded_name_markers.iter().any(String::is_empty) {
            return Err(RulesError::invalid("excluded name markers must be non-empty"));
        }
        Ok(())
    }

    /// First region marker (in table order) contained in `name`.
    pub fn region_for_name(&self, name: &str) -> Option<Region> {
        self.region_markers
            .iter()
            .find(|m| name.contains(m.marker.as_str()))
            .map(|m| m.region)
    }

    /// Revision number for the token inside a `(Rev X)` tag.
    pub fn revision_for_tag(&self, token: &str) -> Option<u8> {
        self.revision_tags
            .iter()
            .find(|t| t.tag == token)
            .map(|t| t.revision)
    }

    pub fn is_unknown_serial(&self, serial: &str) -> bool {
        self.unknown_serials.iter().any(|s| s == serial)
    }

    pub fn has_excluded_suffix(&self, serial: &str) -> bool {
        self.excluded_serial_suffixes
            .iter()
            .any(|suffix| serial.ends_with(suffix.as_str()))
    }

    pub fn has_excluded_name_marker(&self, name: &str) -> bool {
        self.excluded_name_markers
            .iter()
            .any(|marker| name.contains(marker.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_region_table_is_order_sensitive() {
        let rules = DeriveRules::default();
        assert_eq!(rules.region_markers.len(), 15);
        assert_eq!(rules.region_markers[0].marker, "(Germany)");
        // "(USA, Europe)" precedes "(USA)" and is not shadowed by "(Europe)".
        let region = rules.region_for_name("Tetris (USA, Europe)").unwrap();
        assert_eq!(region.letter(), 'E');
        let region = rules.region_for_name("Tetris (Japan, USA)").unwrap();
        assert_eq!(region.letter(), 'A');
        assert!(rules.region_for_name("Tetris (Korea)").is_none());
    }

    #[test]
    fn default_revision_tags() {
        let rules = DeriveRules::default();
        assert_eq!(rules.revision_for_tag("0"), Some(0));
        assert_eq!(rules.revision_for_tag("3"), Some(3));
        assert_eq!(rules.revision_for_tag("A"), Some(1));
        assert_eq!(rules.revision_for_tag("D"), Some(4));
        assert_eq!(rules.revision_for_tag("E"), None);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let rules = DeriveRules::from_toml_str(
            r#"
on_unresolved_region = "skip"

[[region_markers]]
marker = "(Korea)"
region = "K"
"#,
            "inline",
        )
        .unwrap();
        assert_eq!(rules.on_unresolved_region, UnresolvedRegionPolicy::Skip);
        assert_eq!(rules.region_markers.len(), 1);
        assert_eq!(rules.region_for_name("Game (Korea)").unwrap().letter(), 'K');
        assert_eq!(rules.revision_tags, DeriveRules::default().revision_tags);
        assert_eq!(rules.legacy_prefix, SystemPrefix::Dmg);
    }

    #[test]
    fn toml_round_trip_preserves_order() {
        let rules = DeriveRules::default();
        let text = rules.to_toml_string().unwrap();
        let parsed = DeriveRules::from_toml_str(&text, "round-trip").unwrap();
        assert_eq!(parsed, rules);
    }

    #[test]
    fn rejects_bad_region_letter() {
        let err = DeriveRules::from_toml_str(
            "[[region_markers]]\nmarker = \"(Korea)\"\nregion = \"k\"\n",
            "inline",
        );
        assert!(err.is_err());
    }

    #[test]
    fn rejects_duplicate_revision_tag() {
        let err = DeriveRules::from_toml_str(
            "[[revision_tags]]\ntag = \"A\"\nrevision = 1\n\n[[revision_tags]]\ntag = \"A\"\nrevision = 2\n",
            "inline",
        );
        assert!(matches!(err, Err(RulesError::Invalid(_))));
    }

    #[test]
    fn filters() {
        let rules = DeriveRules::default();
        assert!(rules.is_unknown_serial(""));
        assert!(rules.is_unknown_serial("unk"));
        assert!(!rules.is_unknown_serial("DMG-ZL-USA"));
        assert!(rules.has_excluded_suffix("CGB-BXTC-CHN CHN"));
        assert!(!rules.has_excluded_suffix("DMG-CHN"));
        assert!(rules.has_excluded_name_marker("Tetris (USA) (3DS Virtual Console)"));
    }
}
