//! Canonical product code: `{prefix}-{game}{region}-{revision}`.
//!
//! ```text
//! DMG-ZLE-1
//! │   │ │ └── revision (0 for the original release)
//! │   │ └──── region letter
//! │   └────── game id
//! └────────── hardware family
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CodeError;
use crate::region::Region;
use crate::system::SystemPrefix;

/// One edition of one game: hardware family, game id, region, revision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalCode {
    pub system: SystemPrefix,
    /// Game id without the region letter (`ZL` in `DMG-ZLE-1`).
    pub game_id: String,
    pub region: Region,
    pub revision: u8,
}

impl CanonicalCode {
    pub fn new(system: SystemPrefix, game_id: impl Into<String>, region: Region, revision: u8) -> Self {
        Self {
            system,
            game_id: game_id.into(),
            region,
            revision,
        }
    }

    /// Build a code from a combined `{game}{region}` segment, splitting the
    /// trailing letter off as the region.
    pub fn from_segment(system: SystemPrefix, segment: &str, revision: u8) -> Result<Self, CodeError> {
        let mut chars = segment.chars();
        let last = chars
            .next_back()
            .ok_or_else(|| CodeError::malformed(segment, "empty game segment"))?;
        let game_id = chars.as_str();
        if game_id.is_empty() {
            return Err(CodeError::malformed(segment, "game segment has no id before the region"));
        }
        let region = Region::new(last)?;
        Ok(Self::new(system, game_id, region, revision))
    }

    /// Catalog key for the game: prefix plus bare game id (`DMG-ZL`).
    pub fn game_key(&self) -> String {
        format!("{}-{}", self.system, self.game_id)
    }

    /// The `{game}{region}` middle segment (`ZLE`).
    pub fn segment(&self) -> String {
        format!("{}{}", self.game_id, self.region)
    }
}

impl std::fmt::Display for CanonicalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}{}-{}",
            self.system, self.game_id, self.region, self.revision
        )
    }
}

impl std::str::FromStr for CanonicalCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        let [prefix, segment, revision] = parts.as_slice() else {
            return Err(CodeError::malformed(s, "expected three hyphen-separated parts"));
        };
        let system: SystemPrefix = prefix.parse()?;
        let revision: u8 = revision
            .parse()
            .map_err(|_| CodeError::malformed(s, "revision is not a number"))?;
        Self::from_segment(system, segment, revision).map_err(|e| match e {
            CodeError::Malformed { reason, .. } => CodeError::malformed(s, reason),
            other => other,
        })
    }
}

impl TryFrom<String> for CanonicalCode {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CanonicalCode> for String {
    fn from(code: CanonicalCode) -> Self {
        code.to_string()
    }
}
