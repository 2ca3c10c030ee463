use serde::{Deserialize, Serialize};

use crate::error::CodeError;

/// Hardware family prefix of an official product code.
///
/// Only the two handheld generations that share the `XXX-GGGR-V` code
/// scheme are modelled. Codes under any other prefix are rejected at parse
/// time rather than carried through as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SystemPrefix {
    /// Original monochrome hardware (`DMG`)
    #[serde(rename = "DMG")]
    Dmg,
    /// Color hardware (`CGB`)
    #[serde(rename = "CGB")]
    Cgb,
}

const ALL_SYSTEMS: &[SystemPrefix] = &[SystemPrefix::Dmg, SystemPrefix::Cgb];

impl SystemPrefix {
    /// The prefix exactly as it appears in product codes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dmg => "DMG",
            Self::Cgb => "CGB",
        }
    }

    /// Lowercase slug used in file names (`dmg`, `cgb`).
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Dmg => "dmg",
            Self::Cgb => "cgb",
        }
    }

    /// The other hardware family.
    pub fn other(&self) -> Self {
        match self {
            Self::Dmg => Self::Cgb,
            Self::Cgb => Self::Dmg,
        }
    }

    /// All prefixes in declaration order.
    pub fn all() -> &'static [SystemPrefix] {
        ALL_SYSTEMS
    }
}

impl std::fmt::Display for SystemPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SystemPrefix {
    type Err = CodeError;

    /// Case-sensitive: product codes always print the prefix in uppercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_SYSTEMS
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CodeError::UnknownSystem(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_prefixes() {
        assert_eq!("DMG".parse::<SystemPrefix>().unwrap(), SystemPrefix::Dmg);
        assert_eq!("CGB".parse::<SystemPrefix>().unwrap(), SystemPrefix::Cgb);
    }

    #[test]
    fn rejects_unknown_and_lowercase() {
        assert!("AGB".parse::<SystemPrefix>().is_err());
        assert!("dmg".parse::<SystemPrefix>().is_err());
    }

    #[test]
    fn other_flips_family() {
        assert_eq!(SystemPrefix::Dmg.other(), SystemPrefix::Cgb);
        assert_eq!(SystemPrefix::Cgb.other(), SystemPrefix::Dmg);
    }
}
