use serde::{Deserialize, Serialize};

use crate::error::CodeError;

/// Single-letter region suffix of a product code (`E` in `DMG-ZLE-0`).
///
/// The closed set is the ASCII uppercase alphabet; the manufacturer assigns
/// the letters (J = Japan, E = USA, P = Europe, D = Germany, ...). The
/// mapping from release names to letters lives in
/// [`DeriveRules`](crate::DeriveRules), not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Region(char);

impl Region {
    pub fn new(letter: char) -> Result<Self, CodeError> {
        if letter.is_ascii_uppercase() {
            Ok(Self(letter))
        } else {
            Err(CodeError::InvalidRegion(letter.to_string()))
        }
    }

    /// For built-in tables whose letters are known to be valid.
    pub(crate) const fn known(letter: char) -> Self {
        Self(letter)
    }

    pub fn letter(&self) -> char {
        self.0
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Region {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c),
            _ => Err(CodeError::InvalidRegion(s.to_string())),
        }
    }
}

impl TryFrom<String> for Region {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.0.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_uppercase_letters() {
        assert_eq!(Region::new('E').unwrap().letter(), 'E');
        assert_eq!("P".parse::<Region>().unwrap().to_string(), "P");
    }

    #[test]
    fn rejects_everything_else() {
        assert!(Region::new('e').is_err());
        assert!(Region::new('1').is_err());
        assert!("".parse::<Region>().is_err());
        assert!("EP".parse::<Region>().is_err());
    }
}
