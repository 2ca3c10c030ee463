use thiserror::Error;

/// Errors produced when parsing identity codes and their parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    /// The prefix is not one of the known hardware families
    #[error("unknown system prefix: '{0}'")]
    UnknownSystem(String),

    /// Region letters must be a single ASCII uppercase letter
    #[error("invalid region letter: '{0}'")]
    InvalidRegion(String),

    /// The code does not have the `{prefix}-{game}{region}-{revision}` shape
    #[error("malformed code '{code}': {reason}")]
    Malformed { code: String, reason: &'static str },
}

impl CodeError {
    pub fn malformed(code: impl Into<String>, reason: &'static str) -> Self {
        Self::Malformed {
            code: code.into(),
            reason,
        }
    }
}

/// Errors produced when loading derivation rules from TOML.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A table entry is structurally invalid (empty marker, duplicate tag, ...)
    #[error("invalid rules: {0}")]
    Invalid(String),
}

impl RulesError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}
