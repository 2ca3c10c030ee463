use thiserror::Error;

use serial_junk_catalog::{AccumulateError, YamlError};
use serial_junk_core::RulesError;
use serial_junk_import::ImportError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Rules file could not be read or is invalid
    #[error("Rules error: {0}")]
    Rules(#[from] RulesError),

    /// Input or report file error
    #[error("{0}")]
    Import(#[from] ImportError),

    /// Catalog file error
    #[error("Catalog error: {0}")]
    Catalog(#[from] YamlError),

    /// The batch stopped on an unresolved region
    #[error("{0}")]
    Aborted(#[from] AccumulateError),

    /// Logger setup failed
    #[error("Logging error: {0}")]
    Logging(String),
}

impl CliError {
    pub(crate) fn logging(msg: impl Into<String>) -> Self {
        Self::Logging(msg.into())
    }
}
