use std::path::{Path, PathBuf};

/// Errors raised while reading inputs or writing reports.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}:{line}: expected at least {expected} columns, found {found}", path.display())]
    ShortRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },
}

impl ImportError {
    pub fn read(path: &Path, source: csv::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn short_row(path: &Path, line: u64, expected: usize, found: usize) -> Self {
        Self::ShortRow {
            path: path.to_path_buf(),
            line,
            expected,
            found,
        }
    }
}
