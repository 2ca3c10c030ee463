//! Per-dump record rows.
//!
//! Input files are semicolon-delimited, one row per dumped cartridge, with a
//! header row. Only five columns matter:
//!
//! | Column | Field |
//! |---|---|
//! | 0 | hash |
//! | 1 | release name |
//! | 4 | good-dump flag (`True`) |
//! | 7 | label serial |
//! | 9 | chip code |
//!
//! Rows may carry trailing empty fields.

use std::fs::File;
use std::path::{Path, PathBuf};

use serial_junk_core::DumpRecord;

use crate::error::ImportError;

const HASH: usize = 0;
const NAME: usize = 1;
const GOOD_DUMP: usize = 4;
const LABEL_SERIAL: usize = 7;
const CHIP_CODE: usize = 9;
const MIN_COLUMNS: usize = CHIP_CODE + 1;

/// A fixed list of record files, read in order.
///
/// [`records`](Self::records) can be called any number of times; each call
/// starts over from the first file and opens files only when it reaches them.
#[derive(Debug, Clone, Default)]
pub struct RecordSource {
    paths: Vec<PathBuf>,
}

impl RecordSource {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn records(&self) -> Records<'_> {
        Records {
            paths: self.paths.iter(),
            current: None,
        }
    }
}

/// Lazy iterator over every row of every file, header rows excluded.
pub struct Records<'a> {
    paths: std::slice::Iter<'a, PathBuf>,
    current: Option<(&'a Path, csv::StringRecordsIntoIter<File>)>,
}

impl Iterator for Records<'_> {
    type Item = Result<DumpRecord, ImportError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((path, rows)) = &mut self.current {
                match rows.next() {
                    Some(Ok(row)) => return Some(parse_row(*path, &row)),
                    Some(Err(e)) => return Some(Err(ImportError::read(*path, e))),
                    None => self.current = None,
                }
                continue;
            }

            let path = self.paths.next()?;
            log::debug!("Reading records from {}", path.display());
            match open_reader(path) {
                Ok(reader) => self.current = Some((path.as_path(), reader.into_records())),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

pub(crate) fn open_reader(path: &Path) -> Result<csv::Reader<File>, ImportError> {
    csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ImportError::read(path, e))
}

pub(crate) fn row_line(row: &csv::StringRecord) -> u64 {
    row.position().map(|p| p.line()).unwrap_or(0)
}

fn parse_row(path: &Path, row: &csv::StringRecord) -> Result<DumpRecord, ImportError> {
    if row.len() < MIN_COLUMNS {
        return Err(ImportError::short_row(
            path,
            row_line(row),
            MIN_COLUMNS,
            row.len(),
        ));
    }
    let get = |i: usize| row.get(i).unwrap_or("");

    Ok(DumpRecord::new(
        get(HASH),
        get(NAME),
        get(LABEL_SERIAL),
        get(CHIP_CODE),
        get(GOOD_DUMP).eq_ignore_ascii_case("true"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(fields.to_vec())
    }

    #[test]
    fn picks_fixed_columns() {
        let r = row(&[
            "abc", "Game (USA)", "x", "x", "True", "x", "x", "DMG-ZLE-USA", "x", "DMG-ZLE-0",
        ]);
        let record = parse_row(Path::new("in.csv"), &r).unwrap();
        assert_eq!(
            record,
            DumpRecord::new("abc", "Game (USA)", "DMG-ZLE-USA", "DMG-ZLE-0", true)
        );
    }

    #[test]
    fn good_dump_flag_ignores_case() {
        for (flag, good) in [("True", true), ("TRUE", true), ("true", true), ("False", false), ("", false)] {
            let r = row(&["h", "n", "", "", flag, "", "", "", "", ""]);
            assert_eq!(parse_row(Path::new("in.csv"), &r).unwrap().is_good_dump, good, "{flag}");
        }
    }

    #[test]
    fn short_row_is_an_error() {
        let r = row(&["h", "n", "", "", "True"]);
        let err = parse_row(Path::new("in.csv"), &r).unwrap_err();
        assert!(matches!(err, ImportError::ShortRow { found: 5, expected: 10, .. }));
    }
}
