//! Semicolon-delimited report files.
//!
//! Each report section goes to its own file with a header row:
//!
//! | File | Columns |
//! |---|---|
//! | `master-only.csv` | code, id, name |
//! | `derived-only.csv` | hash, code, name, is_synthetic |
//! | `shared-codes.csv` | hash, code1, code2, name1, name2 |
//! | `disjoint-codes.csv` | hash1, hash2, code1, code2, name1, name2 |
//!
//! The flat code list written by [`write_code_list`] has no header.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serial_junk_catalog::{CatalogEntry, UncataloguedCode};
use serial_junk_xref::{DiffResult, SharedSerialReport};

use crate::error::ImportError;

pub const MASTER_ONLY_FILE: &str = "master-only.csv";
pub const DERIVED_ONLY_FILE: &str = "derived-only.csv";
pub const SHARED_CODES_FILE: &str = "shared-codes.csv";
pub const DISJOINT_CODES_FILE: &str = "disjoint-codes.csv";

#[derive(Serialize)]
struct MasterOnlyRow<'a> {
    code: String,
    id: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct DerivedOnlyRow<'a> {
    hash: &'a str,
    code: String,
    name: &'a str,
    is_synthetic: bool,
}

#[derive(Serialize)]
struct SharedRow<'a> {
    hash: &'a str,
    code1: &'a str,
    code2: &'a str,
    name1: &'a str,
    name2: &'a str,
}

#[derive(Serialize)]
struct DisjointRow<'a> {
    hash1: &'a str,
    hash2: &'a str,
    code1: &'a str,
    code2: &'a str,
    name1: &'a str,
    name2: &'a str,
}

fn writer<W: io::Write>(out: W, headers: bool) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(headers)
        .from_writer(out)
}

/// Write the master-only section of a diff.
pub fn write_master_only<W: io::Write>(out: W, diff: &DiffResult) -> Result<(), ImportError> {
    let mut w = writer(out, true);
    if diff.master_only.is_empty() {
        w.write_record(["code", "id", "name"])?;
    }
    for miss in &diff.master_only {
        w.serialize(MasterOnlyRow {
            code: miss.code.to_string(),
            id: &miss.master_id,
            name: &miss.name,
        })?;
    }
    w.flush()?;
    Ok(())
}

/// Write the derived-only section of a diff.
pub fn write_derived_only<W: io::Write>(out: W, diff: &DiffResult) -> Result<(), ImportError> {
    let mut w = writer(out, true);
    if diff.derived_only.is_empty() {
        w.write_record(["hash", "code", "name", "is_synthetic"])?;
    }
    for miss in &diff.derived_only {
        w.serialize(DerivedOnlyRow {
            hash: &miss.hash,
            code: miss.code.to_string(),
            name: &miss.name,
            is_synthetic: miss.is_synthetic,
        })?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_shared_codes<W: io::Write>(out: W, report: &SharedSerialReport) -> Result<(), ImportError> {
    let mut w = writer(out, true);
    if report.shared.is_empty() {
        w.write_record(["hash", "code1", "code2", "name1", "name2"])?;
    }
    for s in &report.shared {
        w.serialize(SharedRow {
            hash: &s.hash,
            code1: &s.code1,
            code2: &s.code2,
            name1: &s.name1,
            name2: &s.name2,
        })?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_disjoint_codes<W: io::Write>(out: W, report: &SharedSerialReport) -> Result<(), ImportError> {
    let mut w = writer(out, true);
    if report.disjoint.is_empty() {
        w.write_record(["hash1", "hash2", "code1", "code2", "name1", "name2"])?;
    }
    for d in &report.disjoint {
        w.serialize(DisjointRow {
            hash1: &d.hash1,
            hash2: &d.hash2,
            code1: &d.code1,
            code2: &d.code2,
            name1: &d.name1,
            name2: &d.name2,
        })?;
    }
    w.flush()?;
    Ok(())
}

/// Write `hash;code;name;is_synthetic` rows, one per entry, in the given
/// order. Uncatalogued chip codes follow verbatim, never synthetic.
pub fn write_code_list<W: io::Write>(
    out: W,
    entries: &[CatalogEntry],
    uncatalogued: &[UncataloguedCode],
) -> Result<(), ImportError> {
    let mut w = writer(out, false);
    for entry in entries {
        w.serialize(DerivedOnlyRow {
            hash: &entry.hash,
            code: entry.code.to_string(),
            name: &entry.name,
            is_synthetic: entry.is_synthetic,
        })?;
    }
    for code in uncatalogued {
        w.serialize(DerivedOnlyRow {
            hash: &code.hash,
            code: code.chip_code.clone(),
            name: &code.name,
            is_synthetic: false,
        })?;
    }
    w.flush()?;
    Ok(())
}

fn create(dir: &Path, file: &str) -> Result<(PathBuf, std::fs::File), ImportError> {
    let path = dir.join(file);
    let f = std::fs::File::create(&path)?;
    Ok((path, f))
}

/// Write both diff sections into `dir`, returning the files written.
pub fn write_diff_report(dir: &Path, diff: &DiffResult) -> Result<Vec<PathBuf>, ImportError> {
    std::fs::create_dir_all(dir)?;
    let (master_path, f) = create(dir, MASTER_ONLY_FILE)?;
    write_master_only(f, diff)?;
    let (derived_path, f) = create(dir, DERIVED_ONLY_FILE)?;
    write_derived_only(f, diff)?;
    Ok(vec![master_path, derived_path])
}

/// Write both shared-serial sections into `dir`, returning the files written.
pub fn write_shared_report(dir: &Path, report: &SharedSerialReport) -> Result<Vec<PathBuf>, ImportError> {
    std::fs::create_dir_all(dir)?;
    let (shared_path, f) = create(dir, SHARED_CODES_FILE)?;
    write_shared_codes(f, report)?;
    let (disjoint_path, f) = create(dir, DISJOINT_CODES_FILE)?;
    write_disjoint_codes(f, report)?;
    Ok(vec![shared_path, disjoint_path])
}
