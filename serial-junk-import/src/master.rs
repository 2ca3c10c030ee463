//! Master list files.
//!
//! One file per system, semicolon-delimited with a header row. Columns:
//! 1 system prefix, 2 game id with the region letter appended, 3 revision,
//! 4 name, 6 manufacturer id. Other columns are ignored.

use std::path::Path;

use serial_junk_core::{Region, SystemPrefix};
use serial_junk_xref::{MasterEntry, MasterList};

use crate::error::ImportError;
use crate::records::{open_reader, row_line};

const PREFIX: usize = 1;
const GAME_REGION: usize = 2;
const REVISION: usize = 3;
const NAME: usize = 4;
const MASTER_ID: usize = 6;
const MIN_COLUMNS: usize = MASTER_ID + 1;

/// Read one master list file. Rows with an unknown prefix, an empty game
/// field, or a non-numeric revision are logged and skipped.
pub fn read_master_file(path: &Path) -> Result<Vec<MasterEntry>, ImportError> {
    let mut reader = open_reader(path)?;
    let mut entries = Vec::new();

    for result in reader.records() {
        let row = result.map_err(|e| ImportError::read(path, e))?;
        let line = row_line(&row);
        if row.len() < MIN_COLUMNS {
            return Err(ImportError::short_row(path, line, MIN_COLUMNS, row.len()));
        }
        let get = |i: usize| row.get(i).unwrap_or("").trim();

        match parse_entry(get(PREFIX), get(GAME_REGION), get(REVISION), get(NAME), get(MASTER_ID)) {
            Ok(entry) => entries.push(entry),
            Err(reason) => log::warn!("{}:{}: skipping master row: {}", path.display(), line, reason),
        }
    }

    log::debug!("{} master entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Read several master list files into one list, in argument order.
pub fn read_master_lists<I, P>(paths: I) -> Result<MasterList, ImportError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut list = MasterList::new();
    for path in paths {
        list.extend(read_master_file(path.as_ref())?);
    }
    Ok(list)
}

fn parse_entry(
    prefix: &str,
    game_region: &str,
    revision: &str,
    name: &str,
    master_id: &str,
) -> Result<MasterEntry, String> {
    let system: SystemPrefix = prefix.parse().map_err(|e| format!("{e}"))?;

    let mut chars = game_region.chars();
    let letter = chars
        .next_back()
        .ok_or_else(|| "empty game id".to_string())?;
    let game_id = chars.as_str();
    if game_id.is_empty() {
        return Err(format!("game id '{game_region}' has no region letter"));
    }
    let region = Region::new(letter).map_err(|e| format!("{e}"))?;
    let revision: u8 = revision
        .parse()
        .map_err(|_| format!("revision '{revision}' is not a number"))?;

    Ok(MasterEntry {
        system,
        game_id: game_id.to_string(),
        region,
        revision,
        name: name.to_string(),
        master_id: master_id.to_string(),
    })
}
