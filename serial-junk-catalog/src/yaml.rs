//! YAML persistence for built catalogs.
//!
//! Layout:
//! ```yaml
//! DMG-ZL:
//!   E:
//!     0:
//!       revision: 0
//!       name: Zelda no Densetsu - Yume o Miru Shima (Japan)
//!       is_synthetic: false
//!       hash: 0e4ddff32fc9d1eeaae812a157dd246459b00c9e
//!       code: DMG-ZLE-0
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serial_junk_core::{CanonicalCode, Region};
use thiserror::Error;

use crate::catalog::{CatalogEntry, GameCatalog};

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("YAML serialize error: {0}")]
    Serialize(#[from] serde_yml::Error),
    /// An entry's code disagrees with the keys it is filed under.
    #[error("entry {code} is filed under {game}/{region}/{revision}")]
    Misfiled {
        code: String,
        game: String,
        region: Region,
        revision: u8,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    revision: u8,
    name: String,
    is_synthetic: bool,
    hash: String,
    code: CanonicalCode,
}

type StoredCatalog = BTreeMap<String, BTreeMap<Region, BTreeMap<u8, StoredEntry>>>;

pub fn catalog_to_yaml_string(catalog: &GameCatalog) -> Result<String, YamlError> {
    let mut stored = StoredCatalog::new();
    for entry in catalog.entries() {
        stored
            .entry(entry.code.game_key())
            .or_default()
            .entry(entry.code.region)
            .or_default()
            .insert(
                entry.code.revision,
                StoredEntry {
                    revision: entry.code.revision,
                    name: entry.name.clone(),
                    is_synthetic: entry.is_synthetic,
                    hash: entry.hash.clone(),
                    code: entry.code.clone(),
                },
            );
    }
    Ok(serde_yml::to_string(&stored)?)
}

/// Parse a persisted catalog, checking every entry sits under its own
/// code's keys.
pub fn catalog_from_yaml_str(contents: &str, origin: &str) -> Result<GameCatalog, YamlError> {
    let stored: StoredCatalog = serde_yml::from_str(contents).map_err(|e| YamlError::Parse {
        path: origin.to_string(),
        source: e,
    })?;

    let mut catalog = GameCatalog::new();
    for (game, regions) in stored {
        for (region, revisions) in regions {
            for (revision, stored) in revisions {
                let code = stored.code;
                if code.game_key() != game
                    || code.region != region
                    || code.revision != revision
                    || stored.revision != revision
                {
                    return Err(YamlError::Misfiled {
                        code: code.to_string(),
                        game,
                        region,
                        revision,
                    });
                }
                // Keys are unique in the source map, so the slot is free.
                let _ = catalog.try_insert(CatalogEntry {
                    code,
                    hash: stored.hash,
                    name: stored.name,
                    is_synthetic: stored.is_synthetic,
                });
            }
        }
    }
    Ok(catalog)
}

pub fn save_catalog(path: &Path, catalog: &GameCatalog) -> Result<(), YamlError> {
    let yaml = catalog_to_yaml_string(catalog)?;
    std::fs::write(path, yaml).map_err(|e| YamlError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

pub fn load_catalog(path: &Path) -> Result<GameCatalog, YamlError> {
    let contents = std::fs::read_to_string(path).map_err(|e| YamlError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    catalog_from_yaml_str(&contents, &path.display().to_string())
}
