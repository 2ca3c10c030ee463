//! Rules file location and resolution.

use std::fmt;
use std::path::{Path, PathBuf};

use serial_junk_core::DeriveRules;

use crate::CliError;

/// Default rules file: `~/.config/serial-junk/rules.toml`.
pub(crate) fn rules_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("serial-junk").join("rules.toml")
}

/// Where the effective rules came from.
pub(crate) enum RulesOrigin {
    Flag(PathBuf),
    ConfigFile(PathBuf),
    Defaults,
}

impl fmt::Display for RulesOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(p) | Self::ConfigFile(p) => write!(f, "{}", p.display()),
            Self::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// Resolve rules using a priority chain:
///
/// 1. `--rules` (must exist)
/// 2. The default rules file, when present
/// 3. Built-in defaults
pub(crate) fn resolve_rules(cli_override: Option<&Path>) -> Result<(DeriveRules, RulesOrigin), CliError> {
    resolve_rules_from(cli_override, &rules_path())
}

fn resolve_rules_from(
    cli_override: Option<&Path>,
    default_path: &Path,
) -> Result<(DeriveRules, RulesOrigin), CliError> {
    if let Some(p) = cli_override {
        return Ok((DeriveRules::load(p)?, RulesOrigin::Flag(p.to_path_buf())));
    }
    if default_path.exists() {
        return Ok((
            DeriveRules::load(default_path)?,
            RulesOrigin::ConfigFile(default_path.to_path_buf()),
        ));
    }
    Ok((DeriveRules::default(), RulesOrigin::Defaults))
}

/// `catalog.yaml` → `catalog-dmg.yaml`.
pub(crate) fn split_catalog_path(output: &Path, slug: &str) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "catalog".to_string());
    let ext = output
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "yaml".to_string());
    output.with_file_name(format!("{stem}-{slug}.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_junk_core::UnresolvedRegionPolicy;
    use tempfile::TempDir;

    #[test]
    fn split_paths() {
        assert_eq!(
            split_catalog_path(Path::new("out/gb.yaml"), "dmg"),
            PathBuf::from("out/gb-dmg.yaml")
        );
        assert_eq!(
            split_catalog_path(Path::new("gb"), "cgb"),
            PathBuf::from("gb-cgb.yaml")
        );
    }

    #[test]
    fn resolution_order() {
        let tmp = TempDir::new().unwrap();
        let default_path = tmp.path().join("rules.toml");

        let (rules, origin) = resolve_rules_from(None, &default_path).unwrap();
        assert!(matches!(origin, RulesOrigin::Defaults));
        assert_eq!(rules, DeriveRules::default());

        std::fs::write(&default_path, "on_unresolved_region = \"skip\"\n").unwrap();
        let (rules, origin) = resolve_rules_from(None, &default_path).unwrap();
        assert!(matches!(origin, RulesOrigin::ConfigFile(_)));
        assert_eq!(rules.on_unresolved_region, UnresolvedRegionPolicy::Skip);

        let missing = tmp.path().join("missing.toml");
        assert!(resolve_rules_from(Some(&missing), &default_path).is_err());
    }
}
