use serial_junk_catalog::{CatalogEntry, GameCatalog, build_catalog};
use serial_junk_core::{Region, SystemPrefix};
use serial_junk_xref::*;

fn entry(code: &str, hash: &str, synthetic: bool) -> CatalogEntry {
    CatalogEntry {
        code: code.parse().unwrap(),
        hash: hash.to_string(),
        name: format!("Release {hash}"),
        is_synthetic: synthetic,
    }
}

fn catalog(entries: Vec<CatalogEntry>) -> GameCatalog {
    let build = build_catalog(entries);
    assert!(build.conflicts.is_empty());
    build.catalog
}

fn master(system: SystemPrefix, game: &str, region: char, revision: u8, id: &str) -> MasterEntry {
    MasterEntry {
        system,
        game_id: game.to_string(),
        region: Region::new(region).unwrap(),
        revision,
        name: format!("Official {id}"),
        master_id: id.to_string(),
    }
}

#[test]
fn diff_against_self_is_empty() {
    let cat = catalog(vec![
        entry("DMG-ZLE-0", "h1", false),
        entry("DMG-ZLE-1", "h2", true),
        entry("CGB-BXTJ-0", "h3", false),
    ]);
    let result = diff_catalogs(&cat, &cat);
    assert!(result.is_empty());
}

#[test]
fn master_only_and_derived_only() {
    // Master lists A-1 and B-2; the catalog only has A-1.
    let cat = catalog(vec![entry("DMG-AAAE-1", "h1", false)]);
    let list: MasterList = vec![
        master(SystemPrefix::Dmg, "AAA", 'E', 1, "1001"),
        master(SystemPrefix::Dmg, "BBB", 'E', 2, "1002"),
    ]
    .into_iter()
    .collect();

    let result = diff_against_master(&cat, &list);
    assert!(result.derived_only.is_empty());
    assert_eq!(
        result.master_only,
        [MasterOnlyMiss {
            code: "DMG-BBBE-2".parse().unwrap(),
            master_id: "1002".to_string(),
            name: "Official 1002".to_string(),
        }]
    );
}

#[test]
fn derived_only_carries_dump_fields() {
    let cat = catalog(vec![
        entry("DMG-AAAE-0", "h1", false),
        entry("DMG-AAAE-1", "h2", true),
    ]);
    let list: MasterList = vec![master(SystemPrefix::Dmg, "AAA", 'E', 0, "1001")]
        .into_iter()
        .collect();

    let result = diff_against_master(&cat, &list);
    assert!(result.master_only.is_empty());
    assert_eq!(
        result.derived_only,
        [DerivedOnlyMiss {
            code: "DMG-AAAE-1".parse().unwrap(),
            hash: "h2".to_string(),
            name: "Release h2".to_string(),
            is_synthetic: true,
        }]
    );
}

#[test]
fn lookups_respect_system_prefix() {
    let cat = catalog(vec![entry("CGB-AAAE-0", "h1", false)]);
    let list: MasterList = vec![master(SystemPrefix::Dmg, "AAA", 'E', 0, "1001")]
        .into_iter()
        .collect();

    let result = diff_against_master(&cat, &list);
    assert_eq!(result.master_only.len(), 1);
    assert_eq!(result.derived_only.len(), 1);
}

#[test]
fn master_order_is_preserved() {
    let cat = GameCatalog::new();
    let list: MasterList = vec![
        master(SystemPrefix::Cgb, "ZZZ", 'J', 0, "3"),
        master(SystemPrefix::Dmg, "AAA", 'E', 0, "1"),
        master(SystemPrefix::Dmg, "MMM", 'P', 0, "2"),
    ]
    .into_iter()
    .collect();

    let result = diff_against_master(&cat, &list);
    let ids: Vec<&str> = result.master_only.iter().map(|m| m.master_id.as_str()).collect();
    assert_eq!(ids, ["3", "1", "2"]);
}

#[test]
fn repeated_master_code_is_indexed_once() {
    let list: MasterList = vec![
        master(SystemPrefix::Dmg, "AAA", 'E', 0, "1"),
        master(SystemPrefix::Dmg, "AAA", 'E', 0, "2"),
    ]
    .into_iter()
    .collect();
    assert_eq!(list.len(), 2);
    assert_eq!(list.get("DMG-AAAE-0").unwrap().master_id, "1");
}
