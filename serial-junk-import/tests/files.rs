use std::fs;
use std::path::Path;

use serial_junk_catalog::{accumulate, build_catalog};
use serial_junk_core::DeriveRules;
use serial_junk_import::*;
use serial_junk_xref::{diff_against_master, scan_shared_serials};
use tempfile::TempDir;

const HEADER: &str = "md5;name;a;b;good;c;d;serial;e;rom\n";

fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

fn dump_file(dir: &Path, name: &str, rows: &[&str]) -> std::path::PathBuf {
    let mut body = HEADER.to_string();
    for row in rows {
        body.push_str(row);
        body.push('\n');
    }
    write(dir, name, &body)
}

#[test]
fn records_span_files_in_order() {
    let tmp = TempDir::new().unwrap();
    let a = dump_file(
        tmp.path(),
        "a.csv",
        &["h1;Zelda (USA);;;True;;;DMG-ZL-USA;;DMG-ZLE-0;"],
    );
    let b = dump_file(
        tmp.path(),
        "b.csv",
        &[
            "h2;Tetris (Japan);;;TRUE;;;DMG-TR-JPN;;;",
            "h3;Broken (USA);;;False;;;DMG-BR-USA;;;",
        ],
    );

    let source = RecordSource::new([a, b]);
    let records: Vec<_> = source.records().collect::<Result<_, _>>().unwrap();
    let hashes: Vec<&str> = records.iter().map(|r| r.hash.as_str()).collect();
    assert_eq!(hashes, ["h1", "h2", "h3"]);
    assert_eq!(records[0].chip_code, "DMG-ZLE-0");
    assert!(records[1].is_good_dump);
    assert!(!records[2].is_good_dump);
    assert_eq!(records[1].chip_code, "");

    // A second pass starts from the beginning again.
    assert_eq!(source.records().count(), 3);
}

#[test]
fn missing_file_fails_when_reached() {
    let tmp = TempDir::new().unwrap();
    let a = dump_file(tmp.path(), "a.csv", &["h1;Zelda (USA);;;True;;;DMG-ZL-USA;;DMG-ZLE-0"]);
    let source = RecordSource::new([a, tmp.path().join("missing.csv")]);

    let mut records = source.records();
    assert!(records.next().unwrap().is_ok());
    assert!(matches!(records.next(), Some(Err(ImportError::Read { .. }))));
}

#[test]
fn short_rows_report_their_line() {
    let tmp = TempDir::new().unwrap();
    let a = dump_file(tmp.path(), "a.csv", &["h1;Zelda;;;True;;;DMG-ZL-USA;;DMG-ZLE-0", "h2;Short"]);
    let source = RecordSource::new([a]);
    let results: Vec<_> = source.records().collect();
    assert!(results[0].is_ok());
    match &results[1] {
        Err(ImportError::ShortRow { line, found, .. }) => {
            assert_eq!(*line, 3);
            assert_eq!(*found, 2);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn master_lists_concatenate() {
    let tmp = TempDir::new().unwrap();
    let dmg = write(
        tmp.path(),
        "dmg.csv",
        "no;prefix;game;rev;name;x;id\n\
         1;DMG;ZLE;0;Zelda;;N-1\n\
         2;DMG;ZLE;X;Bad revision;;N-2\n\
         3;DMG;TRJ;1;Tetris;;N-3\n",
    );
    let cgb = write(
        tmp.path(),
        "cgb.csv",
        "no;prefix;game;rev;name;x;id\n1;CGB;AAUJ;0;Gold;;N-4\n",
    );

    let list = read_master_lists([dmg, cgb]).unwrap();
    let codes: Vec<String> = list.entries().iter().map(|e| e.code().to_string()).collect();
    assert_eq!(codes, ["DMG-ZLE-0", "DMG-TRJ-1", "CGB-AAUJ-0"]);
    assert_eq!(list.get("CGB-AAUJ-0").unwrap().master_id, "N-4");
}

#[test]
fn build_and_diff_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let dumps = dump_file(
        tmp.path(),
        "dumps.csv",
        &[
            "h1;Zelda (USA);;;True;;;DMG-ZL-USA;;DMG-ZLE-0",
            "h2;Zelda (USA) (Rev 1);;;True;;;DMG-ZL-USA;;",
            "h3;Gold (Japan);;;True;;;CGB-AAUJ-JPN;;CGB-AAUJ-0",
            "h4;Tetris (World);;;True;;;DMG-TR;;LH5361",
        ],
    );
    let master = write(
        tmp.path(),
        "master.csv",
        "no;prefix;game;rev;name;x;id\n1;DMG;ZLE;0;Zelda;;N-1\n2;DMG;ZLE;2;Zelda;;N-2\n",
    );

    let rules = DeriveRules::default();
    let records: Vec<_> = RecordSource::new([dumps])
        .records()
        .collect::<Result<_, _>>()
        .unwrap();
    let acc = accumulate(records, &rules).unwrap();

    let codes_path = tmp.path().join("codes.csv");
    write_code_list(
        fs::File::create(&codes_path).unwrap(),
        &acc.entries,
        &acc.uncatalogued,
    )
    .unwrap();
    assert_eq!(
        fs::read_to_string(&codes_path).unwrap(),
        "h1;DMG-ZLE-0;Zelda (USA);false\n\
         h2;DMG-ZLE-1;Zelda (USA) (Rev 1);true\n\
         h3;CGB-AAUJ-0;Gold (Japan);false\n\
         h4;LH5361;Tetris (World);false\n"
    );

    let catalog = build_catalog(acc.entries).catalog;
    let list = read_master_lists([master]).unwrap();
    let diff = diff_against_master(&catalog, &list);

    let out = tmp.path().join("report");
    let written = write_diff_report(&out, &diff).unwrap();
    assert_eq!(written.len(), 2);
    assert_eq!(
        fs::read_to_string(out.join(MASTER_ONLY_FILE)).unwrap(),
        "code;id;name\nDMG-ZLE-2;N-2;Zelda\n"
    );
    assert_eq!(
        fs::read_to_string(out.join(DERIVED_ONLY_FILE)).unwrap(),
        "hash;code;name;is_synthetic\n\
         h3;CGB-AAUJ-0;Gold (Japan);false\n\
         h2;DMG-ZLE-1;Zelda (USA) (Rev 1);true\n"
    );
}

#[test]
fn shared_report_files() {
    let tmp = TempDir::new().unwrap();
    let dumps = dump_file(
        tmp.path(),
        "dumps.csv",
        &[
            "h1;Game (USA);;;True;;;DMG-ABCE-USA;;DMG-ABCE-0",
            "h2;Game (Europe);;;True;;;DMG-ABCP-EUR;;DMG-ABCP-0",
        ],
    );
    let records: Vec<_> = RecordSource::new([dumps])
        .records()
        .collect::<Result<_, _>>()
        .unwrap();
    let report = scan_shared_serials(records, &DeriveRules::default(), Default::default());

    let out = tmp.path().join("shared");
    write_shared_report(&out, &report).unwrap();
    assert_eq!(
        fs::read_to_string(out.join(SHARED_CODES_FILE)).unwrap(),
        "hash;code1;code2;name1;name2\n"
    );
    assert_eq!(
        fs::read_to_string(out.join(DISJOINT_CODES_FILE)).unwrap(),
        "hash1;hash2;code1;code2;name1;name2\n\
         h1;h2;DMG-ABCE-0;DMG-ABCP-0;Game (USA);Game (Europe)\n"
    );
}
