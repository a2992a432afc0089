//! Table loading from a data directory, fatal load errors and reload.

use std::fs;
use std::path::Path;

use linear_b::engine::{Analyzer, AnalyzerConfig};
use linear_b::error::LinearBError;
use linear_b::tables::{TableError, TableSet, TableSource};

const SIGNS: &str = include_str!("../data/signs.toml");
const LEXICON: &str = include_str!("../data/lexicon.toml");
const PARADIGMS: &str = include_str!("../data/paradigms.toml");
const SOUND_CHANGES: &str = include_str!("../data/sound_changes.toml");

fn write_tables(dir: &Path) {
    fs::write(dir.join("signs.toml"), SIGNS).unwrap();
    fs::write(dir.join("lexicon.toml"), LEXICON).unwrap();
    fs::write(dir.join("paradigms.toml"), PARADIGMS).unwrap();
    fs::write(dir.join("sound_changes.toml"), SOUND_CHANGES).unwrap();
}

fn analyzer_for(dir: &Path) -> Result<Analyzer, LinearBError> {
    Analyzer::new(AnalyzerConfig {
        data_dir: Some(dir.to_path_buf()),
    })
}

#[test]
fn loads_from_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    write_tables(dir.path());

    let tables = TableSet::load_dir(dir.path()).unwrap();
    let bundled = TableSet::bundled().unwrap();
    assert_eq!(tables.source, TableSource::Directory(dir.path().to_path_buf()));
    assert_eq!(tables.signs.len(), bundled.signs.len());
    assert_eq!(tables.lexicon.len(), bundled.lexicon.len());

    let analyzer = analyzer_for(dir.path()).unwrap();
    assert_eq!(analyzer.transcribe("\u{10037}\u{10019}\u{1000F}")[0].transliteration, "wa-na-ka");
}

#[test]
fn missing_table_is_fatal() {
    let dir = tempfile::TempDir::new().unwrap();
    write_tables(dir.path());
    fs::remove_file(dir.path().join("paradigms.toml")).unwrap();

    let err = TableSet::load_dir(dir.path()).unwrap_err();
    match err {
        TableError::MissingTable { table, .. } => assert_eq!(table, "paradigms"),
        other => panic!("expected MissingTable, got {other:?}"),
    }
    assert!(matches!(
        analyzer_for(dir.path()),
        Err(LinearBError::Table(TableError::MissingTable { .. }))
    ));
}

#[test]
fn malformed_cell_key_is_fatal() {
    let dir = tempfile::TempDir::new().unwrap();
    write_tables(dir.path());
    let broken = PARADIGMS.replacen("dative_singular", "dative", 1);
    fs::write(dir.path().join("paradigms.toml"), broken).unwrap();

    assert!(matches!(
        TableSet::load_dir(dir.path()),
        Err(TableError::Invalid { .. })
    ));
}

#[test]
fn unknown_change_type_is_fatal() {
    let dir = tempfile::TempDir::new().unwrap();
    write_tables(dir.path());
    let broken = SOUND_CHANGES.replacen("type = \"loss\"", "type = \"drift\"", 1);
    fs::write(dir.path().join("sound_changes.toml"), broken).unwrap();

    assert!(matches!(
        TableSet::load_dir(dir.path()),
        Err(TableError::Parse { .. })
    ));
}

#[test]
fn reload_swaps_the_whole_set() {
    let dir = tempfile::TempDir::new().unwrap();
    write_tables(dir.path());
    let analyzer = analyzer_for(dir.path()).unwrap();
    let before = analyzer.snapshot();
    let entries = before.tables.lexicon.len();
    assert!(analyzer.analyze("a-ko-ro")[0].confidence < 0.9);

    let extended = format!(
        "{LEXICON}\n[[word]]\nkey = \"a-ko-ro\"\nstem = \"agr\"\npart_of_speech = \"noun\"\n\
         declension = \"o_stem_masculine\"\nmeaning = \"field\"\n"
    );
    fs::write(dir.path().join("lexicon.toml"), extended).unwrap();
    analyzer.reload().unwrap();

    assert_eq!(analyzer.info().lexicon_entries, entries + 1);
    assert_eq!(analyzer.analyze("a-ko-ro")[0].confidence, 0.9);
    // An old snapshot is unaffected by the swap.
    assert_eq!(before.tables.lexicon.len(), entries);
}

#[test]
fn failed_reload_keeps_previous_tables() {
    let dir = tempfile::TempDir::new().unwrap();
    write_tables(dir.path());
    let analyzer = analyzer_for(dir.path()).unwrap();
    let entries = analyzer.info().lexicon_entries;

    fs::write(dir.path().join("lexicon.toml"), "[[word]\n").unwrap();
    assert!(analyzer.reload().is_err());
    assert_eq!(analyzer.info().lexicon_entries, entries);
    assert_eq!(analyzer.analyze("wa-na-ka-te")[0].ending, "te");
}
