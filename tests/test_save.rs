use std::collections::BTreeMap;
use std::fs;

use tempfile::TempDir;

use space_adventure::{SaveError, SaveSlot, SaveTable};

fn table(slots: &[(&str, u32)]) -> SaveTable {
    let map: BTreeMap<usize, SaveSlot> = slots
        .iter()
        .enumerate()
        .map(|(i, (name, score))| (i, SaveSlot::new(*name, *score)))
        .collect();
    SaveTable::from(map)
}

#[test]
fn round_trip_keeps_slots_in_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saves.csv");
    let saved = table(&[("Ann", 42), ("Bo", 7)]);

    saved.save(&path).unwrap();
    let loaded = SaveTable::load(&path).unwrap();

    assert_eq!(loaded, saved);
    assert_eq!(loaded.get(0), Some(&SaveSlot::new("Ann", 42)));
}

#[test]
fn file_has_name_score_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saves.csv");
    table(&[("Ann", 42)]).save(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["Name,Score", "Ann,42"]);
}

#[test]
fn empty_table_still_writes_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saves.csv");
    SaveTable::new().save(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap().trim(), "Name,Score");
    assert!(SaveTable::load(&path).unwrap().is_empty());
}

#[test]
fn names_with_commas_survive() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saves.csv");
    let saved = table(&[("a,b", 1), ("\"q\"", 2)]);
    saved.save(&path).unwrap();
    assert_eq!(SaveTable::load(&path).unwrap(), saved);
}

#[test]
fn save_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("saves.csv");
    table(&[("Ann", 1)]).save(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn missing_file_is_empty_table() {
    let dir = TempDir::new().unwrap();
    let loaded = SaveTable::load(&dir.path().join("nope.csv")).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saves.csv");
    fs::write(&path, "Name,Score\nAnn,lots\n").unwrap();

    let err = SaveTable::load(&path).unwrap_err();
    assert!(matches!(err, SaveError::Csv { .. }));
    assert!(err.to_string().contains("saves.csv"));
}

#[test]
fn load_or_default_swallows_bad_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saves.csv");
    fs::write(&path, "Name,Score\nAnn,-3\n").unwrap();
    assert!(SaveTable::load_or_default(&path).is_empty());
}

#[test]
fn set_overwrites_or_appends() {
    let mut t = table(&[("Ann", 42)]);
    t.set(0, SaveSlot::new("Ann", 50)).unwrap();
    t.set(1, SaveSlot::new("Bo", 3)).unwrap();
    assert_eq!(t.len(), 2);
    assert_eq!(t.get(0).map(|s| s.score), Some(50));
}

#[test]
fn set_rejects_gaps() {
    let mut t = table(&[("Ann", 42)]);
    let err = t.set(3, SaveSlot::new("Zed", 1)).unwrap_err();
    assert!(matches!(err, SaveError::SlotOutOfRange { slot: 3, max: 2 }));
    assert_eq!(t.len(), 1);
}

#[test]
fn iter_is_in_slot_order() {
    let t = table(&[("a", 1), ("b", 2), ("c", 3)]);
    let names: Vec<&str> = t.iter().map(|(_, s)| s.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(t.as_map().keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
}
