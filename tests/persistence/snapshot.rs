use std::fs;

use rowlite_engine::persistence::{Table, TableConfig, TableError};
use tempfile::TempDir;

use super::common::{Testdata, gendata, seeded_table, snapshot_table, sorted_by_id, write_seed};

#[test]
fn snapshot_round_trip_restores_records() {
    let dir = TempDir::new().unwrap();
    let table = seeded_table(&dir, 25);
    table.delete(7);
    table.add_update(Testdata::new("late arrival", 70)).unwrap();
    table.save_snapshot().unwrap();
    assert!(!table.is_dirty());

    let restored = snapshot_table(&dir);
    let loaded = restored.load_snapshot().unwrap();

    assert_eq!(loaded, 25);
    assert_eq!(sorted_by_id(restored.scan()), sorted_by_id(table.scan()));
    assert_eq!(restored.last_id(), 26);
    assert!(!restored.is_dirty());
}

#[test]
fn snapshot_load_rebuilds_search_text() {
    let dir = TempDir::new().unwrap();
    let table = seeded_table(&dir, 5);
    table.save_snapshot().unwrap();

    let restored = snapshot_table(&dir);
    restored.load_snapshot().unwrap();

    let rows = restored.search("person 3");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, 3);
}

#[test]
fn snapshot_requires_path() {
    let table: Table<Testdata> = Table::in_memory("test");

    assert!(matches!(
        table.load_snapshot(),
        Err(TableError::SnapshotPathUnset)
    ));
    assert!(matches!(
        table.save_snapshot(),
        Err(TableError::SnapshotPathUnset)
    ));
}

#[test]
fn snapshot_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let table = snapshot_table(&dir);

    assert!(matches!(table.load_snapshot(), Err(TableError::Io { .. })));
    assert_eq!(table.total_rows(), 0);
}

#[test]
fn snapshot_corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let table = seeded_table(&dir, 10);
    table.save_snapshot().unwrap();

    let path = table.snapshot_path().unwrap().to_path_buf();
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    let restored = snapshot_table(&dir);
    assert!(matches!(
        restored.load_snapshot(),
        Err(TableError::Decode(_))
    ));
}

#[test]
fn snapshot_save_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a").join("b").join("test.snap");
    let table = Table::new("test", TableConfig::new().with_snapshot_path(&path));

    table.add_update(Testdata::new("Rango", 3)).unwrap();
    table.save_snapshot().unwrap();

    assert!(path.exists());
}

#[test]
fn bulk_import_sets_last_id_from_data() {
    let dir = TempDir::new().unwrap();
    let mut records = gendata(3);
    records[1].id = 40;
    let seed = write_seed(dir.path(), &records);

    let table = snapshot_table(&dir);
    assert_eq!(table.load_bulk_import(seed).unwrap(), 3);

    assert_eq!(table.last_id(), 40);
    assert!(table.is_dirty());
    assert_eq!(table.add_update(Testdata::new("next", 1)).unwrap(), 41);
}

#[test]
fn bulk_import_assigns_ids_to_unnumbered_records() {
    let dir = TempDir::new().unwrap();
    let mut records = gendata(3);
    records.push(Testdata::new("no id", 50));
    let seed = write_seed(dir.path(), &records);

    let table = snapshot_table(&dir);
    table.load_bulk_import(seed).unwrap();

    assert_eq!(table.find_by_id(4).unwrap().name, "no id");
    assert_eq!(table.last_id(), 4);
}

#[test]
fn bulk_import_rejects_duplicate_ids() {
    let dir = TempDir::new().unwrap();
    let mut records = gendata(3);
    records[2].id = 1;
    let seed = write_seed(dir.path(), &records);

    let table = snapshot_table(&dir);

    assert!(matches!(
        table.load_bulk_import(seed),
        Err(TableError::DuplicateId(1))
    ));
    assert_eq!(table.total_rows(), 0);
}

#[test]
fn bulk_import_malformed_json_leaves_table_untouched() {
    let dir = TempDir::new().unwrap();
    let table = seeded_table(&dir, 4);

    let broken = dir.path().join("broken.json");
    fs::write(&broken, r#"[{"ID": 1, "Name": "x", "Age": 3}, {"ID": "#).unwrap();

    assert!(matches!(
        table.load_bulk_import(&broken),
        Err(TableError::Json(_))
    ));
    assert_eq!(table.total_rows(), 4);
}

#[test]
fn load_or_import_prefers_snapshot() {
    let dir = TempDir::new().unwrap();
    let seed = write_seed(dir.path(), &gendata(10));

    let first = snapshot_table(&dir);
    assert_eq!(first.load_or_import(&seed).unwrap(), 10);
    first.delete(1);
    first.save_snapshot().unwrap();

    let second = snapshot_table(&dir);
    assert_eq!(second.load_or_import(&seed).unwrap(), 9);
    assert!(second.find_by_id(1).is_none());
}

#[test]
fn export_json_can_be_imported_again() {
    let dir = TempDir::new().unwrap();
    let table = seeded_table(&dir, 6);
    table
        .add_update(Testdata {
            id: 2,
            name: "changed".to_string(),
            age: 1,
        })
        .unwrap();

    let exported = dir.path().join("export.json");
    table.export_json(&exported).unwrap();

    let other: Table<Testdata> = Table::in_memory("copy");
    other.load_bulk_import(&exported).unwrap();

    assert_eq!(sorted_by_id(other.scan()), sorted_by_id(table.scan()));
    assert_eq!(other.search("changed").len(), 1);
}

#[test]
fn reload_never_reuses_previously_assigned_ids() {
    let dir = TempDir::new().unwrap();
    let table = seeded_table(&dir, 5);
    let extra = table.add_update(Testdata::new("extra", 60)).unwrap();
    assert_eq!(extra, 6);
    for id in 1..=6 {
        table.delete(id);
    }

    let empty = write_seed(dir.path(), &[]);
    table.load_bulk_import(empty).unwrap();
    assert_eq!(table.last_id(), 6);

    assert_eq!(table.add_update(Testdata::new("fresh", 1)).unwrap(), 7);
}

#[test]
fn reload_numbers_unnumbered_records_past_previous_ids() {
    let dir = TempDir::new().unwrap();
    let table = seeded_table(&dir, 8);

    let seed = write_seed(dir.path(), &[Testdata::new("no id", 3)]);
    table.load_bulk_import(seed).unwrap();

    assert_eq!(table.scan()[0].id, 9);
    assert_eq!(table.last_id(), 9);
}

#[test]
fn bulk_import_at_max_id_refuses_further_inserts() {
    let dir = TempDir::new().unwrap();
    let mut records = gendata(1);
    records[0].id = i64::MAX;
    let seed = write_seed(dir.path(), &records);

    let table = snapshot_table(&dir);
    table.load_bulk_import(seed).unwrap();

    assert!(matches!(
        table.add_update(Testdata::new("one too many", 1)),
        Err(TableError::IdSpaceExhausted(i64::MAX))
    ));
    assert_eq!(table.total_rows(), 1);
    assert_eq!(table.last_id(), i64::MAX);

    // updates to existing ids still work
    let mut existing = table.find_by_id(i64::MAX).unwrap();
    existing.age = 99;
    assert_eq!(table.add_update(existing).unwrap(), i64::MAX);
}

#[test]
fn bulk_import_at_max_id_cannot_number_new_records() {
    let dir = TempDir::new().unwrap();
    let mut records = gendata(1);
    records[0].id = i64::MAX;
    records.push(Testdata::new("no id", 5));
    let seed = write_seed(dir.path(), &records);

    let table = snapshot_table(&dir);

    assert!(matches!(
        table.load_bulk_import(seed),
        Err(TableError::IdSpaceExhausted(i64::MAX))
    ));
    assert_eq!(table.total_rows(), 0);
    assert_eq!(table.last_id(), 0);
}
