use std::path::{Path, PathBuf};
use std::time::Duration;

use rowlite_engine::persistence::{Record, Table, TableConfig};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Testdata {
    #[serde(rename = "ID")]
    pub id: i64,
    pub name: String,
    pub age: i32,
}

impl Testdata {
    pub fn new(name: &str, age: i32) -> Testdata {
        Testdata {
            id: 0,
            name: name.to_string(),
            age,
        }
    }
}

impl Record for Testdata {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.age.to_string()]
    }
}

pub fn gendata(count: i64) -> Vec<Testdata> {
    //! Records with ids 1..=count, ages starting at 11.

    (1..=count)
        .map(|i| Testdata {
            id: i,
            name: format!("person {}", i),
            age: i as i32 + 10,
        })
        .collect()
}

pub fn write_seed(dir: &Path, records: &[Testdata]) -> PathBuf {
    let path = dir.join("test.json");
    std::fs::write(&path, serde_json::to_vec_pretty(records).unwrap()).unwrap();
    path
}

pub fn snapshot_table(dir: &TempDir) -> Table<Testdata> {
    //! A table bound to `<dir>/test.snap` with an autosave interval long
    //! enough to never fire during a test.

    Table::new(
        "test",
        TableConfig::in_dir(dir.path(), "test").with_autosave_interval(Duration::from_secs(3600)),
    )
}

pub fn seeded_table(dir: &TempDir, count: i64) -> Table<Testdata> {
    let table = snapshot_table(dir);
    let seed = write_seed(dir.path(), &gendata(count));
    table.load_bulk_import(seed).unwrap();
    table
}

pub fn sorted_by_id(mut records: Vec<Testdata>) -> Vec<Testdata> {
    records.sort_by_key(|record| record.id);
    records
}
