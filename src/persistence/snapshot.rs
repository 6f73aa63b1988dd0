//! Whole-table persistence.
//!
//! - Binary snapshot: the full record sequence encoded with bincode. Saves
//!   go to `<path>.tmp` first, are synced, and then renamed over the real
//!   file so a crash mid-write never leaves a truncated snapshot behind.
//! - Bulk import: a UTF-8 JSON array of records, used to seed a table
//!   before its first snapshot exists.
//!
//! Both directions always move the entire collection at once.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::{Result, TableError};

const TEMP_EXTENSION: &str = "tmp";

pub(crate) fn read_snapshot<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|e| TableError::io("open snapshot", path, e))?;
    bincode::deserialize_from(BufReader::new(file)).map_err(TableError::Decode)
}

pub(crate) fn write_snapshot<T: Serialize>(path: &Path, records: &[&T]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| TableError::io("create directory", parent, e))?;
    }

    let tmp_path = temp_path(path);
    let written = write_temp(&tmp_path, records).and_then(|()| {
        fs::rename(&tmp_path, path).map_err(|e| TableError::io("replace snapshot", path, e))
    });

    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    written
}

fn write_temp<T: Serialize>(tmp_path: &Path, records: &[&T]) -> Result<()> {
    //! Encode into `tmp_path` and make it durable.

    let file = File::create(tmp_path).map_err(|e| TableError::io("create", tmp_path, e))?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, records).map_err(TableError::Encode)?;

    let file = writer
        .into_inner()
        .map_err(|e| TableError::io("flush", tmp_path, e.into_error()))?;
    file.sync_all()
        .map_err(|e| TableError::io("sync", tmp_path, e))
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|e| TableError::io("open bulk import", path, e))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

pub(crate) fn write_json<T: Serialize>(path: &Path, records: &[&T]) -> Result<()> {
    let file = File::create(path).map_err(|e| TableError::io("create", path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer
        .flush()
        .map_err(|e| TableError::io("flush", path, e))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(TEMP_EXTENSION);
    path.with_file_name(name)
}
