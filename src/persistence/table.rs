use std::collections::HashSet;
use std::fmt::Display;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockWriteGuard, Weak};
use std::time::Instant;

use log::{debug, error, info, warn};

use super::autosave::{Autosave, AutosaveState};
use super::config::TableConfig;
use super::error::{Result, TableError};
use super::record::Record;
use super::row::Row;
use super::snapshot;

/// A typed, in-memory collection of records with snapshot persistence.
///
/// A [`Table`] is a cheap handle: clones share the same records, so one
/// table can be handed to as many threads as needed.
///
/// # Concurrency
/// Rows live behind a copy-on-write pointer. Readers ([`Table::find_by_id`],
/// [`Table::query`], [`Table::query_paged`], [`Table::search`]) grab the
/// current epoch and scan it without holding any lock, so a concurrent
/// writer can never reorder or shrink what they are iterating.
///
/// Writers ([`Table::add_update`], [`Table::delete`], [`Table::save_snapshot`])
/// serialize on a single mutation guard. The backing vector is only cloned
/// when a reader still holds the previous epoch.
///
/// # Lifecycle
/// `new` -> `load_snapshot` / `load_bulk_import` -> CRUD and queries -> `close`.
/// CRUD on a table that was never loaded simply starts from an empty one.
pub struct Table<T: Record> {
    inner: Arc<Shared<T>>,
}

struct Shared<T> {
    name: String,
    config: TableConfig,
    rows: RwLock<Arc<Vec<Row<T>>>>,
    meta: Mutex<TableMeta>,
    autosave: Mutex<AutosaveState>,
}

/// State guarded by the mutation lock.
struct TableMeta {
    last_id: i64,
    dirty: bool,
}

impl<T: Record> Clone for Table<T> {
    fn clone(&self) -> Self {
        Table {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Record> Table<T> {
    pub fn new(name: impl Into<String>, config: TableConfig) -> Table<T> {
        //! Create an empty table. Nothing touches the disk until a load or
        //! save is requested.

        Table {
            inner: Arc::new(Shared {
                name: name.into(),
                config,
                rows: RwLock::new(Arc::new(Vec::new())),
                meta: Mutex::new(TableMeta {
                    last_id: 0,
                    dirty: false,
                }),
                autosave: Mutex::new(AutosaveState::Idle),
            }),
        }
    }

    pub fn in_memory(name: impl Into<String>) -> Table<T> {
        //! A table without a snapshot file. It never autosaves.

        Table::new(name, TableConfig::new())
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.inner.config.snapshot_path.as_deref()
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    pub fn load_snapshot(&self) -> Result<usize> {
        //! Replace every record with the contents of the snapshot file.
        //!
        //! Meant for startup; concurrent operations see either the old or the
        //! new collection, never a mix. Search text is rebuilt before this
        //! returns, so the table is immediately queryable.
        //!
        //! Returns the number of records loaded.

        let path = self.require_snapshot_path()?;
        let start = Instant::now();
        let records: Vec<T> = snapshot::read_snapshot(path)?;
        info!(
            "{}: read snapshot {} with {} item(s) in {:?}",
            self.name(),
            path.display(),
            records.len(),
            start.elapsed()
        );

        let loaded = self.replace_all(records, false)?;
        self.ensure_autosave();
        Ok(loaded)
    }

    pub fn load_bulk_import(&self, path: impl AsRef<Path>) -> Result<usize> {
        //! Replace every record with the JSON array stored at `path`.
        //!
        //! Used to seed a table before its first snapshot exists. A malformed
        //! document leaves the table untouched. The imported data is marked
        //! dirty so the next autosave writes the first snapshot.

        let path = path.as_ref();
        let start = Instant::now();
        let records: Vec<T> = snapshot::read_json(path)?;
        info!(
            "{}: loaded {} with {} item(s) in {:?}",
            self.name(),
            path.display(),
            records.len(),
            start.elapsed()
        );

        let loaded = self.replace_all(records, true)?;
        self.ensure_autosave();
        Ok(loaded)
    }

    pub fn load_or_import(&self, seed: impl AsRef<Path>) -> Result<usize> {
        //! Load the snapshot when its file exists, otherwise bulk import
        //! `seed`. This is the usual startup call.

        let path = self.require_snapshot_path()?;
        if path.exists() {
            self.load_snapshot()
        } else {
            self.load_bulk_import(seed)
        }
    }

    pub fn save_snapshot(&self) -> Result<()> {
        //! Write every record to the snapshot file and clear the dirty flag.
        //!
        //! The mutation guard is held for the whole write, so the file always
        //! reflects a single mutation epoch. Readers are not blocked.

        let path = self.require_snapshot_path()?;
        let mut meta = self.inner.lock_meta();
        let rows = self.inner.current_rows();

        let start = Instant::now();
        let records: Vec<&T> = rows.iter().map(|row| &row.record).collect();
        snapshot::write_snapshot(path, &records)?;
        meta.dirty = false;

        info!(
            "{}: wrote snapshot {} with {} item(s) in {:?}",
            self.name(),
            path.display(),
            records.len(),
            start.elapsed()
        );
        Ok(())
    }

    pub fn export_json(&self, path: impl AsRef<Path>) -> Result<()> {
        //! Write the current records as a pretty JSON array, the same shape
        //! [`Table::load_bulk_import`] reads.

        let rows = self.inner.current_rows();
        let records: Vec<&T> = rows.iter().map(|row| &row.record).collect();
        snapshot::write_json(path.as_ref(), &records)
    }

    pub fn close(&self) -> Result<()> {
        //! Stop the autosave worker and write one final snapshot whether or
        //! not the table is dirty.
        //!
        //! A table with no snapshot path has nothing to flush and closes
        //! without error. Autosave never restarts after a close.

        let previous = {
            let mut state = self.inner.lock_autosave();
            std::mem::replace(&mut *state, AutosaveState::Stopped)
        };
        if let AutosaveState::Running(autosave) = previous {
            autosave.stop();
        }

        info!("{}: closing table", self.name());
        if self.inner.config.snapshot_path.is_none() {
            debug!("{}: no snapshot path, nothing to flush", self.name());
            return Ok(());
        }
        self.save_snapshot()
    }

    // ---------------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------------

    pub fn add_update(&self, record: T) -> Result<i64> {
        //! Insert or replace a record by id.
        //!
        //! - If a stored record has the same (positive) id, it is replaced
        //! wholesale. No field-level merge takes place.
        //! - Otherwise the record gets the next id and is appended.
        //!
        //! Search text is rebuilt before returning, so the record is
        //! searchable straight away. Returns the record's id, or
        //! [`TableError::IdSpaceExhausted`] when no fresh id is left; the table
        //! is unchanged in that case.

        self.ensure_autosave();
        let mut row = Row::new(record);
        let id = row.id();

        let mut meta = self.inner.lock_meta();
        let mut rows = self.inner.write_rows();
        let rows = Arc::make_mut(&mut rows);

        let assigned = match position_of(rows, id) {
            Some(index) => {
                rows[index] = row;
                id
            }
            None => {
                let id = next_id(meta.last_id)?;
                meta.last_id = id;
                row.record.set_id(id);
                // the id may be one of the search fields
                row.regenerate_search_text();
                rows.push(row);
                id
            }
        };

        meta.dirty = true;
        Ok(assigned)
    }

    pub fn delete(&self, id: i64) -> bool {
        //! Remove the record with `id`.
        //!
        //! The last record is moved into the freed slot, so record order is
        //! not preserved across deletes. Ids are never handed out again.
        //!
        //! Returns `false` (and changes nothing) when the id is not present.

        self.ensure_autosave();
        let start = Instant::now();

        let mut meta = self.inner.lock_meta();
        let mut rows = self.inner.write_rows();

        let Some(index) = position_of(&rows, id) else {
            warn!("{}: delete by id {} not found", self.name(), id);
            return false;
        };

        Arc::make_mut(&mut rows).swap_remove(index);
        meta.dirty = true;

        debug!("{}: delete by id time = {:?}", self.name(), start.elapsed());
        true
    }

    // ---------------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------------

    pub fn find_by_id(&self, id: i64) -> Option<T> {
        //! Returns a copy of the record with `id`, if present.

        let start = Instant::now();
        let rows = self.inner.current_rows();
        let found = position_of(&rows, id).map(|index| rows[index].record.clone());

        debug!("{}: find by id time = {:?}", self.name(), start.elapsed());
        found
    }

    pub fn query<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        //! Every record matching `predicate`, in encounter order.

        let start = Instant::now();
        let rows = self.inner.current_rows();
        let matches: Vec<T> = rows
            .iter()
            .filter(|row| predicate(&row.record))
            .map(|row| row.record.clone())
            .collect();

        debug!("{}: query time = {:?}", self.name(), start.elapsed());
        matches
    }

    pub fn query_paged<F>(&self, skip: usize, limit: usize, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        //! A page of the records matching `predicate`.
        //!
        //! Both `skip` and `limit` count matching records only. Scanning stops
        //! once `limit` matches are collected; a `limit` of zero returns an
        //! empty page without scanning.

        if limit == 0 {
            return Vec::new();
        }

        let start = Instant::now();
        let rows = self.inner.current_rows();
        let page: Vec<T> = rows
            .iter()
            .filter(|row| predicate(&row.record))
            .skip(skip)
            .take(limit)
            .map(|row| row.record.clone())
            .collect();

        debug!("{}: query paged time = {:?}", self.name(), start.elapsed());
        page
    }

    pub fn search(&self, text: &str) -> Vec<T> {
        //! Free-text search over the derived search text.
        //!
        //! `text` is trimmed, lower-cased and split on single spaces; empty
        //! tokens are dropped. A record matches when EVERY token occurs in its
        //! search text, so a blank query matches everything.

        let start = Instant::now();
        let tokens = tokenize(text);
        let rows = self.inner.current_rows();
        let matches: Vec<T> = rows
            .iter()
            .filter(|row| row.matches_all(&tokens))
            .map(|row| row.record.clone())
            .collect();

        debug!("{}: search time = {:?}", self.name(), start.elapsed());
        matches
    }

    pub fn scan(&self) -> Vec<T> {
        //! A copy of every record, in encounter order.

        let rows = self.inner.current_rows();
        rows.iter().map(|row| row.record.clone()).collect()
    }

    pub fn total_rows(&self) -> usize {
        self.inner.current_rows().len()
    }

    pub fn is_dirty(&self) -> bool {
        self.inner.lock_meta().dirty
    }

    pub fn last_id(&self) -> i64 {
        //! The highest id ever assigned or loaded in this table's lifetime.

        self.inner.lock_meta().last_id
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn require_snapshot_path(&self) -> Result<&Path> {
        self.inner
            .config
            .snapshot_path
            .as_deref()
            .ok_or(TableError::SnapshotPathUnset)
    }

    fn replace_all(&self, records: Vec<T>, dirty: bool) -> Result<usize> {
        //! Swap in a freshly loaded collection.
        //!
        //! Ids must be unique. Records without a positive id get fresh ones
        //! past the highest id this table has ever seen, loaded or assigned.
        //! Search text is rebuilt synchronously.

        let start = Instant::now();
        let mut meta = self.inner.lock_meta();
        let mut seen = HashSet::with_capacity(records.len());
        let mut last_id = meta.last_id;

        for record in records.iter().filter(|record| record.id() > 0) {
            if !seen.insert(record.id()) {
                return Err(TableError::DuplicateId(record.id()));
            }
            last_id = last_id.max(record.id());
        }

        let mut assigned_ids = false;
        let mut rows: Vec<Row<T>> = Vec::with_capacity(records.len());
        for mut record in records {
            if record.id() <= 0 {
                last_id = next_id(last_id)?;
                record.set_id(last_id);
                assigned_ids = true;
            }
            rows.push(Row::new(record));
        }
        let loaded = rows.len();

        *self.inner.write_rows() = Arc::new(rows);
        meta.last_id = last_id;
        meta.dirty = dirty || assigned_ids;

        info!("{}: init search time = {:?}", self.name(), start.elapsed());
        Ok(loaded)
    }

    fn ensure_autosave(&self) {
        //! Start the autosave worker the first time it is needed.

        if self.inner.config.snapshot_path.is_none() {
            return;
        }

        let mut state = self.inner.lock_autosave();
        if !matches!(*state, AutosaveState::Idle) {
            return;
        }

        let weak: Weak<Shared<T>> = Arc::downgrade(&self.inner);
        let started = Autosave::start(
            &self.inner.name,
            self.inner.config.autosave_interval,
            move || autosave_tick(&weak),
        );

        match started {
            Ok(autosave) => *state = AutosaveState::Running(autosave),
            Err(e) => error!("{}: could not start autosave: {}", self.name(), e),
        }
    }
}

impl<T> Shared<T> {
    fn current_rows(&self) -> Arc<Vec<Row<T>>> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&rows)
    }

    fn write_rows(&self) -> RwLockWriteGuard<'_, Arc<Vec<Row<T>>>> {
        self.rows.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_meta(&self) -> MutexGuard<'_, TableMeta> {
        self.meta.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_autosave(&self) -> MutexGuard<'_, AutosaveState> {
        self.autosave.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn autosave_tick<T: Record>(weak: &Weak<Shared<T>>) -> bool {
    //! One autosave tick. Returns `false` once the table is gone.

    let Some(inner) = weak.upgrade() else {
        return false;
    };
    let table = Table { inner };

    if table.is_dirty() {
        debug!("{}: timer save", table.name());
        if let Err(e) = table.save_snapshot() {
            error!("{}: autosave failed: {}", table.name(), e);
        }
    }
    true
}

fn next_id(last_id: i64) -> Result<i64> {
    last_id
        .checked_add(1)
        .ok_or(TableError::IdSpaceExhausted(last_id))
}

fn position_of<T: Record>(rows: &[Row<T>], id: i64) -> Option<usize> {
    //! Linear scan for `id`. Ids at or below zero never exist.

    if id <= 0 {
        return None;
    }
    rows.iter().position(|row| row.id() == id)
}

fn tokenize(text: &str) -> Vec<String> {
    text.trim()
        .to_lowercase()
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

impl<T: Record> Display for Table<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows = self.inner.current_rows();
        write!(f, "{} ({} rows)", self.name(), rows.len())?;

        for row in rows.iter() {
            write!(f, "\n{}", row)?;
        }
        Ok(())
    }
}

impl<T: Record> std::fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.inner.name)
            .field("snapshot_path", &self.snapshot_path())
            .field("total_rows", &self.total_rows())
            .finish()
    }
}
