//! Construction inputs for a [`super::Table`].
//!
//! A table only needs to know where its snapshot lives and how often the
//! background task should flush it. Both can be given explicitly or read
//! from the environment:
//!
//! - `ROWLITE_DATA_DIR` (default `data`): directory holding `<name>.snap`
//! - `ROWLITE_AUTOSAVE_SECS` (default `15`): autosave interval in seconds

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_AUTOSAVE_SECS: u64 = 15;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const SNAPSHOT_EXTENSION: &str = "snap";

const DATA_DIR_VAR: &str = "ROWLITE_DATA_DIR";
const AUTOSAVE_SECS_VAR: &str = "ROWLITE_AUTOSAVE_SECS";

#[derive(Clone, Debug)]
pub struct TableConfig {
    pub snapshot_path: Option<PathBuf>,
    pub autosave_interval: Duration,
}

impl TableConfig {
    pub fn new() -> TableConfig {
        //! A config with no snapshot path. Such a table lives purely in
        //! memory: load and save fail and autosave never starts.

        TableConfig {
            snapshot_path: None,
            autosave_interval: Duration::from_secs(DEFAULT_AUTOSAVE_SECS),
        }
    }

    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> TableConfig {
        self.snapshot_path = Some(path.into());
        self
    }

    pub fn with_autosave_interval(mut self, interval: Duration) -> TableConfig {
        self.autosave_interval = interval;
        self
    }

    pub fn in_dir(dir: impl AsRef<Path>, table_name: &str) -> TableConfig {
        //! Bind the table `table_name` to `<dir>/<table_name>.snap`.

        let file_name = format!("{}.{}", table_name.to_lowercase(), SNAPSHOT_EXTENSION);
        TableConfig::new().with_snapshot_path(dir.as_ref().join(file_name))
    }

    pub fn from_env(table_name: &str) -> TableConfig {
        //! Build the config from `ROWLITE_DATA_DIR` and `ROWLITE_AUTOSAVE_SECS`.
        //!
        //! Unset or unparsable values fall back to the defaults.

        let dir = env::var(DATA_DIR_VAR).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        let secs = env::var(AUTOSAVE_SECS_VAR)
            .ok()
            .and_then(|value| parse_interval_secs(&value))
            .unwrap_or(DEFAULT_AUTOSAVE_SECS);

        TableConfig::in_dir(dir, table_name).with_autosave_interval(Duration::from_secs(secs))
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig::new()
    }
}

fn parse_interval_secs(value: &str) -> Option<u64> {
    match value.trim().parse::<u64>() {
        Ok(0) | Err(_) => {
            log::warn!(
                "ignoring {}={:?}; expected a positive number of seconds",
                AUTOSAVE_SECS_VAR,
                value
            );
            None
        }
        Ok(secs) => Some(secs),
    }
}
