//! Persistence for a single record type is made of the following components
//! - Record (the caller's type, carries its id and names its searchable fields)
//! - Row (a stored record plus its derived search text)
//! - Table (many Rows, copy-on-write reads, serialized writes)
//! - Snapshot (whole-table bincode file and JSON bulk import)
//! - Autosave (a background flush while the table is dirty)
//!

//  All modules of this lib
mod autosave;
mod config;
mod error;
mod record;
mod row;
mod snapshot;
mod table;

//  External API
pub use config::{DEFAULT_AUTOSAVE_SECS, DEFAULT_DATA_DIR, TableConfig};
pub use error::{Result, TableError};
pub use record::Record;
pub use table::Table;
