use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TableError>;

/// Everything that can go wrong while loading, saving or mutating a
/// [`super::Table`].
///
/// Lookups never fail: a missing id is reported through an [`Option`]
/// and a delete of a missing id is a no-op.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("snapshot path is not set for this table")]
    SnapshotPathUnset,

    #[error("failed to {context} '{}': {source}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] bincode::Error),

    #[error("failed to parse bulk import: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate id {0} in loaded data")]
    DuplicateId(i64),

    #[error("no id left after {0}")]
    IdSpaceExhausted(i64),
}

impl TableError {
    pub(crate) fn io(context: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        TableError::Io {
            context,
            path: path.into(),
            source,
        }
    }
}
