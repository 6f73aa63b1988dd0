//! An embeddable, in-process row store.
//!
//! Every [`persistence::Table`] keeps one record type entirely in memory,
//! snapshots it to disk on a timer and answers predicate and free-text
//! queries without a separate database server.

pub mod persistence;
