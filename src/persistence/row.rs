use std::fmt::Display;

use super::record::Record;

/// A stored record together with its derived search text.
///
/// The search text is table-side state: it is never serialized and is
/// rebuilt whenever the record enters the table, whether through an
/// insert, an update or a load.
#[derive(Clone, Debug)]
pub(crate) struct Row<T> {
    pub(crate) record: T,
    search_text: String,
}

impl<T: Record> Row<T> {
    pub(crate) fn new(record: T) -> Row<T> {
        let mut row = Row {
            record,
            search_text: String::new(),
        };
        row.regenerate_search_text();
        row
    }

    pub(crate) fn id(&self) -> i64 {
        self.record.id()
    }

    pub(crate) fn regenerate_search_text(&mut self) {
        self.search_text = self.record.search_text();
    }

    pub(crate) fn matches_text(&self, needle: &str) -> bool {
        self.search_text.contains(needle)
    }

    pub(crate) fn matches_all(&self, tokens: &[String]) -> bool {
        //! Conjunctive match; an empty token list matches every row.

        tokens.iter().all(|token| self.matches_text(token))
    }
}

impl<T: Record> Display for Row<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {}", self.id(), self.search_text)
    }
}
