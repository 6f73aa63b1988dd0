use serde::Serialize;
use serde::de::DeserializeOwned;

/// The capability every type stored in a [`super::Table`] must provide.
///
/// A record owns its numeric identifier and names the field values that
/// feed its derived search text. The table never looks inside a record
/// beyond these methods.
///
/// ```
/// use rowlite_engine::persistence::Record;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Default, Serialize, Deserialize)]
/// struct Customer {
///     id: i64,
///     first_name: String,
///     last_name: String,
/// }
///
/// impl Record for Customer {
///     fn id(&self) -> i64 {
///         self.id
///     }
///
///     fn set_id(&mut self, id: i64) {
///         self.id = id;
///     }
///
///     fn search_fields(&self) -> Vec<String> {
///         vec![self.first_name.clone(), self.last_name.clone()]
///     }
/// }
///
/// let customer = Customer { id: 0, first_name: "Ada".into(), last_name: "LOVELACE".into() };
/// assert_eq!(customer.search_text(), "ada lovelace");
/// ```
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Current identifier, `0` while unassigned.
    fn id(&self) -> i64;

    /// Only called by the table when the record is inserted.
    fn set_id(&mut self, id: i64);

    /// Field values, in order, that make up the search text.
    fn search_fields(&self) -> Vec<String>;

    fn search_text(&self) -> String {
        //! Lowercase, single-space join of [`Record::search_fields`].

        derive_search_text(self.search_fields())
    }
}

pub(crate) fn derive_search_text<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();

    for field in fields {
        let field = field.as_ref().trim();
        if field.is_empty() {
            continue;
        }
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&field.to_lowercase());
    }

    text
}
