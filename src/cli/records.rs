//! The record types the demo wires into tables.
//!
//! Field names on disk follow the seed files: PascalCase, with a couple of
//! explicitly renamed fields on [`Doc`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rowlite_engine::persistence::Record;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Table1 {
    #[serde(rename = "ID")]
    pub id: i64,
    pub customer_name: String,
    pub item_count: i32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    #[serde(rename = "ID")]
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Doc {
    #[serde(rename = "ID")]
    pub id: i64,
    pub from: String,
    pub to: String,
    pub subject: String,
    #[serde(rename = "Type")]
    pub doc_type: String,
    #[serde(rename = "isPrivate")]
    pub is_private: bool,
    pub org_letter_number: String,
    pub letter_date: DateTime<Utc>,
    pub owner: String,
    pub status: String,
    pub created: DateTime<Utc>,
    #[serde(rename = "docid")]
    pub docid: String,
}

impl Record for Table1 {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.customer_name.clone(),
            self.item_count.to_string(),
        ]
    }
}

impl Record for Customer {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn search_fields(&self) -> Vec<String> {
        vec![self.firstname.clone(), self.lastname.clone()]
    }
}

impl Record for Doc {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.from.clone(),
            self.to.clone(),
            self.subject.clone(),
            self.doc_type.clone(),
            self.org_letter_number.clone(),
            self.letter_date.format("%Y-%m-%d").to_string(),
            self.owner.clone(),
            self.status.clone(),
            self.docid.clone(),
        ]
    }
}
