//! Seed files for the first run.
//!
//! When a table has neither a snapshot nor a seed file, a small synthetic
//! data set is written so the demo always has something to query.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Duration};
use log::info;
use serde::Serialize;

use crate::cli::records::{Customer, Doc, Table1};

const FIRST_NAMES: [&str; 8] = [
    "Tomas", "Alice", "Bonega", "Jansen", "Malaika", "Jimmy", "Rango", "Danish",
];
const LAST_NAMES: [&str; 6] = ["Hansen", "Lorem", "Jeffrey", "Okafor", "Silva", "Novak"];
const STATUSES: [&str; 3] = ["draft", "sent", "archived"];

pub fn ensure_seed_file<R, F>(path: &Path, generate: F) -> std::io::Result<()>
where
    R: Serialize,
    F: FnOnce() -> Vec<R>,
{
    //! Write `generate()` as a JSON array to `path` unless the file exists.

    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let records = generate();
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &records).map_err(std::io::Error::other)?;

    info!("generated seed {} with {} item(s)", path.display(), records.len());
    Ok(())
}

pub fn table1_rows(count: usize) -> Vec<Table1> {
    (1..=count)
        .map(|i| Table1 {
            id: i as i64,
            customer_name: format!(
                "{} {}",
                FIRST_NAMES[i % FIRST_NAMES.len()],
                LAST_NAMES[i % LAST_NAMES.len()]
            ),
            item_count: (i % 10) as i32,
        })
        .collect()
}

pub fn customer_rows(count: usize) -> Vec<Customer> {
    (1..=count)
        .map(|i| Customer {
            id: i as i64,
            firstname: FIRST_NAMES[(i * 3) % FIRST_NAMES.len()].to_string(),
            lastname: LAST_NAMES[(i * 5) % LAST_NAMES.len()].to_string(),
        })
        .collect()
}

pub fn doc_rows(count: usize) -> Vec<Doc> {
    // 2022-01-03 09:00:00 UTC
    let epoch = DateTime::from_timestamp(1_641_200_400, 0).unwrap_or_default();

    (1..=count)
        .map(|i| {
            let letter_date = epoch + Duration::days(i as i64);
            Doc {
                id: i as i64,
                from: FIRST_NAMES[i % FIRST_NAMES.len()].to_string(),
                to: FIRST_NAMES[(i + 3) % FIRST_NAMES.len()].to_string(),
                subject: format!("Letter {} regarding order {}", i, 1000 + i),
                doc_type: if i % 2 == 0 { "incoming" } else { "outgoing" }.to_string(),
                is_private: i % 7 == 0,
                org_letter_number: format!("ORG-{:05}", i),
                letter_date,
                owner: LAST_NAMES[i % LAST_NAMES.len()].to_string(),
                status: STATUSES[i % STATUSES.len()].to_string(),
                created: letter_date + Duration::hours(2),
                docid: format!("{}", 10_017_360 + i),
            }
        })
        .collect()
}
