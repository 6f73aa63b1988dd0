//! The demonstration program: three lite tables loaded from snapshot (or
//! seeded from JSON on the first run), a handful of sample queries, and a
//! final save on the way out.

use std::path::{Path, PathBuf};

use log::error;

use rowlite_engine::persistence::{Record, Table, TableConfig};

use crate::cli::{
    messages::{highlight_argument, system_message, warning_message},
    parsers::CliParser,
    records::{Customer, Doc, Table1},
};

mod colors;
mod messages;
pub mod parsers;
mod records;
mod seed;
mod splash_screen;

const SEED_ROWS: usize = 99;
const DOC_SEARCH: &str = "10017372";

pub struct Tables {
    pub table1: Table<Table1>,
    pub customers: Table<Customer>,
    pub docs: Table<Doc>,
}

impl Tables {
    fn close(&self) -> rowlite_engine::persistence::Result<()> {
        //! Flush every table, even when an earlier one fails.

        let results = [
            self.table1.close(),
            self.customers.close(),
            self.docs.close(),
        ];
        results.into_iter().collect()
    }
}

pub fn run(args: CliParser) -> Result<(), String> {
    if !args.quiet {
        splash_screen::splash_screen();
    }

    let tables = open_tables(&args)?;

    let tomas_with_few_items = |row: &Table1| row.customer_name.contains("Tomas") && row.item_count < 5;

    let rows = tables.table1.query(tomas_with_few_items);
    println!("{}", system_message("Table1", format!("query rows count = {}", rows.len())));

    let rows = tables.table1.query_paged(10, 5, tomas_with_few_items);
    println!(
        "{}",
        system_message("Table1", format!("query paged rows count = {}", rows.len()))
    );

    let rows = tables.table1.search(&args.search);
    println!(
        "{}",
        system_message(
            "Table1",
            format!(
                "search for '{}' rows count = {}",
                highlight_argument(&args.search),
                rows.len()
            )
        )
    );
    println!(
        "{}",
        system_message("Table1", format!("rows = {}", tables.table1.total_rows()))
    );

    let id = tables
        .table1
        .add_update(Table1 {
            customer_name: "aaa".to_string(),
            item_count: 42,
            ..Default::default()
        })
        .map_err(|e| format!("cannot insert into Table1: {}", e))?;
    println!(
        "{}",
        system_message("Table1", format!("inserted id {}", highlight_argument(&id.to_string())))
    );

    report_find(&tables.table1, 99_999);
    report_find(&tables.table1, -1);
    report_find(&tables.customers, 1);

    let docs = tables.docs.search(DOC_SEARCH);
    println!(
        "{}",
        system_message(
            "Docs",
            format!("search for '{}' rows count = {}", highlight_argument(DOC_SEARCH), docs.len())
        )
    );
    if let Some(doc) = docs.first() {
        println!("{}", system_message("Docs", format!("{:?}", doc)));
    }

    tables.close().map_err(|e| {
        error!("failed to save tables on shutdown: {}", e);
        e.to_string()
    })
}

fn open_tables(args: &CliParser) -> Result<Tables, String> {
    //! Load every table, seeding first-run JSON files when needed. Any load
    //! failure is fatal to the demo.

    let table1 = open_table::<Table1>(args, "Table1", || seed::table1_rows(SEED_ROWS))?;
    let customers = open_table::<Customer>(args, "Customers", || seed::customer_rows(SEED_ROWS))?;
    let docs = open_table::<Doc>(args, "Docs", || seed::doc_rows(SEED_ROWS))?;

    Ok(Tables {
        table1,
        customers,
        docs,
    })
}

fn open_table<R: Record>(
    args: &CliParser,
    name: &str,
    generate: impl FnOnce() -> Vec<R>,
) -> Result<Table<R>, String> {
    let config = table_config(args, name);
    let seed_path = args.seed_dir.join(format!("{}.json", name.to_lowercase()));

    seed::ensure_seed_file(&seed_path, generate)
        .map_err(|e| format!("cannot write seed {}: {}", seed_path.display(), e))?;

    let table = Table::new(name, config);
    let loaded = table.load_or_import(&seed_path).map_err(|e| {
        error!("{}: {}", name, e);
        format!("cannot load table {}: {}", name, e)
    })?;

    println!(
        "{}",
        system_message(
            name,
            format!(
                "{} item(s) from {}",
                loaded,
                highlight_argument(&source_of(&table, &seed_path).display().to_string())
            )
        )
    );
    Ok(table)
}

fn table_config(args: &CliParser, name: &str) -> TableConfig {
    let config = TableConfig::from_env(name);
    match &args.data_dir {
        Some(dir) => TableConfig::in_dir(dir, name).with_autosave_interval(config.autosave_interval),
        None => config,
    }
}

fn source_of<R: Record>(table: &Table<R>, seed_path: &Path) -> PathBuf {
    //! Whichever file the table was hydrated from.

    match table.snapshot_path() {
        Some(path) if !table.is_dirty() => path.to_path_buf(),
        _ => seed_path.to_path_buf(),
    }
}

fn report_find<R: Record + std::fmt::Debug>(table: &Table<R>, id: i64) {
    match table.find_by_id(id) {
        Some(record) => println!(
            "{}",
            system_message(table.name(), format!("id {} = {:?}", id, record))
        ),
        None => println!(
            "{}",
            warning_message(table.name(), format!("id {} not found", id))
        ),
    }
}
