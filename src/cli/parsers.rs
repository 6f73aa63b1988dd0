//! The place where the command line arguments are defined.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "rowlite")]
#[command(version, about = "Load a few lite tables, query them and save on exit", long_about = None)]
pub struct CliParser {
    /// Directory holding the table snapshots. Falls back to ROWLITE_DATA_DIR.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory holding the JSON seed files used before a snapshot exists.
    #[arg(long, default_value = "seeds")]
    pub seed_dir: PathBuf,

    /// Free text searched in the Table1 table.
    #[arg(long, default_value = "tomas")]
    pub search: String,

    /// Skip the banner.
    #[arg(long)]
    pub quiet: bool,
}
