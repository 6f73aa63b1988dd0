//! The module contains function for displaying the demo banner.

use colored::*;

use crate::cli::colors::ROWLITE_TEAL;

pub fn splash_screen() {
    println!(
        r"
    {}

    {}
    Version {}
    Authored by {}
        ",
        "r o w l i t e".color(ROWLITE_TEAL).bold(),
        env!("CARGO_PKG_DESCRIPTION").color(ROWLITE_TEAL),
        env!("CARGO_PKG_VERSION").color(ROWLITE_TEAL).italic(),
        env!("CARGO_PKG_AUTHORS").color(ROWLITE_TEAL).italic(),
    )
}
