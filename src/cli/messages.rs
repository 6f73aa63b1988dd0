//! General message formatting functions for prettifying the demo output.
//! Includes basic utility functions such as:
//!
//! - Highlight Text (make the text teal but not bold)
//! - System message formatting functions that produce the same
//! format messages.

use colored::Colorize;

use crate::cli::colors::{ROWLITE_AMBER, ROWLITE_TEAL};

pub fn highlight_argument(argument: &str) -> String {
    //! Highlight a piece of text in the theme color to make it obvious.

    format!("{}", argument.color(ROWLITE_TEAL))
}

pub fn system_message(source_name: &str, message: String) -> String {
    //! Format a message the way every line of the demo is printed.
    //!
    //! Takes in a source name (like a table name) and the message as a
    //! formatted text; output of [`format!`].

    let source_formatted = format!("{:9}", source_name.color(ROWLITE_TEAL).bold());
    format!("[{}] {}", source_formatted, message)
}

pub fn warning_message(source_name: &str, message: String) -> String {
    let source_formatted = format!("{:9}", source_name.color(ROWLITE_AMBER).bold());
    format!("[{}] {}", source_formatted, message)
}
