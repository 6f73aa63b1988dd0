//! To maintain a theme of colors, I will add colors here as constants so
//! the demo output does not look bad at any point.
//!
//! - ROWLITE_TEAL: Main Color
//! - ROWLITE_AMBER: Warnings and misses

use colored::Color;

pub(crate) const ROWLITE_TEAL: Color = Color::TrueColor {
    r: 38,
    g: 166,
    b: 154,
};

pub(crate) const ROWLITE_AMBER: Color = Color::TrueColor {
    r: 255,
    g: 179,
    b: 0,
};
