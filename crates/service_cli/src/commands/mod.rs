//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod bounds;
pub mod compare;
pub mod straddle;

use clap::ValueEnum;
use serde::Serialize;

use crate::Result;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Aligned columns
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Prints `value` as pretty JSON.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints a header line and rows as right-aligned fixed-width columns.
pub(crate) fn print_table(header: &[&str], rows: &[Vec<String>]) {
    let head = render(header.iter().copied());
    println!("{head}");
    println!("{}", "-".repeat(head.len()));
    for row in rows {
        println!("{}", render(row.iter().map(String::as_str)));
    }
}

fn render<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    const WIDTH: usize = 14;
    cells
        .map(|c| format!("{c:>WIDTH$}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Six decimal places; NaN and infinities print as-is.
pub(crate) fn fmt_value(x: f64) -> String {
    format!("{x:.6}")
}
