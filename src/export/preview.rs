//! Console preview: the first rows as an aligned text table with a leading index column.

use std::fmt::Write as _;

use crate::generator::{Record, COLUMNS};

pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Render up to `rows` records. Text columns are left-aligned, numeric columns right-aligned.
pub fn preview_table(records: &[Record], rows: usize) -> String {
    let shown: Vec<[String; 11]> = records.iter().take(rows).map(Record::cells).collect();

    let index_width = shown.len().saturating_sub(1).to_string().len();
    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.len()).collect();
    for cells in &shown {
        for (width, cell) in widths.iter_mut().zip(cells.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = write!(out, "{:index_width$}", "");
    for (column, width) in COLUMNS.iter().zip(&widths) {
        let _ = write!(out, "  {column:>width$}");
    }
    out.push('\n');

    for (index, cells) in shown.iter().enumerate() {
        let _ = write!(out, "{index:<index_width$}");
        for (position, (cell, width)) in cells.iter().zip(&widths).enumerate() {
            // First five columns are hierarchy labels.
            if position < 5 {
                let _ = write!(out, "  {cell:<width$}");
            } else {
                let _ = write!(out, "  {cell:>width$}");
            }
        }
        out.push('\n');
    }

    if records.len() > shown.len() {
        let _ = writeln!(out, "... {} more row(s)", records.len() - shown.len());
    }
    out
}
