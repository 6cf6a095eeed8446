//! Generic result-table projection.
//!
//! All three result surfaces (pipeline diagnostics, preset queries,
//! NL->SPARQL results) render through this one projection so cell
//! semantics never drift between screens.

use kgdash_api::Record;
use serde_json::Value;

/// Union of record keys in first-seen order, without duplicates.
///
/// Recomputed whenever the result set changes; never persisted.
pub fn column_set(rows: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

/// One rendered cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Null or missing value; renders as an empty string.
    Empty,
    /// A string beginning with `http`; renders as an actionable hyperlink
    /// opened outside the panel (terminal renderers use OSC 8).
    Link(String),
    /// Any other scalar, in its string form.
    Text(String),
}

impl Cell {
    /// The cell's display text (the URL itself for links).
    pub fn text(&self) -> &str {
        match self {
            Cell::Empty => "",
            Cell::Link(url) => url,
            Cell::Text(s) => s,
        }
    }
}

/// Normalize one value into a cell.
pub fn project_cell(value: Option<&Value>) -> Cell {
    match value {
        None | Some(Value::Null) => Cell::Empty,
        Some(Value::String(s)) if s.starts_with("http") => Cell::Link(s.clone()),
        Some(Value::String(s)) => Cell::Text(s.clone()),
        // Numbers, booleans, and (off-contract) nested values fall back to
        // their compact JSON form.
        Some(other) => Cell::Text(other.to_string()),
    }
}

/// Row-major view model of one result set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Project a result set into its renderable form.
pub fn project_table(records: &[Record]) -> TableView {
    let columns = column_set(records);
    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|col| project_cell(record.get(col)))
                .collect()
        })
        .collect();
    TableView { columns, rows }
}
