//! In-memory view of a template's table.

use serde::{Deserialize, Serialize};

/// A dense table: column headers plus rows of cell contents.
///
/// Row `i` corresponds to `row_order = i` and cell `j` of a row to
/// `column_order = j`. Rows loaded from the store always have exactly
/// `headers.len()` cells; cells missing from the store are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableGrid {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl TableGrid {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the content at `(row, column)`, if present.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Returns true if the table has neither columns nor rows.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }
}
