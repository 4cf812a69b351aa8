//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{NodeKind, TableGrid, Template};
use crate::tree::TreeNode;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A project in listing output.
#[derive(Debug, Serialize)]
pub struct ProjectListing {
    pub id: i64,
    pub name: String,
}

/// One line of the numbered tree.
#[derive(Debug, Serialize)]
pub struct TreeListing {
    pub numeration: String,
    pub kind: NodeKind,
    pub id: i64,
    pub name: String,
    pub depth: u32,
}

impl From<&TreeNode> for TreeListing {
    fn from(node: &TreeNode) -> Self {
        Self {
            numeration: node.numeration().to_string(),
            kind: node.kind(),
            id: node.node().raw_id(),
            name: node.name().to_string(),
            depth: node.depth(),
        }
    }
}

/// A template with its table.
#[derive(Debug, Serialize)]
pub struct TemplateView<'a> {
    pub numeration: String,
    pub template: &'a Template,
    pub table: &'a TableGrid,
}

/// Formats a tree node as one indented line.
pub fn tree_line(node: &TreeNode) -> String {
    let indent = "  ".repeat(node.depth() as usize);
    match node.kind() {
        NodeKind::Category => format!("{}{} {}", indent, node.numeration(), node.name()),
        NodeKind::Template => format!("{}{} {} [template]", indent, node.numeration(), node.name()),
    }
}

/// Renders a grid as aligned text columns with a header rule.
///
/// Returns an empty string for a table without columns.
pub fn render_grid(grid: &TableGrid) -> String {
    let columns = grid.column_count();
    if columns == 0 {
        return String::new();
    }

    let mut widths: Vec<usize> = grid.headers.iter().map(|h| h.chars().count()).collect();
    for row in &grid.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = Vec::with_capacity(grid.row_count() + 2);
    out.push(pad_line(&widths, grid.headers.iter().map(String::as_str)));
    out.push(
        widths
            .iter()
            .map(|&w| "-".repeat(w.max(1)))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &grid.rows {
        out.push(pad_line(&widths, row.iter().map(String::as_str)));
    }
    out.join("\n")
}

fn pad_line<'a>(widths: &[usize], mut cells: impl Iterator<Item = &'a str>) -> String {
    let padded: Vec<String> = widths
        .iter()
        .map(|&width| format!("{:<width$}", cells.next().unwrap_or(""), width = width))
        .collect();
    padded.join("  ").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn render_grid_aligns_columns() {
        let grid = TableGrid::new(
            strings(&["Name", "Type"]),
            vec![strings(&["id", "integer"]), strings(&["display_name", ""])],
        );

        assert_eq!(
            render_grid(&grid),
            "Name          Type\n\
             ------------  -------\n\
             id            integer\n\
             display_name"
        );
    }

    #[test]
    fn render_grid_without_columns_is_empty() {
        assert_eq!(render_grid(&TableGrid::default()), "");
    }

    #[test]
    fn render_grid_pads_short_rows() {
        let grid = TableGrid::new(strings(&["A", "B"]), vec![strings(&["x"])]);
        assert_eq!(render_grid(&grid), "A  B\n-  -\nx");
    }
}
