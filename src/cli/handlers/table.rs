//! Table command handlers.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use super::Session;
use crate::cli::TableCommand;
use crate::domain::TableGrid;

pub fn handle_table(command: &TableCommand, session: &mut Session) -> Result<()> {
    match command {
        TableCommand::AddRow { node } => {
            let template = session.template_at(node)?;
            let order = session.store_mut().add_row(template.id)?;
            println!("Added row {} to {}", order, node);
        }
        TableCommand::AddColumn { node, header } => {
            let template = session.template_at(node)?;
            let order = session.store_mut().add_column(template.id, header)?;
            println!("Added column {} ({}) to {}", order, header.trim(), node);
        }
        TableCommand::Set {
            node,
            row,
            column,
            content,
        } => {
            let template = session.template_at(node)?;
            session
                .store_mut()
                .set_cell(template.id, *row, *column, content)
                .with_context(|| format!("failed to set cell ({}, {}) of {}", row, column, node))?;
            println!("Set cell ({}, {}) of {}", row, column, node);
        }
        TableCommand::RemoveRow { node, row } => {
            let template = session.template_at(node)?;
            session
                .store_mut()
                .delete_row(template.id, *row)
                .with_context(|| format!("failed to remove row {} of {}", row, node))?;
            println!("Removed row {} from {}", row, node);
        }
        TableCommand::RemoveColumn { node, column } => {
            let template = session.template_at(node)?;
            session
                .store_mut()
                .delete_column(template.id, *column)
                .with_context(|| format!("failed to remove column {} of {}", column, node))?;
            println!("Removed column {} from {}", column, node);
        }
        TableCommand::Header {
            node,
            column,
            header,
        } => {
            let template = session.template_at(node)?;
            session
                .store_mut()
                .rename_column(template.id, *column, header)
                .with_context(|| format!("failed to rename column {} of {}", column, node))?;
            println!("Renamed column {} of {} to {}", column, node, header.trim());
        }
        TableCommand::ReorderRows { node, order } => {
            let template = session.template_at(node)?;
            session
                .store_mut()
                .reorder_rows(template.id, order)
                .with_context(|| format!("failed to reorder rows of {}", node))?;
            println!("Reordered {} rows of {}", order.len(), node);
        }
        TableCommand::ReorderColumns { node, order } => {
            let template = session.template_at(node)?;
            session
                .store_mut()
                .reorder_columns(template.id, order)
                .with_context(|| format!("failed to reorder columns of {}", node))?;
            println!("Reordered {} columns of {}", order.len(), node);
        }
        TableCommand::Import { node, file } => {
            let template = session.template_at(node)?;
            let grid = read_grid(file)?;
            session
                .store_mut()
                .save_grid(template.id, &grid)
                .with_context(|| format!("failed to save table of {}", node))?;
            println!(
                "Imported {} columns and {} rows into {}",
                grid.column_count(),
                grid.row_count(),
                node
            );
        }
        TableCommand::Export { node, output } => {
            let template = session.template_at(node)?;
            let grid = session.store().load_table(template.id)?;
            let json = serde_json::to_string_pretty(&grid)?;
            match output {
                Some(path) => {
                    std::fs::write(path, json + "\n")
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Exported {} to {}", node, path.display());
                }
                None => println!("{}", json),
            }
        }
    }
    Ok(())
}

/// Reads a grid from a JSON file, or from stdin when the path is `-`.
fn read_grid(path: &Path) -> Result<TableGrid> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read table from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    parse_grid(&contents)
}

pub(crate) fn parse_grid(contents: &str) -> Result<TableGrid> {
    serde_json::from_str(contents).context("table JSON must look like {\"headers\": [..], \"rows\": [[..]]}")
}
