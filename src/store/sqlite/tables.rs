//! Table grid persistence: columns, rows, and cells of a template.

use std::collections::HashMap;

use rusqlite::params;

use super::SqliteStore;
use crate::domain::{Name, TableGrid, TemplateId};
use crate::store::{StoreError, StoreResult, Transaction};

/// Rows and columns are stored the same way; this picks the table and the
/// order column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Row,
    Column,
}

impl Axis {
    fn table(self) -> &'static str {
        match self {
            Axis::Row => "table_row",
            Axis::Column => "table_column",
        }
    }

    fn order_column(self) -> &'static str {
        match self {
            Axis::Row => "row_order",
            Axis::Column => "column_order",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Axis::Row => "row",
            Axis::Column => "column",
        }
    }
}

impl SqliteStore {
    // ===========================================
    // Load / Save
    // ===========================================

    /// Loads a template's table as a dense grid.
    ///
    /// Rows and headers are ordered by their stored order; cells that were
    /// never written come back as empty strings.
    pub fn load_table(&self, template: TemplateId) -> StoreResult<TableGrid> {
        self.require_template(template)?;

        let mut stmt = self.conn.prepare(
            "SELECT column_order, header FROM table_column
             WHERE template_id = ?1 ORDER BY column_order",
        )?;
        let columns: Vec<(i64, String)> = stmt
            .query_map([template], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<_>>()?;

        let mut stmt = self.conn.prepare(
            "SELECT row_order FROM table_row WHERE template_id = ?1 ORDER BY row_order",
        )?;
        let row_orders: Vec<i64> = stmt
            .query_map([template], |row| row.get(0))?
            .collect::<rusqlite::Result<_>>()?;

        let column_index: HashMap<i64, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, (order, _))| (*order, i))
            .collect();
        let row_index: HashMap<i64, usize> = row_orders
            .iter()
            .enumerate()
            .map(|(i, order)| (*order, i))
            .collect();

        let mut rows = vec![vec![String::new(); columns.len()]; row_orders.len()];

        let mut stmt = self.conn.prepare(
            "SELECT row_order, column_order, content FROM table_cell
             WHERE template_id = ?1 ORDER BY row_order, column_order",
        )?;
        let cells = stmt.query_map([template], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;
        for cell in cells {
            let (row_order, column_order, content) = cell?;
            if let (Some(&r), Some(&c)) = (row_index.get(&row_order), column_index.get(&column_order))
            {
                rows[r][c] = content;
            }
        }

        let headers = columns.into_iter().map(|(_, header)| header).collect();
        Ok(TableGrid::new(headers, rows))
    }

    /// Replaces the parts of a template's table that are given.
    ///
    /// - `headers`: columns become orders `0..headers.len()` with these
    ///   headers. Cells of dropped columns go with them; cells of surviving
    ///   columns are kept unless `rows` is also given.
    /// - `rows`: every previous row and cell is removed; rows become orders
    ///   `0..rows.len()` and every given cell is written.
    ///
    /// Runs in one transaction.
    ///
    /// # Errors
    ///
    /// `Validation` if a header is not a valid name or a row has more cells
    /// than there are columns. Nothing is written in either case.
    pub fn save_table(
        &mut self,
        template: TemplateId,
        headers: Option<&[String]>,
        rows: Option<&[Vec<String>]>,
    ) -> StoreResult<()> {
        let names = headers
            .map(|headers| {
                headers
                    .iter()
                    .map(|header| Name::new(header))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        self.require_template(template)?;

        let column_count = match &names {
            Some(names) => names.len(),
            None => self.conn.query_row(
                "SELECT COUNT(*) FROM table_column WHERE template_id = ?1",
                [template],
                |row| row.get(0),
            )?,
        };

        if let Some(rows) = rows
            && let Some((index, row)) = rows
                .iter()
                .enumerate()
                .find(|(_, row)| row.len() > column_count)
        {
            return Err(StoreError::Validation(format!(
                "row {} has {} cells but the table has {} columns",
                index,
                row.len(),
                column_count
            )));
        }

        let tx = self.transaction()?;

        if let Some(names) = &names {
            tx.execute(
                "DELETE FROM table_column WHERE template_id = ?1 AND column_order >= ?2",
                params![template, names.len()],
            )?;
            for (order, header) in names.iter().enumerate() {
                tx.execute(
                    "INSERT INTO table_column (template_id, column_order, header)
                     VALUES (?1, ?2, ?3)
                     ON CONFLICT (template_id, column_order) DO UPDATE SET header = excluded.header",
                    params![template, order, header.as_str()],
                )?;
            }
        }

        if let Some(rows) = rows {
            tx.execute("DELETE FROM table_cell WHERE template_id = ?1", [template])?;
            tx.execute("DELETE FROM table_row WHERE template_id = ?1", [template])?;

            for (row_order, row) in rows.iter().enumerate() {
                tx.execute(
                    "INSERT INTO table_row (template_id, row_order) VALUES (?1, ?2)",
                    params![template, row_order],
                )?;
                for (column_order, content) in row.iter().enumerate() {
                    tx.execute(
                        "INSERT INTO table_cell (template_id, row_order, column_order, content)
                         VALUES (?1, ?2, ?3, ?4)",
                        params![template, row_order, column_order, content],
                    )?;
                }
            }
        }

        tx.commit()?;
        tracing::debug!(
            template = %template,
            columns = ?headers.map(<[String]>::len),
            rows = ?rows.map(<[Vec<String>]>::len),
            "saved table"
        );
        Ok(())
    }

    /// Replaces both the columns and the rows of a template's table.
    pub fn save_grid(&mut self, template: TemplateId, grid: &TableGrid) -> StoreResult<()> {
        self.save_table(template, Some(&grid.headers), Some(&grid.rows))
    }

    // ===========================================
    // Rows and Columns
    // ===========================================

    /// Appends an empty row and returns its order.
    pub fn add_row(&mut self, template: TemplateId) -> StoreResult<usize> {
        self.require_template(template)?;
        let order = self.next_order(template, Axis::Row)?;
        self.conn.execute(
            "INSERT INTO table_row (template_id, row_order) VALUES (?1, ?2)",
            params![template, order],
        )?;
        Ok(order)
    }

    /// Appends a column with the given header and returns its order.
    pub fn add_column(&mut self, template: TemplateId, header: &str) -> StoreResult<usize> {
        let header = Name::new(header)?;
        self.require_template(template)?;
        let order = self.next_order(template, Axis::Column)?;
        self.conn.execute(
            "INSERT INTO table_column (template_id, column_order, header) VALUES (?1, ?2, ?3)",
            params![template, order, header.as_str()],
        )?;
        Ok(order)
    }

    /// Changes the header of an existing column.
    pub fn rename_column(
        &mut self,
        template: TemplateId,
        order: usize,
        header: &str,
    ) -> StoreResult<()> {
        let header = Name::new(header)?;
        let rows = self.conn.execute(
            "UPDATE table_column SET header = ?1 WHERE template_id = ?2 AND column_order = ?3",
            params![header.as_str(), template, order],
        )?;
        if rows == 0 {
            return Err(StoreError::not_found(
                "column",
                format!("{} of template {}", order, template),
            ));
        }
        Ok(())
    }

    /// Writes one cell, replacing any previous content.
    ///
    /// # Errors
    ///
    /// `NotFound` if the template, the row, or the column does not exist.
    pub fn set_cell(
        &mut self,
        template: TemplateId,
        row: usize,
        column: usize,
        content: &str,
    ) -> StoreResult<()> {
        self.require_template(template)?;
        for (axis, order) in [(Axis::Row, row), (Axis::Column, column)] {
            if !self.has_line(template, axis, order)? {
                return Err(StoreError::not_found(
                    axis.label(),
                    format!("{} of template {}", order, template),
                ));
            }
        }

        self.conn.execute(
            "INSERT INTO table_cell (template_id, row_order, column_order, content)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (template_id, row_order, column_order)
             DO UPDATE SET content = excluded.content",
            params![template, row, column, content],
        )?;
        tracing::debug!(template = %template, row, column, "set cell");
        Ok(())
    }

    /// Deletes a row with its cells; later rows move up by one.
    pub fn delete_row(&mut self, template: TemplateId, order: usize) -> StoreResult<()> {
        self.delete_along(template, Axis::Row, order)
    }

    /// Deletes a column with its cells; later columns move left by one.
    pub fn delete_column(&mut self, template: TemplateId, order: usize) -> StoreResult<()> {
        self.delete_along(template, Axis::Column, order)
    }

    /// Rearranges rows: `order[i]` is the current order of the row that
    /// should end up at order `i`. Cells move with their rows.
    pub fn reorder_rows(&mut self, template: TemplateId, order: &[usize]) -> StoreResult<()> {
        self.reorder_along(template, Axis::Row, order)
    }

    /// Rearranges columns: `order[i]` is the current order of the column
    /// that should end up at order `i`. Cells move with their columns.
    pub fn reorder_columns(&mut self, template: TemplateId, order: &[usize]) -> StoreResult<()> {
        self.reorder_along(template, Axis::Column, order)
    }

    // ===========================================
    // Helpers
    // ===========================================

    fn require_template(&self, template: TemplateId) -> StoreResult<()> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM table_template WHERE template_id = ?1)",
            [template],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(StoreError::not_found("template", template));
        }
        Ok(())
    }

    fn next_order(&self, template: TemplateId, axis: Axis) -> StoreResult<usize> {
        Ok(self.conn.query_row(
            &format!(
                "SELECT COALESCE(MAX({col}) + 1, 0) FROM {table} WHERE template_id = ?1",
                col = axis.order_column(),
                table = axis.table()
            ),
            [template],
            |row| row.get(0),
        )?)
    }

    fn has_line(&self, template: TemplateId, axis: Axis, order: usize) -> StoreResult<bool> {
        Ok(self.conn.query_row(
            &format!(
                "SELECT EXISTS(SELECT 1 FROM {table} WHERE template_id = ?1 AND {col} = ?2)",
                table = axis.table(),
                col = axis.order_column()
            ),
            params![template, order],
            |row| row.get(0),
        )?)
    }

    fn orders(&self, template: TemplateId, axis: Axis) -> StoreResult<Vec<usize>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {col} FROM {table} WHERE template_id = ?1 ORDER BY {col}",
            col = axis.order_column(),
            table = axis.table()
        ))?;
        let orders = stmt
            .query_map([template], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<usize>>>()?;
        Ok(orders)
    }

    fn delete_along(&mut self, template: TemplateId, axis: Axis, order: usize) -> StoreResult<()> {
        let col = axis.order_column();
        let table = axis.table();

        let tx = self.transaction()?;
        tx.execute(
            &format!("DELETE FROM table_cell WHERE template_id = ?1 AND {col} = ?2"),
            params![template, order],
        )?;
        let rows = tx.execute(
            &format!("DELETE FROM {table} WHERE template_id = ?1 AND {col} = ?2"),
            params![template, order],
        )?;
        if rows == 0 {
            return Err(StoreError::not_found(
                axis.label(),
                format!("{} of template {}", order, template),
            ));
        }

        // Negate first so the shifted orders never collide with rows still
        // waiting to move.
        tx.execute(
            &format!("UPDATE {table} SET {col} = -{col} WHERE template_id = ?1 AND {col} > ?2"),
            params![template, order],
        )?;
        tx.execute(
            &format!("UPDATE {table} SET {col} = -{col} - 1 WHERE template_id = ?1 AND {col} < 0"),
            [template],
        )?;
        tx.commit()?;

        tracing::debug!(template = %template, axis = axis.label(), order, "deleted table line");
        Ok(())
    }

    fn reorder_along(&mut self, template: TemplateId, axis: Axis, order: &[usize]) -> StoreResult<()> {
        let mut requested = order.to_vec();
        requested.sort_unstable();
        let current = self.orders(template, axis)?;
        if requested != current {
            return Err(StoreError::Validation(format!(
                "new {} order must list each of the current {} {}s exactly once",
                axis.label(),
                current.len(),
                axis.label()
            )));
        }

        let tx = self.transaction()?;
        park_and_place(&tx, template, axis, order)?;
        tx.commit()?;
        Ok(())
    }
}

/// Moves every line to a unique negative slot, then flips the slots to their
/// final non-negative orders.
fn park_and_place(
    tx: &Transaction<'_>,
    template: TemplateId,
    axis: Axis,
    order: &[usize],
) -> StoreResult<()> {
    let col = axis.order_column();
    let table = axis.table();

    for (target, current) in order.iter().enumerate() {
        let parked = -(target as i64) - 1;
        tx.execute(
            &format!("UPDATE {table} SET {col} = ?1 WHERE template_id = ?2 AND {col} = ?3"),
            params![parked, template, current],
        )?;
    }
    tx.execute(
        &format!("UPDATE {table} SET {col} = -{col} - 1 WHERE template_id = ?1 AND {col} < 0"),
        [template],
    )?;
    Ok(())
}
