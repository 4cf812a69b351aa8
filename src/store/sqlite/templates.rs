//! Template CRUD with partial updates.

use rusqlite::types::ToSql;
use rusqlite::{OptionalExtension, Row, params};

use super::SqliteStore;
use crate::domain::{CategoryId, Name, ProjectId, Template, TemplateId, TemplateUpdate};
use crate::store::{StoreError, StoreResult};

const TEMPLATE_COLUMNS: &str =
    "template_id, category_id, name, position, notes, programming_notes";

fn template_from_row(row: &Row<'_>) -> rusqlite::Result<Template> {
    Ok(Template {
        id: row.get(0)?,
        category_id: row.get(1)?,
        name: row.get(2)?,
        position: row.get(3)?,
        notes: row.get(4)?,
        programming_notes: row.get(5)?,
    })
}

impl SqliteStore {
    /// Creates an empty template at the end of a category's template list.
    ///
    /// Position is one past the highest template position in the category,
    /// starting at 1.
    pub fn create_template(&mut self, category: CategoryId, name: &str) -> StoreResult<Template> {
        let name = Name::new(name)?;

        if self.get_category(category)?.is_none() {
            return Err(StoreError::not_found("category", category));
        }

        let position: u32 = self.conn.query_row(
            "SELECT COALESCE(MAX(position), 0) + 1 FROM table_template WHERE category_id = ?1",
            [category],
            |row| row.get(0),
        )?;

        self.conn.execute(
            "INSERT INTO table_template (category_id, name, position, notes, programming_notes)
             VALUES (?1, ?2, ?3, '', '')",
            params![category, name.as_str(), position],
        )?;
        let id = TemplateId::new(self.conn.last_insert_rowid());
        tracing::info!(template = %id, category = %category, position, "created template");

        Ok(Template {
            id,
            category_id: category,
            name: name.into_inner(),
            position,
            notes: String::new(),
            programming_notes: String::new(),
        })
    }

    /// Writes the fields present in `update`; absent fields are untouched.
    ///
    /// An empty update is a no-op and does not check that the template exists.
    pub fn update_template(&mut self, id: TemplateId, update: &TemplateUpdate) -> StoreResult<()> {
        if update.is_empty() {
            return Ok(());
        }

        let name = update.name.as_deref().map(Name::new).transpose()?;
        let name = name.as_ref().map(Name::as_str);

        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<&dyn ToSql> = Vec::new();

        if let Some(name) = &name {
            assignments.push("name = ?");
            values.push(name);
        }
        if let Some(notes) = &update.notes {
            assignments.push("notes = ?");
            values.push(notes);
        }
        if let Some(programming_notes) = &update.programming_notes {
            assignments.push("programming_notes = ?");
            values.push(programming_notes);
        }
        values.push(&id);

        let sql = format!(
            "UPDATE table_template SET {} WHERE template_id = ?",
            assignments.join(", ")
        );
        let rows = self.conn.execute(&sql, values.as_slice())?;
        if rows == 0 {
            return Err(StoreError::not_found("template", id));
        }
        tracing::debug!(template = %id, fields = assignments.len(), "updated template");
        Ok(())
    }

    /// Deletes a template and its rows, columns, and cells.
    pub fn delete_template(&mut self, id: TemplateId) -> StoreResult<()> {
        let tx = self.transaction()?;
        tx.execute("DELETE FROM table_cell WHERE template_id = ?1", [id])?;
        tx.execute("DELETE FROM table_row WHERE template_id = ?1", [id])?;
        tx.execute("DELETE FROM table_column WHERE template_id = ?1", [id])?;
        let rows = tx.execute("DELETE FROM table_template WHERE template_id = ?1", [id])?;
        if rows == 0 {
            return Err(StoreError::not_found("template", id));
        }
        tx.commit()?;
        tracing::info!(template = %id, "deleted template");
        Ok(())
    }

    /// Returns a template by id.
    pub fn get_template(&self, id: TemplateId) -> StoreResult<Option<Template>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {TEMPLATE_COLUMNS} FROM table_template WHERE template_id = ?1"),
                [id],
                template_from_row,
            )
            .optional()?)
    }

    /// Lists a category's templates by position.
    pub fn list_templates(&self, category: CategoryId) -> StoreResult<Vec<Template>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM table_template WHERE category_id = ?1
             ORDER BY position, template_id"
        ))?;
        let templates = stmt
            .query_map([category], template_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(templates)
    }

    /// Lists every template in a project, grouped by category and ordered by
    /// position within each category.
    pub fn list_project_templates(&self, project: ProjectId) -> StoreResult<Vec<Template>> {
        let mut stmt = self.conn.prepare(
            "SELECT t.template_id, t.category_id, t.name, t.position, t.notes, t.programming_notes
             FROM table_template t
             INNER JOIN category c ON c.category_id = t.category_id
             WHERE c.project_id = ?1
             ORDER BY t.category_id, t.position, t.template_id",
        )?;
        let templates = stmt
            .query_map([project], template_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(templates)
    }
}
