//! Project CRUD.

use rusqlite::{OptionalExtension, Row, params};

use super::SqliteStore;
use crate::domain::{Name, Project, ProjectId};
use crate::store::{StoreError, StoreResult};

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project::new(row.get(0)?, row.get::<_, String>(1)?))
}

impl SqliteStore {
    /// Creates a project and returns it with its new id.
    pub fn create_project(&mut self, name: &str) -> StoreResult<Project> {
        let name = Name::new(name)?;
        self.conn
            .execute("INSERT INTO project (name) VALUES (?1)", [name.as_str()])?;
        let id = ProjectId::new(self.conn.last_insert_rowid());
        tracing::info!(project = %id, name = %name, "created project");
        Ok(Project::new(id, name.into_inner()))
    }

    /// Renames a project.
    pub fn rename_project(&mut self, id: ProjectId, name: &str) -> StoreResult<()> {
        let name = Name::new(name)?;
        let rows = self.conn.execute(
            "UPDATE project SET name = ?1 WHERE project_id = ?2",
            params![name.as_str(), id],
        )?;
        if rows == 0 {
            return Err(StoreError::not_found("project", id));
        }
        Ok(())
    }

    /// Deletes a project together with its categories, templates, and tables.
    pub fn delete_project(&mut self, id: ProjectId) -> StoreResult<()> {
        let rows = self
            .conn
            .execute("DELETE FROM project WHERE project_id = ?1", [id])?;
        if rows == 0 {
            return Err(StoreError::not_found("project", id));
        }
        tracing::info!(project = %id, "deleted project");
        Ok(())
    }

    /// Lists all projects in creation order.
    pub fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare("SELECT project_id, name FROM project ORDER BY project_id")?;
        let projects = stmt
            .query_map([], project_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(projects)
    }

    /// Returns a project by id.
    pub fn get_project(&self, id: ProjectId) -> StoreResult<Option<Project>> {
        Ok(self
            .conn
            .query_row(
                "SELECT project_id, name FROM project WHERE project_id = ?1",
                [id],
                project_from_row,
            )
            .optional()?)
    }

    /// Returns the oldest project with exactly this name.
    pub fn find_project_by_name(&self, name: &str) -> StoreResult<Option<Project>> {
        Ok(self
            .conn
            .query_row(
                "SELECT project_id, name FROM project WHERE name = ?1
                 ORDER BY project_id LIMIT 1",
                [name.trim()],
                project_from_row,
            )
            .optional()?)
    }
}
