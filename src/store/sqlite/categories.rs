//! Category CRUD and the two deletion modes.

use rusqlite::{OptionalExtension, Row, params};

use super::SqliteStore;
use crate::domain::{Category, CategoryId, DeleteMode, DeleteOutcome, Name, ProjectId, ROOT_DEPTH};
use crate::store::{StoreError, StoreResult};

const CATEGORY_COLUMNS: &str = "category_id, name, parent_id, position, depth, project_id";

/// Selects `id` for the category bound to `?1` and all its descendants.
const SUBTREE_CTE: &str = "WITH RECURSIVE subtree(id) AS (
        SELECT category_id FROM category WHERE category_id = ?1
        UNION ALL
        SELECT c.category_id FROM category c
        INNER JOIN subtree s ON c.parent_id = s.id
    )";

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        parent_id: row.get(2)?,
        position: row.get(3)?,
        depth: row.get(4)?,
        project_id: row.get(5)?,
    })
}

impl SqliteStore {
    // ===========================================
    // Create / Rename
    // ===========================================

    /// Creates a category at the end of its parent's child list.
    ///
    /// Position is one past the highest sibling position (1 for the first
    /// child); depth is the parent's depth plus one, or [`ROOT_DEPTH`] for a
    /// top-level category.
    pub fn create_category(
        &mut self,
        project: ProjectId,
        parent: Option<CategoryId>,
        name: &str,
    ) -> StoreResult<Category> {
        let name = Name::new(name)?;

        if self.get_project(project)?.is_none() {
            return Err(StoreError::not_found("project", project));
        }

        let depth = match parent {
            None => ROOT_DEPTH,
            Some(parent_id) => {
                let (parent_depth, parent_project): (u32, ProjectId) = self
                    .conn
                    .query_row(
                        "SELECT depth, project_id FROM category WHERE category_id = ?1",
                        [parent_id],
                        |row| Ok((row.get(0)?, row.get(1)?)),
                    )
                    .optional()?
                    .ok_or_else(|| StoreError::not_found("category", parent_id))?;

                if parent_project != project {
                    return Err(StoreError::Validation(format!(
                        "category {} belongs to project {}, not {}",
                        parent_id, parent_project, project
                    )));
                }
                parent_depth + 1
            }
        };

        let position: u32 = self.conn.query_row(
            "SELECT COALESCE(MAX(position), 0) + 1 FROM category
             WHERE project_id = ?1 AND parent_id IS ?2",
            params![project, parent],
            |row| row.get(0),
        )?;

        self.conn.execute(
            "INSERT INTO category (name, parent_id, position, depth, project_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![name.as_str(), parent, position, depth, project],
        )?;
        let id = CategoryId::new(self.conn.last_insert_rowid());
        tracing::info!(category = %id, ?parent, position, depth, "created category");

        Ok(Category {
            id,
            name: name.into_inner(),
            parent_id: parent,
            position,
            depth,
            project_id: project,
        })
    }

    /// Renames a category.
    pub fn rename_category(&mut self, id: CategoryId, name: &str) -> StoreResult<()> {
        let name = Name::new(name)?;
        let rows = self.conn.execute(
            "UPDATE category SET name = ?1 WHERE category_id = ?2",
            params![name.as_str(), id],
        )?;
        if rows == 0 {
            return Err(StoreError::not_found("category", id));
        }
        Ok(())
    }

    /// Points a category at a new parent (`None` for top level).
    ///
    /// Position and depth are left alone; a renumber pass recomputes them.
    pub fn reparent_category(
        &mut self,
        id: CategoryId,
        parent: Option<CategoryId>,
    ) -> StoreResult<()> {
        let category = self
            .get_category(id)?
            .ok_or_else(|| StoreError::not_found("category", id))?;

        if let Some(parent_id) = parent {
            let target = self
                .get_category(parent_id)?
                .ok_or_else(|| StoreError::not_found("category", parent_id))?;
            if target.project_id != category.project_id {
                return Err(StoreError::Validation(format!(
                    "cannot move category {} into another project",
                    id
                )));
            }
            if self.is_in_subtree(id, parent_id)? {
                return Err(StoreError::Validation(format!(
                    "cannot move category {} below itself",
                    id
                )));
            }
        }

        self.conn.execute(
            "UPDATE category SET parent_id = ?1 WHERE category_id = ?2",
            params![parent, id],
        )?;
        Ok(())
    }

    // ===========================================
    // Queries
    // ===========================================

    /// Returns a category by id.
    pub fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {CATEGORY_COLUMNS} FROM category WHERE category_id = ?1"),
                [id],
                category_from_row,
            )
            .optional()?)
    }

    /// Lists a project's categories ordered by depth, then sibling position.
    pub fn list_categories(&self, project: ProjectId) -> StoreResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM category WHERE project_id = ?1
             ORDER BY depth, position, category_id"
        ))?;
        let categories = stmt
            .query_map([project], category_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(categories)
    }

    /// Returns true if `candidate` is `root` or one of its descendants.
    pub fn is_in_subtree(&self, root: CategoryId, candidate: CategoryId) -> StoreResult<bool> {
        Ok(self.conn.query_row(
            &format!("{SUBTREE_CTE} SELECT EXISTS(SELECT 1 FROM subtree WHERE id = ?2)"),
            params![root, candidate],
            |row| row.get(0),
        )?)
    }

    // ===========================================
    // Delete
    // ===========================================

    /// Deletes a category using the given mode.
    ///
    /// Both modes run in a single transaction.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the category does not exist
    /// - `Validation` when unpacking a top-level category that directly
    ///   holds templates (templates always need a category)
    pub fn delete_category(
        &mut self,
        id: CategoryId,
        mode: DeleteMode,
    ) -> StoreResult<DeleteOutcome> {
        match mode {
            DeleteMode::Cascade => self.delete_category_cascade(id),
            DeleteMode::Unpack => self.delete_category_unpack(id),
        }
    }

    fn delete_category_cascade(&mut self, id: CategoryId) -> StoreResult<DeleteOutcome> {
        if self.get_category(id)?.is_none() {
            return Err(StoreError::not_found("category", id));
        }

        let tx = self.transaction()?;
        let removed_templates = tx.execute(
            &format!(
                "{SUBTREE_CTE} DELETE FROM table_template
                 WHERE category_id IN (SELECT id FROM subtree)"
            ),
            [id],
        )?;
        let removed_categories = tx.execute(
            &format!(
                "{SUBTREE_CTE} DELETE FROM category
                 WHERE category_id IN (SELECT id FROM subtree)"
            ),
            [id],
        )?;
        tx.commit()?;

        tracing::info!(
            category = %id,
            removed_categories,
            removed_templates,
            "deleted category subtree"
        );
        Ok(DeleteOutcome {
            removed_categories,
            removed_templates,
            ..DeleteOutcome::default()
        })
    }

    fn delete_category_unpack(&mut self, id: CategoryId) -> StoreResult<DeleteOutcome> {
        let category = self
            .get_category(id)?
            .ok_or_else(|| StoreError::not_found("category", id))?;
        let parent = category.parent_id;

        let tx = self.transaction()?;

        let promoted_templates = match parent {
            Some(parent_id) => tx.execute(
                "UPDATE table_template SET category_id = ?1 WHERE category_id = ?2",
                params![parent_id, id],
            )?,
            None => {
                let held: usize = tx.query_row(
                    "SELECT COUNT(*) FROM table_template WHERE category_id = ?1",
                    [id],
                    |row| row.get(0),
                )?;
                if held > 0 {
                    return Err(StoreError::Validation(format!(
                        "cannot unpack top-level category {}: its {} template(s) would have no category",
                        id, held
                    )));
                }
                0
            }
        };

        let promoted_categories = tx.execute(
            "UPDATE category SET parent_id = ?1 WHERE parent_id = ?2",
            params![parent, id],
        )?;
        tx.execute("DELETE FROM category WHERE category_id = ?1", [id])?;
        tx.commit()?;

        tracing::info!(
            category = %id,
            ?parent,
            promoted_categories,
            promoted_templates,
            "unpacked category"
        );
        Ok(DeleteOutcome {
            removed_categories: 1,
            removed_templates: 0,
            promoted_categories,
            promoted_templates,
        })
    }
}
