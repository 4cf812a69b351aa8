//! Position writes issued by tree renumbering.

use rusqlite::params;

use super::SqliteStore;
use crate::domain::NodeRef;
use crate::store::{PositionStore, PositionUpdate, StoreError, StoreResult};

impl PositionStore for SqliteStore {
    /// Writes one node's placement.
    ///
    /// Categories get `position`, `depth`, and `parent_id`; templates get
    /// `position` and `category_id`. Each call commits on its own.
    fn persist_position(&mut self, update: &PositionUpdate) -> StoreResult<()> {
        let rows = match update.node {
            NodeRef::Category(id) => self.conn.execute(
                "UPDATE category SET position = ?1, depth = ?2, parent_id = ?3
                 WHERE category_id = ?4",
                params![update.position, update.depth, update.parent, id],
            )?,
            NodeRef::Template(id) => {
                let category = update.parent.ok_or_else(|| {
                    StoreError::Validation(format!("template {} needs a parent category", id))
                })?;
                self.conn.execute(
                    "UPDATE table_template SET position = ?1, category_id = ?2
                     WHERE template_id = ?3",
                    params![update.position, category, id],
                )?
            }
        };

        if rows == 0 {
            return Err(StoreError::not_found(
                match update.node {
                    NodeRef::Category(_) => "category",
                    NodeRef::Template(_) => "template",
                },
                update.node.raw_id(),
            ));
        }

        tracing::trace!(
            node = %update.node,
            parent = ?update.parent,
            position = update.position,
            depth = update.depth,
            "persisted position"
        );
        Ok(())
    }
}
