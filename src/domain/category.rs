//! Category records and deletion modes.

use serde::Serialize;

use super::{CategoryId, ProjectId};

/// Stored depth of a top-level category.
pub const ROOT_DEPTH: u32 = 0;

/// A category as stored in the `category` table.
///
/// Categories form a tree through `parent_id`; `position` is the 1-based
/// rank among siblings and `depth` the distance from a root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub parent_id: Option<CategoryId>,
    pub position: u32,
    pub depth: u32,
    pub project_id: ProjectId,
}

impl Category {
    /// Returns true if the category has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// How a category deletion treats the category's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Remove the category, every descendant category, and every template
    /// below any of them.
    Cascade,
    /// Move direct children to the category's parent, then remove the
    /// emptied category.
    Unpack,
}

/// Row counts affected by a category deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    pub removed_categories: usize,
    pub removed_templates: usize,
    pub promoted_categories: usize,
    pub promoted_templates: usize,
}
