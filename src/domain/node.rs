//! Kind-tagged references to tree nodes.

use serde::Serialize;
use std::fmt;

use super::{CategoryId, TemplateId};

/// The two kinds of node in a project tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Category,
    Template,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Category => f.write_str("category"),
            NodeKind::Template => f.write_str("template"),
        }
    }
}

/// A node in the category/template tree, tagged with its kind.
///
/// Category and template ids come from different tables and may collide,
/// so the kind is part of the node's identity. Serializes as
/// `{"kind": "category", "id": 3}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum NodeRef {
    Category(CategoryId),
    Template(TemplateId),
}

impl NodeRef {
    pub fn kind(self) -> NodeKind {
        match self {
            NodeRef::Category(_) => NodeKind::Category,
            NodeRef::Template(_) => NodeKind::Template,
        }
    }

    /// Returns the raw row id regardless of kind.
    pub fn raw_id(self) -> i64 {
        match self {
            NodeRef::Category(id) => id.get(),
            NodeRef::Template(id) => id.get(),
        }
    }

    /// Returns the category id if this node is a category.
    pub fn as_category(self) -> Option<CategoryId> {
        match self {
            NodeRef::Category(id) => Some(id),
            NodeRef::Template(_) => None,
        }
    }

    /// Returns the template id if this node is a template.
    pub fn as_template(self) -> Option<TemplateId> {
        match self {
            NodeRef::Template(id) => Some(id),
            NodeRef::Category(_) => None,
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.raw_id())
    }
}

impl From<CategoryId> for NodeRef {
    fn from(id: CategoryId) -> Self {
        NodeRef::Category(id)
    }
}

impl From<TemplateId> for NodeRef {
    fn from(id: TemplateId) -> Self {
        NodeRef::Template(id)
    }
}
