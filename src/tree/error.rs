//! Errors raised by structural tree edits.

use thiserror::Error;

use crate::domain::{CategoryId, NodeRef, Numeration, TemplateId};

/// Errors that can occur while editing a [`ProjectTree`](super::ProjectTree).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The node is not part of the tree.
    #[error("{0} is not in the tree")]
    UnknownNode(NodeRef),

    /// No node is shown at the numeration.
    #[error("nothing at {0}")]
    NoNodeAt(Numeration),

    /// Templates are leaves and cannot hold children.
    #[error("template {0} cannot contain other nodes")]
    TemplateAsParent(TemplateId),

    /// The node was already inserted.
    #[error("{0} is already in the tree")]
    DuplicateNode(NodeRef),

    /// Templates always live inside a category.
    #[error("template {0} cannot be placed at the top level")]
    TemplateAtRoot(TemplateId),

    /// A category cannot become its own descendant.
    #[error("cannot move category {node} into its own subtree (target {target})")]
    Cycle { node: CategoryId, target: CategoryId },
}
