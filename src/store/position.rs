//! The seam between tree renumbering and persistence.

use crate::domain::{CategoryId, NodeRef};

use super::StoreResult;

/// New placement of a single node, as computed by a renumber pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionUpdate {
    pub node: NodeRef,
    /// Parent category, `None` for a top-level node.
    pub parent: Option<CategoryId>,
    /// 1-based rank among siblings.
    pub position: u32,
    pub depth: u32,
}

/// Persists node placements.
///
/// Implementors write one node per call. Renumbering treats every call
/// independently: a failed write is reported and the walk continues.
pub trait PositionStore {
    fn persist_position(&mut self, update: &PositionUpdate) -> StoreResult<()>;
}

impl<T: PositionStore + ?Sized> PositionStore for &mut T {
    fn persist_position(&mut self, update: &PositionUpdate) -> StoreResult<()> {
        (**self).persist_position(update)
    }
}
