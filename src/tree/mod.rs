//! In-memory category/template tree and the renumbering pass.
//!
//! A [`ProjectTree`] is loaded from the store, edited in memory (move,
//! remove, unpack), and flushed back with [`ProjectTree::renumber`], which
//! rewrites every node's position, depth, and parent.

mod arena;
mod error;
mod load;
mod renumber;

pub use arena::{ProjectTree, TreeNode};
pub use error::TreeError;
pub use renumber::{RenumberFailure, RenumberReport};
