//! Node storage and structural edits.

use std::collections::HashMap;

use serde::Serialize;

use super::TreeError;
use crate::domain::{CategoryId, NodeKind, NodeRef, Numeration, ProjectId};

/// One category or template in a [`ProjectTree`].
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode {
    node: NodeRef,
    name: String,
    parent: Option<CategoryId>,
    children: Vec<NodeRef>,
    numeration: Numeration,
}

impl TreeNode {
    pub fn node(&self) -> NodeRef {
        self.node
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent category, `None` for a top-level node.
    pub fn parent(&self) -> Option<CategoryId> {
        self.parent
    }

    /// Children in display order. Always empty for templates.
    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    /// Numeration as of the last structural edit or renumber pass.
    pub fn numeration(&self) -> &Numeration {
        &self.numeration
    }

    pub fn depth(&self) -> u32 {
        self.numeration.depth()
    }

    pub(super) fn set_placement(&mut self, parent: Option<CategoryId>, numeration: Numeration) {
        self.parent = parent;
        self.numeration = numeration;
    }
}

/// The category/template hierarchy of one project.
///
/// Nodes are kept by id; each node lists its children in display order and
/// the tree keeps the ordered list of top-level nodes. Edits only touch
/// memory; [`renumber`](ProjectTree::renumber) writes the result back.
#[derive(Debug, Clone)]
pub struct ProjectTree {
    project: ProjectId,
    nodes: HashMap<NodeRef, TreeNode>,
    roots: Vec<NodeRef>,
}

impl ProjectTree {
    /// Creates an empty tree for a project.
    pub fn new(project: ProjectId) -> Self {
        Self {
            project,
            nodes: HashMap::new(),
            roots: Vec::new(),
        }
    }

    pub fn project(&self) -> ProjectId {
        self.project
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: NodeRef) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn get(&self, node: NodeRef) -> Option<&TreeNode> {
        self.nodes.get(&node)
    }

    /// Top-level nodes in display order.
    pub fn roots(&self) -> &[NodeRef] {
        &self.roots
    }

    /// Children of `node` in display order; empty for unknown nodes.
    pub fn children(&self, node: NodeRef) -> &[NodeRef] {
        self.nodes
            .get(&node)
            .map(|entry| entry.children.as_slice())
            .unwrap_or(&[])
    }

    // ===========================================
    // Building
    // ===========================================

    /// Appends a node as the last child of `parent` (or as the last root).
    pub fn push(
        &mut self,
        node: NodeRef,
        name: impl Into<String>,
        parent: Option<CategoryId>,
    ) -> Result<(), TreeError> {
        if self.nodes.contains_key(&node) {
            return Err(TreeError::DuplicateNode(node));
        }
        if let (NodeRef::Template(id), None) = (node, parent) {
            return Err(TreeError::TemplateAtRoot(id));
        }

        let numeration = match parent {
            None => Numeration::root(self.roots.len() as u32 + 1),
            Some(parent_id) => {
                let entry = self
                    .nodes
                    .get(&NodeRef::Category(parent_id))
                    .ok_or(TreeError::UnknownNode(NodeRef::Category(parent_id)))?;
                entry.numeration.child(entry.children.len() as u32 + 1)
            }
        };

        self.siblings_mut(parent)?.push(node);
        self.nodes.insert(
            node,
            TreeNode {
                node,
                name: name.into(),
                parent,
                children: Vec::new(),
                numeration,
            },
        );
        Ok(())
    }

    // ===========================================
    // Queries
    // ===========================================

    /// Finds the node shown at a numeration.
    pub fn resolve(&self, numeration: &Numeration) -> Option<NodeRef> {
        let mut siblings = self.roots.as_slice();
        let mut found = None;
        for &position in numeration.positions() {
            let index = position.checked_sub(1)? as usize;
            let node = *siblings.get(index)?;
            found = Some(node);
            siblings = self.children(node);
        }
        found
    }

    /// Like [`resolve`](Self::resolve), but an error when nothing is there.
    pub fn node_at(&self, numeration: &Numeration) -> Result<NodeRef, TreeError> {
        self.resolve(numeration)
            .ok_or_else(|| TreeError::NoNodeAt(numeration.clone()))
    }

    /// Resolves a numeration that must name a category.
    pub fn category_at(&self, numeration: &Numeration) -> Result<CategoryId, TreeError> {
        match self.node_at(numeration)? {
            NodeRef::Category(id) => Ok(id),
            NodeRef::Template(id) => Err(TreeError::TemplateAsParent(id)),
        }
    }

    /// Returns `node` followed by all its descendants, depth first.
    pub fn subtree(&self, node: NodeRef) -> Vec<NodeRef> {
        let mut out = Vec::new();
        if self.nodes.contains_key(&node) {
            self.collect_subtree(node, &mut out);
        }
        out
    }

    fn collect_subtree(&self, node: NodeRef, out: &mut Vec<NodeRef>) {
        out.push(node);
        for &child in self.children(node) {
            self.collect_subtree(child, out);
        }
    }

    /// All nodes in display order (pre-order, depth first).
    pub fn pre_order(&self) -> Vec<NodeRef> {
        let mut out = Vec::with_capacity(self.nodes.len());
        for &root in &self.roots {
            self.collect_subtree(root, &mut out);
        }
        out
    }

    /// All nodes in display order, borrowed.
    pub fn walk(&self) -> impl Iterator<Item = &TreeNode> + '_ {
        self.pre_order()
            .into_iter()
            .filter_map(move |node| self.nodes.get(&node))
    }

    /// Returns true if `candidate` is `ancestor` or lies below it.
    pub fn is_within(&self, candidate: NodeRef, ancestor: NodeRef) -> bool {
        let mut current = candidate;
        loop {
            if current == ancestor {
                return true;
            }
            match self.nodes.get(&current).and_then(|entry| entry.parent) {
                Some(parent) => current = NodeRef::Category(parent),
                None => return false,
            }
        }
    }

    // ===========================================
    // Structural Edits
    // ===========================================

    /// Moves a node (with its subtree) under `new_parent` at `index`.
    ///
    /// `index` is 0-based among the new siblings and clamped to the end;
    /// `None` appends. This is the in-memory half of a drag and drop.
    pub fn move_node(
        &mut self,
        node: NodeRef,
        new_parent: Option<CategoryId>,
        index: Option<usize>,
    ) -> Result<(), TreeError> {
        let old_parent = self
            .nodes
            .get(&node)
            .ok_or(TreeError::UnknownNode(node))?
            .parent;

        match (node, new_parent) {
            (NodeRef::Template(id), None) => return Err(TreeError::TemplateAtRoot(id)),
            (_, Some(target)) => {
                let target_ref = NodeRef::Category(target);
                if !self.nodes.contains_key(&target_ref) {
                    return Err(TreeError::UnknownNode(target_ref));
                }
                if let NodeRef::Category(moving) = node
                    && self.is_within(target_ref, node)
                {
                    return Err(TreeError::Cycle {
                        node: moving,
                        target,
                    });
                }
            }
            _ => {}
        }

        self.siblings_mut(old_parent)?.retain(|&n| n != node);

        let siblings = self.siblings_mut(new_parent)?;
        let at = index.unwrap_or(siblings.len()).min(siblings.len());
        siblings.insert(at, node);

        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.parent = new_parent;
        }
        self.refresh_numeration();
        Ok(())
    }

    /// Removes a node and everything below it. Returns the removed nodes.
    pub fn remove_subtree(&mut self, node: NodeRef) -> Result<Vec<NodeRef>, TreeError> {
        let parent = self
            .nodes
            .get(&node)
            .ok_or(TreeError::UnknownNode(node))?
            .parent;

        let removed = self.subtree(node);
        self.siblings_mut(parent)?.retain(|&n| n != node);
        for gone in &removed {
            self.nodes.remove(gone);
        }
        self.refresh_numeration();
        Ok(removed)
    }

    /// Removes a category and puts its children where it was, in order.
    ///
    /// Returns the promoted children.
    pub fn unpack(&mut self, category: CategoryId) -> Result<Vec<NodeRef>, TreeError> {
        let node = NodeRef::Category(category);
        let entry = self.nodes.get(&node).ok_or(TreeError::UnknownNode(node))?;
        let parent = entry.parent;
        let children = entry.children.clone();

        if parent.is_none()
            && let Some(template) = children.iter().find_map(|child| child.as_template())
        {
            return Err(TreeError::TemplateAtRoot(template));
        }

        let siblings = self.siblings_mut(parent)?;
        let at = siblings
            .iter()
            .position(|&n| n == node)
            .ok_or(TreeError::UnknownNode(node))?;
        siblings.splice(at..=at, children.iter().copied());

        for child in &children {
            if let Some(entry) = self.nodes.get_mut(child) {
                entry.parent = parent;
            }
        }
        self.nodes.remove(&node);
        self.refresh_numeration();
        Ok(children)
    }

    fn siblings_mut(&mut self, parent: Option<CategoryId>) -> Result<&mut Vec<NodeRef>, TreeError> {
        match parent {
            None => Ok(&mut self.roots),
            Some(id) => self
                .nodes
                .get_mut(&NodeRef::Category(id))
                .map(|entry| &mut entry.children)
                .ok_or(TreeError::UnknownNode(NodeRef::Category(id))),
        }
    }

    pub(super) fn node_mut(&mut self, node: NodeRef) -> Option<&mut TreeNode> {
        self.nodes.get_mut(&node)
    }
}
