//! Recomputing and persisting numeration.

use serde::Serialize;

use super::ProjectTree;
use crate::domain::{CategoryId, NodeRef, Numeration};
use crate::store::{PositionStore, PositionUpdate};

/// A node whose placement could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenumberFailure {
    pub node: NodeRef,
    pub numeration: Numeration,
    pub error: String,
}

/// Summary of a renumber pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenumberReport {
    /// Nodes visited by the walk.
    pub visited: usize,
    /// Nodes whose placement was written.
    pub written: usize,
    pub failures: Vec<RenumberFailure>,
}

impl RenumberReport {
    /// Returns true if every write succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl ProjectTree {
    /// Walks the tree in display order, assigns every node its numeration,
    /// and writes position, depth, and parent through `store`.
    ///
    /// Top-level nodes get positions `1..=n` at depth 0; each child gets its
    /// parent's numeration extended by its 1-based index. Writes are
    /// independent: a failed write is logged and recorded, and the walk
    /// carries on. The in-memory numeration is updated either way.
    pub fn renumber<S>(&mut self, store: &mut S) -> RenumberReport
    where
        S: PositionStore + ?Sized,
    {
        let mut report = RenumberReport::default();
        self.place_all(&mut |update, numeration| {
            report.visited += 1;
            match store.persist_position(update) {
                Ok(()) => report.written += 1,
                Err(err) => {
                    tracing::warn!(
                        node = %update.node,
                        %numeration,
                        error = %err,
                        "failed to persist position"
                    );
                    report.failures.push(RenumberFailure {
                        node: update.node,
                        numeration: numeration.clone(),
                        error: err.to_string(),
                    });
                }
            }
        });

        tracing::info!(
            project = %self.project(),
            visited = report.visited,
            written = report.written,
            failed = report.failures.len(),
            "renumbered tree"
        );
        report
    }

    /// Recomputes numeration in memory without writing anything.
    pub fn refresh_numeration(&mut self) {
        self.place_all(&mut |_, _| {});
    }

    fn place_all(&mut self, visit: &mut dyn FnMut(&PositionUpdate, &Numeration)) {
        let roots = self.roots().to_vec();
        for (index, node) in roots.into_iter().enumerate() {
            self.place(node, None, Numeration::root(index as u32 + 1), visit);
        }
    }

    fn place(
        &mut self,
        node: NodeRef,
        parent: Option<CategoryId>,
        numeration: Numeration,
        visit: &mut dyn FnMut(&PositionUpdate, &Numeration),
    ) {
        let Some(entry) = self.node_mut(node) else {
            return;
        };
        entry.set_placement(parent, numeration.clone());
        let children = entry.children().to_vec();

        let update = PositionUpdate {
            node,
            parent,
            position: numeration.position(),
            depth: numeration.depth(),
        };
        visit(&update, &numeration);

        if let NodeRef::Category(id) = node {
            for (index, child) in children.into_iter().enumerate() {
                self.place(child, Some(id), numeration.child(index as u32 + 1), visit);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProjectId, ROOT_DEPTH, TemplateId};
    use crate::store::{StoreError, StoreResult};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[derive(Default)]
    struct Recorder {
        writes: Vec<PositionUpdate>,
        fail_on: HashSet<NodeRef>,
    }

    impl PositionStore for Recorder {
        fn persist_position(&mut self, update: &PositionUpdate) -> StoreResult<()> {
            if self.fail_on.contains(&update.node) {
                return Err(StoreError::Validation("refused".to_string()));
            }
            self.writes.push(*update);
            Ok(())
        }
    }

    fn cat(id: i64) -> NodeRef {
        NodeRef::Category(CategoryId::new(id))
    }

    fn tpl(id: i64) -> NodeRef {
        NodeRef::Template(TemplateId::new(id))
    }

    fn cid(id: i64) -> Option<CategoryId> {
        Some(CategoryId::new(id))
    }

    fn update(node: NodeRef, parent: Option<CategoryId>, position: u32, depth: u32) -> PositionUpdate {
        PositionUpdate {
            node,
            parent,
            position,
            depth,
        }
    }

    /// Category 1 "A" holds category 2 "B" then template 1 "t".
    /// Category 3 "C" is a second root.
    fn small_tree() -> ProjectTree {
        let mut tree = ProjectTree::new(ProjectId::new(1));
        tree.push(cat(1), "A", None).unwrap();
        tree.push(cat(2), "B", cid(1)).unwrap();
        tree.push(tpl(1), "t", cid(1)).unwrap();
        tree.push(cat(3), "C", None).unwrap();
        tree
    }

    #[test]
    fn renumber_writes_every_node_in_pre_order() {
        let mut tree = small_tree();
        let mut store = Recorder::default();

        let report = tree.renumber(&mut store);

        assert_eq!(
            store.writes,
            vec![
                update(cat(1), None, 1, ROOT_DEPTH),
                update(cat(2), cid(1), 1, ROOT_DEPTH + 1),
                update(tpl(1), cid(1), 2, ROOT_DEPTH + 1),
                update(cat(3), None, 2, ROOT_DEPTH),
            ]
        );
        assert_eq!(report.visited, 4);
        assert_eq!(report.written, 4);
        assert!(report.is_clean());
    }

    #[test]
    fn renumber_after_move_reflects_new_layout() {
        let mut tree = small_tree();
        tree.move_node(cat(3), cid(2), None).unwrap();
        let mut store = Recorder::default();

        tree.renumber(&mut store);

        assert!(store.writes.contains(&update(cat(3), cid(2), 1, 2)));
        assert_eq!(tree.roots(), &[cat(1)]);
        assert_eq!(tree.get(cat(3)).unwrap().numeration().to_string(), "1.1.1");
    }

    #[test]
    fn failed_write_is_reported_and_walk_continues() {
        let mut tree = small_tree();
        let mut store = Recorder {
            fail_on: HashSet::from([cat(2)]),
            ..Recorder::default()
        };

        let report = tree.renumber(&mut store);

        assert_eq!(report.visited, 4);
        assert_eq!(report.written, 3);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].node, cat(2));
        assert_eq!(report.failures[0].numeration.to_string(), "1.1");
        // Children of the failed node are still written.
        assert!(store.writes.contains(&update(tpl(1), cid(1), 2, 1)));
    }

    #[test]
    fn report_serializes_failures_as_json() {
        let mut tree = small_tree();
        let mut store = Recorder {
            fail_on: HashSet::from([tpl(1)]),
            ..Recorder::default()
        };

        let report = tree.renumber(&mut store);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["written"], 3);
        assert_eq!(
            json["failures"][0]["node"],
            serde_json::json!({"kind": "template", "id": 1})
        );
        assert_eq!(json["failures"][0]["numeration"], "1.2");
    }

    #[test]
    fn renumber_on_empty_tree_writes_nothing() {
        let mut tree = ProjectTree::new(ProjectId::new(1));
        let mut store = Recorder::default();
        let report = tree.renumber(&mut store);
        assert_eq!(report, RenumberReport::default());
    }

    #[test]
    fn siblings_are_contiguous_and_depth_matches_distance() {
        let mut tree = ProjectTree::new(ProjectId::new(1));
        let mut next_template = 1;
        for root in 1..=4 {
            tree.push(cat(root), format!("r{root}"), None).unwrap();
            let mut parent = root;
            for level in 0..3 {
                let child = root * 100 + level;
                tree.push(cat(child), format!("c{child}"), cid(parent)).unwrap();
                for _ in 0..2 {
                    tree.push(tpl(next_template), "t", cid(parent)).unwrap();
                    next_template += 1;
                }
                parent = child;
            }
        }
        tree.move_node(cat(2), cid(101), Some(1)).unwrap();
        tree.remove_subtree(cat(302)).unwrap();
        tree.unpack(CategoryId::new(400)).unwrap();

        let mut store = Recorder::default();
        let report = tree.renumber(&mut store);
        assert_eq!(report.written, tree.len());

        let mut by_parent: std::collections::HashMap<Option<CategoryId>, Vec<u32>> =
            std::collections::HashMap::new();
        for write in &store.writes {
            by_parent.entry(write.parent).or_default().push(write.position);

            let mut distance = 0;
            let mut current = write.parent;
            while let Some(parent) = current {
                distance += 1;
                current = tree.get(NodeRef::Category(parent)).unwrap().parent();
            }
            assert_eq!(write.depth, ROOT_DEPTH + distance, "depth of {}", write.node);
        }
        for (parent, positions) in by_parent {
            let expected: Vec<u32> = (1..=positions.len() as u32).collect();
            assert_eq!(positions, expected, "positions under {:?}", parent);
        }
    }

    #[test]
    fn refresh_numeration_writes_nothing_but_updates_memory() {
        let mut tree = small_tree();
        tree.move_node(tpl(1), cid(3), None).unwrap();
        tree.refresh_numeration();
        assert_eq!(tree.get(tpl(1)).unwrap().numeration().to_string(), "2.1");
    }
}
