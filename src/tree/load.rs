//! Building a [`ProjectTree`] from stored records.

use std::collections::HashMap;

use super::ProjectTree;
use crate::domain::{Category, CategoryId, NodeRef, ProjectId, Template};
use crate::store::{SqliteStore, StoreResult};

/// A sibling while the tree is being assembled.
enum Child<'a> {
    Category(&'a Category),
    Template(&'a Template),
}

impl Child<'_> {
    /// Stored position first; on ties categories come before templates.
    fn sort_key(&self) -> (u32, u8, i64) {
        match self {
            Child::Category(c) => (c.position, 0, c.id.get()),
            Child::Template(t) => (t.position, 1, t.id.get()),
        }
    }
}

impl ProjectTree {
    /// Loads a project's categories and templates from the store.
    pub fn load(store: &SqliteStore, project: ProjectId) -> StoreResult<Self> {
        let categories = store.list_categories(project)?;
        let templates = store.list_project_templates(project)?;
        let tree = Self::from_records(project, &categories, &templates);
        tracing::debug!(
            project = %project,
            categories = categories.len(),
            templates = templates.len(),
            "loaded tree"
        );
        Ok(tree)
    }

    /// Assembles a tree from flat records.
    ///
    /// Siblings are ordered by stored position. Categories whose parent is
    /// missing from `categories` are attached at the top level.
    pub fn from_records(project: ProjectId, categories: &[Category], templates: &[Template]) -> Self {
        let mut by_parent: HashMap<Option<CategoryId>, Vec<&Category>> = HashMap::new();
        for category in categories {
            by_parent.entry(category.parent_id).or_default().push(category);
        }
        let mut by_category: HashMap<CategoryId, Vec<&Template>> = HashMap::new();
        for template in templates {
            by_category.entry(template.category_id).or_default().push(template);
        }

        let mut tree = Self::new(project);
        let builder = Builder {
            by_parent: &by_parent,
            by_category: &by_category,
        };

        let mut roots: Vec<&Category> = by_parent.get(&None).cloned().unwrap_or_default();
        roots.sort_by_key(|c| (c.position, c.id.get()));
        for root in roots {
            builder.attach(&mut tree, root, None);
        }

        for category in categories {
            if !tree.contains(NodeRef::Category(category.id)) {
                tracing::warn!(
                    category = %category.id,
                    parent = ?category.parent_id,
                    "category parent not found, attaching at top level"
                );
                builder.attach(&mut tree, category, None);
            }
        }

        tree
    }
}

struct Builder<'a> {
    by_parent: &'a HashMap<Option<CategoryId>, Vec<&'a Category>>,
    by_category: &'a HashMap<CategoryId, Vec<&'a Template>>,
}

impl Builder<'_> {
    fn attach(&self, tree: &mut ProjectTree, category: &Category, parent: Option<CategoryId>) {
        let node = NodeRef::Category(category.id);
        if tree.push(node, category.name.clone(), parent).is_err() {
            return;
        }

        let mut children: Vec<Child<'_>> = Vec::new();
        if let Some(subcategories) = self.by_parent.get(&Some(category.id)) {
            children.extend(subcategories.iter().map(|&c| Child::Category(c)));
        }
        if let Some(templates) = self.by_category.get(&category.id) {
            children.extend(templates.iter().map(|&t| Child::Template(t)));
        }
        children.sort_by_key(Child::sort_key);

        for child in children {
            match child {
                Child::Category(sub) => self.attach(tree, sub, Some(category.id)),
                Child::Template(template) => {
                    // Only fails on a duplicate id, which the store cannot produce.
                    let _ = tree.push(
                        NodeRef::Template(template.id),
                        template.name.clone(),
                        Some(category.id),
                    );
                }
            }
        }
    }
}
