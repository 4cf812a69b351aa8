//! Command handlers for the CLI.

mod category;
mod project;
mod table;
mod template;
mod tree;


use anyhow::{Context, Result, anyhow, bail};
use std::path::Path;

use crate::domain::{NodeRef, Numeration, Project, ProjectId, Template, TemplateId};
use crate::store::SqliteStore;
use crate::tree::{ProjectTree, RenumberReport};

pub use category::handle_category;
pub use project::handle_project;
pub use table::handle_table;
pub use template::handle_template;
pub use tree::{handle_mv, handle_renumber, handle_tree};

// ===========================================
// Session
// ===========================================

/// An open store plus the project selector given on the command line or in
/// the config file.
pub struct Session {
    store: SqliteStore,
    selector: Option<String>,
}

impl Session {
    /// Opens the database at `db_path`.
    pub fn open(db_path: &Path, selector: Option<String>) -> Result<Self> {
        let store = SqliteStore::open(db_path)
            .with_context(|| format!("failed to open database at {}", db_path.display()))?;
        Ok(Self { store, selector })
    }

    /// Wraps an already open store.
    pub fn with_store(store: SqliteStore, selector: Option<String>) -> Self {
        Self { store, selector }
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut SqliteStore {
        &mut self.store
    }

    /// Resolves the selected project.
    ///
    /// Without a selector the only project is used; with several projects
    /// a selector is required.
    pub fn project(&self) -> Result<Project> {
        match &self.selector {
            Some(selector) => find_project(&self.store, selector),
            None => {
                let mut projects = self.store.list_projects()?;
                match projects.len() {
                    0 => bail!("no projects yet; create one with `tabula project new <name>`"),
                    1 => Ok(projects.remove(0)),
                    n => bail!(
                        "{} projects exist; choose one with --project or the `project` config setting",
                        n
                    ),
                }
            }
        }
    }

    /// Loads the tree of the selected project.
    pub fn tree(&self) -> Result<ProjectTree> {
        let project = self.project()?;
        ProjectTree::load(&self.store, project.id)
            .with_context(|| format!("failed to load tree of project {}", project.name))
    }

    /// Renumbers an edited tree and writes every placement to the store.
    ///
    /// Called after every structural change so stored positions and depths
    /// match the displayed numeration.
    pub fn flush(&mut self, tree: &mut ProjectTree) -> RenumberReport {
        let report = tree.renumber(&mut self.store);
        report_failures(&report);
        report
    }

    /// Resolves a numeration that must name a template and loads it.
    pub fn template_at(&self, numeration: &Numeration) -> Result<Template> {
        let tree = self.tree()?;
        let id = template_id_at(&tree, numeration)?;
        self.store
            .get_template(id)?
            .ok_or_else(|| anyhow!("template {} is gone", id))
    }
}

// ===========================================
// Shared Utilities
// ===========================================

/// Finds a project by id, then by exact name.
pub(crate) fn find_project(store: &SqliteStore, selector: &str) -> Result<Project> {
    let selector = selector.trim();
    if let Ok(id) = selector.parse::<ProjectId>()
        && let Some(project) = store.get_project(id)?
    {
        return Ok(project);
    }
    store
        .find_project_by_name(selector)?
        .ok_or_else(|| anyhow!("no project matches '{}'", selector))
}

/// Resolves a numeration that must name a template.
pub(crate) fn template_id_at(tree: &ProjectTree, numeration: &Numeration) -> Result<TemplateId> {
    match tree.node_at(numeration)? {
        NodeRef::Template(id) => Ok(id),
        NodeRef::Category(_) => bail!("{} is a category, not a template", numeration),
    }
}

/// Numeration of a node, for status messages.
pub(crate) fn numeration_of(tree: &ProjectTree, node: NodeRef) -> String {
    tree.get(node)
        .map(|n| n.numeration().to_string())
        .unwrap_or_else(|| "?".to_string())
}

/// Prints renumber failures to stderr; they are already logged as warnings.
pub(crate) fn report_failures(report: &RenumberReport) {
    if report.is_clean() {
        return;
    }
    eprintln!(
        "warning: {} of {} positions could not be saved",
        report.failures.len(),
        report.visited
    );
    for failure in &report.failures {
        eprintln!("  {} ({}): {}", failure.numeration, failure.node, failure.error);
    }
}
