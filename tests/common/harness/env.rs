//! Isolated test environment with temp directory.

use super::project::Seed;
use super::{TabulaCommand, TestProject};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tabula::domain::{CategoryId, ProjectId, TemplateId};
use tabula::store::SqliteStore;
use tabula::tree::ProjectTree;
use tempfile::TempDir;

/// Isolated test environment with a temporary database and config home.
///
/// Creates a temp directory that is automatically cleaned up on drop.
/// Commands run with `HOME` and `XDG_CONFIG_HOME` pointed inside it, so a
/// user's real config file never leaks into a test.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Root of the environment
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the root directory of the environment.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the SQLite database used by `cmd()`.
    pub fn db_path(&self) -> PathBuf {
        self.root.join("data").join("tabula.db")
    }

    /// Returns the directory used as the config home.
    pub fn config_home(&self) -> PathBuf {
        self.root.join("config")
    }

    /// Opens the environment's database directly.
    pub fn store(&self) -> Result<SqliteStore> {
        Ok(SqliteStore::open(&self.db_path())?)
    }

    /// Creates a project from a builder and renumbers it, as the CLI would.
    pub fn add_project(&self, project: &TestProject) -> Result<ProjectId> {
        let mut store = self.store()?;
        let created = store.create_project(project.get_name())?;

        let mut categories: HashMap<String, CategoryId> = HashMap::new();
        let mut templates: HashMap<String, TemplateId> = HashMap::new();

        for seed in &project.seeds {
            match seed {
                Seed::Category { name, parent } => {
                    let parent_id = match parent {
                        Some(p) => Some(
                            *categories
                                .get(p)
                                .with_context(|| format!("unknown category {p}"))?,
                        ),
                        None => None,
                    };
                    let category = store.create_category(created.id, parent_id, name)?;
                    categories.insert(name.clone(), category.id);
                }
                Seed::Template { name, category } => {
                    let category_id = *categories
                        .get(category)
                        .with_context(|| format!("unknown category {category}"))?;
                    let template = store.create_template(category_id, name)?;
                    templates.insert(name.clone(), template.id);
                }
                Seed::Table {
                    template,
                    headers,
                    rows,
                } => {
                    let template_id = *templates
                        .get(template)
                        .with_context(|| format!("unknown template {template}"))?;
                    store.save_table(template_id, Some(headers.as_slice()), Some(rows.as_slice()))?;
                }
            }
        }

        let mut tree = ProjectTree::load(&store, created.id)?;
        let report = tree.renumber(&mut store);
        anyhow::ensure!(report.is_clean(), "renumber failed: {:?}", report.failures);
        Ok(created.id)
    }

    /// Creates a TabulaCommand configured for this test environment.
    pub fn cmd(&self) -> TabulaCommand {
        TabulaCommand::new()
            .env("HOME", &self.root)
            .env("XDG_CONFIG_HOME", &self.config_home())
            .db(&self.db_path())
    }

    /// Writes the config file the CLI reads and returns its path.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let dir = self.config_home().join("tabula");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        let path = dir.join("config.toml");
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// Writes a file to the test environment and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // TestEnv Foundation
    // ===========================================

    #[test]
    fn test_env_creates_temp_directory() {
        let env = TestEnv::new();
        assert!(env.root().is_dir(), "root should be a directory");
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(
            !path.exists(),
            "temp directory should be cleaned up on drop"
        );
    }

    #[test]
    fn test_env_db_path_is_inside_root() {
        let env = TestEnv::new();
        assert!(env.db_path().starts_with(env.root()));
        assert!(env.db_path().ends_with("data/tabula.db"));
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--db");
        assert_eq!(args[1], env.db_path().to_string_lossy());
    }

    // ===========================================
    // Seeding
    // ===========================================

    #[test]
    fn test_env_add_project_creates_tree() {
        let env = TestEnv::new();
        let project = TestProject::new("Backend")
            .category("Models")
            .category_in("Models", "Auth")
            .template_in("Models", "Users")
            .table("Users", &["name", "type"], &[&["id", "integer"]]);

        let id = env.add_project(&project).expect("Should seed project");

        let store = env.store().unwrap();
        let tree = ProjectTree::load(&store, id).unwrap();
        let outline: Vec<String> = tree
            .walk()
            .map(|n| format!("{} {}", n.numeration(), n.name()))
            .collect();
        assert_eq!(outline, vec!["1 Models", "1.1 Auth", "1.2 Users"]);
    }

    #[test]
    fn test_env_add_project_rejects_unknown_parent() {
        let env = TestEnv::new();
        let project = TestProject::new("Broken").category_in("Missing", "Child");
        assert!(env.add_project(&project).is_err());
    }
}
