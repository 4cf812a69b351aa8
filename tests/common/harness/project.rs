//! Builder for seeding projects in tests.

// Allow dead code since this is a test utility shared by several test crates
#![allow(dead_code)]

/// One item to create when the project is seeded.
#[derive(Debug, Clone)]
pub(crate) enum Seed {
    Category {
        name: String,
        parent: Option<String>,
    },
    Template {
        name: String,
        category: String,
    },
    Table {
        template: String,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

/// Builder for a project with categories, templates, and tables.
///
/// Nodes refer to their parents by name, so names must be unique within
/// one builder. Items are created in the order they were added.
#[derive(Debug, Clone)]
pub struct TestProject {
    pub(crate) name: String,
    pub(crate) seeds: Vec<Seed>,
}

impl TestProject {
    /// Creates a builder for a project with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            seeds: Vec::new(),
        }
    }

    /// Adds a top-level category.
    pub fn category(mut self, name: &str) -> Self {
        self.seeds.push(Seed::Category {
            name: name.to_string(),
            parent: None,
        });
        self
    }

    /// Adds a category under a previously added category.
    pub fn category_in(mut self, parent: &str, name: &str) -> Self {
        self.seeds.push(Seed::Category {
            name: name.to_string(),
            parent: Some(parent.to_string()),
        });
        self
    }

    /// Adds a template under a previously added category.
    pub fn template_in(mut self, category: &str, name: &str) -> Self {
        self.seeds.push(Seed::Template {
            name: name.to_string(),
            category: category.to_string(),
        });
        self
    }

    /// Fills the table of a previously added template.
    pub fn table(mut self, template: &str, headers: &[&str], rows: &[&[&str]]) -> Self {
        self.seeds.push(Seed::Table {
            template: template.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        });
        self
    }

    /// Returns the project name.
    pub fn get_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_records_items_in_order() {
        let project = TestProject::new("Backend")
            .category("Models")
            .category_in("Models", "Auth")
            .template_in("Auth", "Tokens")
            .table("Tokens", &["name"], &[&["id"]]);

        assert_eq!(project.get_name(), "Backend");
        assert_eq!(project.seeds.len(), 4);
        assert!(matches!(
            &project.seeds[1],
            Seed::Category { parent: Some(p), .. } if p == "Models"
        ));
        assert!(matches!(&project.seeds[3], Seed::Table { rows, .. } if rows.len() == 1));
    }
}
