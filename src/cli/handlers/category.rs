//! Category command handlers.

use anyhow::{Context, Result};

use super::{Session, numeration_of};
use crate::cli::CategoryCommand;
use crate::domain::{DeleteMode, NodeRef};

pub fn handle_category(command: &CategoryCommand, session: &mut Session) -> Result<()> {
    let project = session.project()?;
    let mut tree = session.tree()?;

    match command {
        CategoryCommand::New { name, parent } => {
            let parent_id = parent.as_ref().map(|p| tree.category_at(p)).transpose()?;
            let category = session
                .store_mut()
                .create_category(project.id, parent_id, name)
                .context("failed to create category")?;

            let node = NodeRef::Category(category.id);
            tree.push(node, category.name.clone(), parent_id)?;
            session.flush(&mut tree);
            println!(
                "Created category {} {}",
                numeration_of(&tree, node),
                category.name
            );
        }
        CategoryCommand::Rename { node, name } => {
            let id = tree.category_at(node)?;
            session
                .store_mut()
                .rename_category(id, name)
                .with_context(|| format!("failed to rename category {}", node))?;
            println!("Renamed category {} to {}", node, name.trim());
        }
        CategoryCommand::Remove { node, unpack } => {
            let id = tree.category_at(node)?;
            let mode = if *unpack {
                DeleteMode::Unpack
            } else {
                DeleteMode::Cascade
            };
            let outcome = session
                .store_mut()
                .delete_category(id, mode)
                .with_context(|| format!("failed to remove category {}", node))?;
            match mode {
                DeleteMode::Cascade => {
                    tree.remove_subtree(NodeRef::Category(id))?;
                }
                DeleteMode::Unpack => {
                    tree.unpack(id)?;
                }
            }
            session.flush(&mut tree);

            match mode {
                DeleteMode::Cascade => println!(
                    "Removed category {} with {} subcategories and {} templates",
                    node,
                    outcome.removed_categories.saturating_sub(1),
                    outcome.removed_templates
                ),
                DeleteMode::Unpack => println!(
                    "Unpacked category {}: moved up {} categories and {} templates",
                    node, outcome.promoted_categories, outcome.promoted_templates
                ),
            }
        }
    }
    Ok(())
}
