//! Template command handlers.

use anyhow::{Context, Result};

use super::{Session, numeration_of, template_id_at};
use crate::cli::TemplateCommand;
use crate::cli::output::{Output, OutputFormat, TemplateView, render_grid};
use crate::domain::{NodeRef, TemplateUpdate};

pub fn handle_template(command: &TemplateCommand, session: &mut Session) -> Result<()> {
    match command {
        TemplateCommand::New { name, parent } => {
            let mut tree = session.tree()?;
            let category = tree.category_at(parent)?;
            let template = session
                .store_mut()
                .create_template(category, name)
                .context("failed to create template")?;

            let node = NodeRef::Template(template.id);
            tree.push(node, template.name.clone(), Some(category))?;
            session.flush(&mut tree);
            println!(
                "Created template {} {}",
                numeration_of(&tree, node),
                template.name
            );
        }
        TemplateCommand::Rename { node, name } => {
            let id = template_id_at(&session.tree()?, node)?;
            session
                .store_mut()
                .update_template(id, &TemplateUpdate::default().name(name.as_str()))
                .with_context(|| format!("failed to rename template {}", node))?;
            println!("Renamed template {} to {}", node, name.trim());
        }
        TemplateCommand::Remove { node } => {
            let mut tree = session.tree()?;
            let id = template_id_at(&tree, node)?;
            session
                .store_mut()
                .delete_template(id)
                .with_context(|| format!("failed to remove template {}", node))?;
            tree.remove_subtree(NodeRef::Template(id))?;
            session.flush(&mut tree);
            println!("Removed template {}", node);
        }
        TemplateCommand::Notes {
            node,
            notes,
            programming_notes,
        } => {
            let template = session.template_at(node)?;
            let mut update = TemplateUpdate::default();
            if let Some(notes) = notes {
                update = update.notes(notes.as_str());
            }
            if let Some(programming_notes) = programming_notes {
                update = update.programming_notes(programming_notes.as_str());
            }

            if update.is_empty() {
                println!("Notes:\n{}", template.notes);
                println!();
                println!("Programming notes:\n{}", template.programming_notes);
            } else {
                session
                    .store_mut()
                    .update_template(template.id, &update)
                    .with_context(|| format!("failed to update notes of template {}", node))?;
                println!("Updated notes of template {}", node);
            }
        }
        TemplateCommand::Show { node, format } => {
            let template = session.template_at(node)?;
            let table = session.store().load_table(template.id)?;

            match format {
                OutputFormat::Human => {
                    println!("{} {}", node, template.name);
                    if !template.notes.is_empty() {
                        println!();
                        println!("{}", template.notes);
                    }
                    if !template.programming_notes.is_empty() {
                        println!();
                        println!("Programming notes:");
                        println!("{}", template.programming_notes);
                    }
                    println!();
                    if table.column_count() == 0 {
                        println!("(empty table)");
                    } else {
                        println!("{}", render_grid(&table));
                    }
                }
                OutputFormat::Json => {
                    let view = TemplateView {
                        numeration: node.to_string(),
                        template: &template,
                        table: &table,
                    };
                    println!("{}", serde_json::to_string_pretty(&Output::new(view))?);
                }
            }
        }
    }
    Ok(())
}
