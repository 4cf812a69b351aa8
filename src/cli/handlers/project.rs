//! Project command handlers.

use anyhow::{Context, Result};

use super::{Session, find_project};
use crate::cli::ProjectCommand;
use crate::cli::output::{Output, OutputFormat, ProjectListing};

pub fn handle_project(command: &ProjectCommand, session: &mut Session) -> Result<()> {
    match command {
        ProjectCommand::New { name } => {
            let project = session
                .store_mut()
                .create_project(name)
                .context("failed to create project")?;
            println!("Created project {}: {}", project.id, project.name);
        }
        ProjectCommand::List { format } => {
            let projects = session.store().list_projects()?;
            match format {
                OutputFormat::Human => {
                    if projects.is_empty() {
                        println!("No projects found.");
                    } else {
                        println!("{:>4}  Name", "ID");
                        for project in &projects {
                            println!("{:>4}  {}", project.id, project.name);
                        }
                    }
                }
                OutputFormat::Json => {
                    let listings: Vec<ProjectListing> = projects
                        .iter()
                        .map(|p| ProjectListing {
                            id: p.id.get(),
                            name: p.name.clone(),
                        })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
                }
            }
        }
        ProjectCommand::Rename { target, name } => {
            let project = find_project(session.store(), target)?;
            session
                .store_mut()
                .rename_project(project.id, name)
                .with_context(|| format!("failed to rename project {}", project.id))?;
            println!("Renamed project {}: {} -> {}", project.id, project.name, name.trim());
        }
        ProjectCommand::Remove { target } => {
            let project = find_project(session.store(), target)?;
            session
                .store_mut()
                .delete_project(project.id)
                .with_context(|| format!("failed to remove project {}", project.id))?;
            println!("Removed project {}: {}", project.id, project.name);
        }
    }
    Ok(())
}
