//! Tree display, move, and renumber handlers.

use anyhow::{Result, bail};

use super::{Session, numeration_of};
use crate::cli::output::{Output, OutputFormat, TreeListing, tree_line};
use crate::cli::{MvArgs, TreeArgs};

pub fn handle_tree(args: &TreeArgs, session: &Session) -> Result<()> {
    let tree = session.tree()?;

    match args.format {
        OutputFormat::Human => {
            if tree.is_empty() {
                println!("No categories yet.");
            }
            for node in tree.walk() {
                println!("{}", tree_line(node));
            }
        }
        OutputFormat::Json => {
            let listings: Vec<TreeListing> = tree.walk().map(TreeListing::from).collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
    }
    Ok(())
}

/// Moves a node in the loaded tree and renumbers the whole project.
///
/// Without `--into` or `--root` the node stays under its current parent and
/// only `--at` changes its place.
pub fn handle_mv(args: &MvArgs, session: &mut Session) -> Result<()> {
    if args.into.is_none() && !args.root && args.at.is_none() {
        bail!("nothing to do: give --into, --root, or --at");
    }

    let mut tree = session.tree()?;
    let node = tree.node_at(&args.node)?;

    let new_parent = if args.root {
        None
    } else if let Some(into) = &args.into {
        Some(tree.category_at(into)?)
    } else {
        tree.get(node).and_then(|n| n.parent())
    };
    let index = args.at.map(|at| at as usize - 1);

    tree.move_node(node, new_parent, index)?;
    session.flush(&mut tree);
    println!("Moved {} to {}", args.node, numeration_of(&tree, node));
    Ok(())
}

pub fn handle_renumber(session: &mut Session) -> Result<()> {
    let project = session.project()?;
    let mut tree = session.tree()?;
    let report = session.flush(&mut tree);
    println!(
        "Renumbered {} of {} nodes in {}",
        report.written, report.visited, project.name
    );
    Ok(())
}
