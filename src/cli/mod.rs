//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::Numeration;
use output::OutputFormat;

/// tabula - numbered categories of table templates
#[derive(Parser, Debug)]
#[command(name = "tabula", version, about, long_about = None)]
pub struct Cli {
    /// Database file (overrides config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Project to work on, by id or name (overrides config file)
    #[arg(short, long, global = true)]
    pub project: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create, list, rename, and remove projects
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Show the numbered category tree of the project
    Tree(TreeArgs),

    /// Create, rename, and remove categories
    #[command(subcommand)]
    Category(CategoryCommand),

    /// Create, edit, show, and remove templates
    #[command(subcommand)]
    Template(TemplateCommand),

    /// Move a category or template, then renumber
    Mv(MvArgs),

    /// Recompute and store every position and depth
    Renumber,

    /// Edit the table of a template
    #[command(subcommand)]
    Table(TableCommand),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ===========================================
// Projects
// ===========================================

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// Create a project
    New {
        /// Project name
        name: String,
    },

    /// List projects
    #[command(name = "ls")]
    List {
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
    },

    /// Rename a project
    Rename {
        /// Project id or name
        #[arg(value_name = "PROJECT")]
        target: String,
        /// New name
        name: String,
    },

    /// Remove a project with everything in it
    #[command(name = "rm")]
    Remove {
        /// Project id or name
        #[arg(value_name = "PROJECT")]
        target: String,
    },
}

// ===========================================
// Tree
// ===========================================

/// Arguments for the `tree` command
#[derive(Parser, Debug)]
pub struct TreeArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `mv` command
#[derive(Parser, Debug)]
pub struct MvArgs {
    /// Numeration of the node to move (e.g. 2.1)
    pub node: Numeration,

    /// Category to move into
    #[arg(long, conflicts_with = "root")]
    pub into: Option<Numeration>,

    /// Move to the top level (categories only)
    #[arg(long)]
    pub root: bool,

    /// 1-based position among the new siblings (default: last)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub at: Option<u32>,
}

// ===========================================
// Categories
// ===========================================

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// Create a category at the end of its parent
    New {
        /// Category name
        name: String,
        /// Parent category numeration (top level if omitted)
        #[arg(long)]
        parent: Option<Numeration>,
    },

    /// Rename a category
    Rename {
        /// Category numeration
        node: Numeration,
        /// New name
        name: String,
    },

    /// Remove a category
    #[command(name = "rm")]
    Remove {
        /// Category numeration
        node: Numeration,
        /// Keep the contents: move children up to the parent instead of
        /// deleting them
        #[arg(long)]
        unpack: bool,
    },
}

// ===========================================
// Templates
// ===========================================

#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// Create an empty template at the end of a category
    New {
        /// Template name
        name: String,
        /// Category numeration
        #[arg(long)]
        parent: Numeration,
    },

    /// Rename a template
    Rename {
        /// Template numeration
        node: Numeration,
        /// New name
        name: String,
    },

    /// Remove a template and its table
    #[command(name = "rm")]
    Remove {
        /// Template numeration
        node: Numeration,
    },

    /// Show or set a template's notes
    Notes {
        /// Template numeration
        node: Numeration,
        /// Replace the notes
        #[arg(long)]
        notes: Option<String>,
        /// Replace the programming notes
        #[arg(long)]
        programming_notes: Option<String>,
    },

    /// Show a template with its notes and table
    Show {
        /// Template numeration
        node: Numeration,
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
    },
}

// ===========================================
// Tables
// ===========================================

#[derive(Subcommand, Debug)]
pub enum TableCommand {
    /// Append an empty row
    AddRow {
        /// Template numeration
        node: Numeration,
    },

    /// Append a column
    AddColumn {
        /// Template numeration
        node: Numeration,
        /// Column header
        header: String,
    },

    /// Set the content of one cell
    Set {
        /// Template numeration
        node: Numeration,
        /// Row order (0-based)
        row: usize,
        /// Column order (0-based)
        column: usize,
        /// New content
        content: String,
    },

    /// Remove a row (0-based); later rows move up
    #[command(name = "rm-row")]
    RemoveRow {
        /// Template numeration
        node: Numeration,
        /// Row order
        row: usize,
    },

    /// Remove a column (0-based); later columns move left
    #[command(name = "rm-column")]
    RemoveColumn {
        /// Template numeration
        node: Numeration,
        /// Column order
        column: usize,
    },

    /// Change a column header
    Header {
        /// Template numeration
        node: Numeration,
        /// Column order (0-based)
        column: usize,
        /// New header
        header: String,
    },

    /// Rearrange rows, e.g. `2,0,1` puts the current row 2 first
    ReorderRows {
        /// Template numeration
        node: Numeration,
        /// Current row orders in their new sequence
        #[arg(value_delimiter = ',', required = true)]
        order: Vec<usize>,
    },

    /// Rearrange columns, e.g. `1,0` swaps the first two
    ReorderColumns {
        /// Template numeration
        node: Numeration,
        /// Current column orders in their new sequence
        #[arg(value_delimiter = ',', required = true)]
        order: Vec<usize>,
    },

    /// Replace the whole table from a JSON file (`-` for stdin)
    Import {
        /// Template numeration
        node: Numeration,
        /// JSON file with `headers` and `rows`
        file: PathBuf,
    },

    /// Write the table as JSON
    Export {
        /// Template numeration
        node: Numeration,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
