//! tabula - numbered categories of table templates, stored in SQLite

pub mod cli;
pub mod domain;
pub mod store;
pub mod tree;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::filter::LevelFilter;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        Session, handle_category, handle_mv, handle_project, handle_renumber, handle_table,
        handle_template, handle_tree,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    init_tracing(config.log_level(cli.verbose)?);

    if let Command::Completions(args) = &cli.command {
        clap_complete::generate(
            args.shell,
            &mut Cli::command(),
            "tabula",
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    let db_path = config.database_path(cli.db.as_ref());
    let mut session = Session::open(&db_path, config.project(cli.project.as_deref()))?;

    match &cli.command {
        Command::Project(command) => handle_project(command, &mut session),
        Command::Tree(args) => handle_tree(args, &session),
        Command::Category(command) => handle_category(command, &mut session),
        Command::Template(command) => handle_template(command, &mut session),
        Command::Mv(args) => handle_mv(args, &mut session),
        Command::Renumber => handle_renumber(&mut session),
        Command::Table(command) => handle_table(command, &mut session),
        Command::Completions(_) => Ok(()),
    }
}

/// Installs the stderr log subscriber. Later calls are ignored.
fn init_tracing(level: LevelFilter) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
