use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todomvc::app::TodoApp;
use todomvc::config::Config;
use todomvc::models::TodoId;
use todomvc::store::SqliteStorage;
use todomvc::view;

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "A small persisted to-do list")]
struct Cli {
    /// Database file (overrides config and TODOMVC_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Save --db as the default database, then print the database in use
    Config,
    #[command(flatten)]
    Todo(TodoCommand),
}

#[derive(Subcommand)]
enum TodoCommand {
    /// Show the list
    List,
    /// Add a todo
    Add {
        #[arg(required = true)]
        title: Vec<String>,
    },
    /// Flip a todo between done and not done
    Toggle { id: String },
    /// Change a todo's title
    Edit {
        id: String,
        #[arg(required = true)]
        title: Vec<String>,
    },
    /// Delete a todo
    Rm { id: String },
    /// Delete every completed todo
    ClearCompleted,
    /// Mark every todo done (or not done with --undone)
    ToggleAll {
        #[arg(long)]
        undone: bool,
    },
}

/// Logs go to stderr; stdout carries only the rendered list.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "todomvc=warn".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn warn_unknown(id: &TodoId) {
    eprintln!("No todo with id {id}");
}

fn run_config(mut config: Config, db: Option<PathBuf>) -> anyhow::Result<()> {
    if let Some(db) = db {
        config.database_path = Some(db);
        config.save()?;
    }
    println!("{}", config.database_path()?.display());
    Ok(())
}

fn run_todo(mut config: Config, db: Option<PathBuf>, command: TodoCommand) -> anyhow::Result<()> {
    if let Some(db) = db {
        config.database_path = Some(db);
    }

    let path = config.database_path()?;
    let storage = SqliteStorage::open(&path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;
    storage.migrate()?;

    let mut app = TodoApp::init(storage)?;

    match command {
        TodoCommand::List => {}
        TodoCommand::Add { title } => {
            if app.add(&title.join(" "))?.is_none() {
                eprintln!("Nothing to add: title is blank");
            }
        }
        TodoCommand::Toggle { id } => {
            let id = TodoId::from(id);
            if app.toggle(&id)?.is_none() {
                warn_unknown(&id);
            }
        }
        TodoCommand::Edit { id, title } => {
            let id = TodoId::from(id);
            if !app.edit(&id, &title.join(" "))? {
                warn_unknown(&id);
            }
        }
        TodoCommand::Rm { id } => {
            let id = TodoId::from(id);
            if app.destroy(&id)?.is_none() {
                warn_unknown(&id);
            }
        }
        TodoCommand::ClearCompleted => {
            app.clear_completed()?;
        }
        TodoCommand::ToggleAll { undone } => {
            app.toggle_all(!undone)?;
        }
    }

    print!("{}", view::render(app.list()));

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::load();

    match cli.command.unwrap_or(Commands::Todo(TodoCommand::List)) {
        Commands::Config => run_config(config, cli.db),
        Commands::Todo(command) => run_todo(config, cli.db, command),
    }
}
