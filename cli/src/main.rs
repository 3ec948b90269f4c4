//! Command-line interface for the papershelf reference manager.
//!
//! Commands:
//! - search: resolve a paper by title or author, with disambiguation
//! - add: store a new paper with authors and bib entry
//! - update: change paper fields, bib text, or author lists
//! - init: create the database schema
//! - shell: interactive menu (search / add / update)
//!
//! Connection parameters come from `--database-url` (or `DATABASE_URL`),
//! or from a sectioned profile file via `--config` / `--section`.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{
    add::AddArgs, search::SearchArgs, update::UpdateArgs,
};

/// Personal offline reference manager
///
/// Stores publication metadata in PostgreSQL and looks papers up by
/// exact title or author name when the usual online indices are out of
/// reach.
#[derive(Parser)]
#[command(name = "papershelf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Database connection URL (overrides --config)
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    /// Connection profile file (TOML with named sections)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Section of the profile file to use
    #[arg(long, default_value = "postgresql", global = true)]
    section: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a paper by title or author
    Search(SearchArgs),

    /// Add a new paper with its authors and bib entry
    Add(AddArgs),

    /// Update a stored paper, bib entry, or author
    Update(UpdateArgs),

    /// Create the database schema (idempotent)
    Init,

    /// Interactive menu: search, add, update
    Shell,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let store = match commands::connect(
        cli.database_url.as_deref(),
        cli.config.as_deref(),
        &cli.section,
    )
    .await
    {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Search(args) => commands::search::execute(&store, args).await,
        Commands::Add(args) => commands::add::execute(&store, args).await,
        Commands::Update(args) => commands::update::execute(&store, args).await,
        Commands::Init => commands::init(&store).await,
        Commands::Shell => commands::shell::execute(&store).await,
    };

    // The pool is released on every exit path.
    store.close().await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
