//! Cinestat CLI - Film dataset reports
//!
//! A command-line interface for importing a film collection and running the
//! thirteen analytical reports over it.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cinestat_core::db::DB_PATH_ENV;
use cinestat_core::ReportKind;

#[derive(Parser)]
#[command(name = "cinestat")]
#[command(author, version, about = "Film dataset report CLI", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: table (default) or json
    #[arg(long, global = true, default_value = "table")]
    format: output::OutputFormat,

    /// Suppress progress messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Override database path (or set CINESTAT_DB_PATH env var)
    #[arg(long, env = "CINESTAT_DB_PATH", global = true)]
    db: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available reports
    List,

    /// Run a report by number or name
    Run {
        /// Report number (1-13) or name, e.g. `films-per-year`
        report: ReportKind,

        /// Read films from a JSON file instead of the database
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Import films from a JSON array or JSON-lines file
    Import {
        /// Dataset file
        file: PathBuf,

        /// Remove existing films first
        #[arg(long)]
        replace: bool,
    },

    /// Manage the high Metascore / high revenue view
    View {
        #[command(subcommand)]
        action: commands::view::ViewAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Set up database path if provided
    if let Some(db_path) = &cli.db {
        std::env::set_var(DB_PATH_ENV, db_path);
    }

    // The database is opened by the commands that need it
    let ctx = commands::Context {
        format: cli.format,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::List => commands::list::execute(&ctx),
        Commands::Run { report, file } => commands::run::execute(&ctx, report, file).await,
        Commands::Import { file, replace } => commands::import::execute(&ctx, &file, replace).await,
        Commands::View { action } => commands::view::execute(&ctx, action).await,
        Commands::Config { action } => commands::config::execute(&ctx, action),
    }
}
