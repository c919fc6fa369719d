//! Migrator CLI - versioned SQL migrations from the terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{down, goto, init, new, status, up, version, Options};

/// Migrator - apply and revert versioned SQL scripts
#[derive(Parser)]
#[command(name = "migrator", version, about, long_about = None)]
struct Cli {
    /// Project directory containing migrator.json (defaults to the current directory)
    #[arg(long, global = true, env = "MIGRATOR_PROJECT")]
    project: Option<PathBuf>,

    /// Database file, relative to the project directory
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Directory holding the migration scripts
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Table that tracks applied versions
    #[arg(long, global = true)]
    table: Option<String>,

    /// Show debug output
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply every pending migration
    Up {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Revert every applied migration
    Down {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move the schema to a specific version
    Goto {
        /// Target version, e.g. 003
        version: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the applied version
    Version {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show applied and pending migrations
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create the next up/down script pair
    New {
        /// Short description, used in the file names
        description: String,
    },

    /// Write migrator.json and create the scripts directory
    Init,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let options = Options {
        project: cli.project,
        database: cli.database,
        dir: cli.dir,
        table: cli.table,
    };

    match cli.command {
        Commands::Up { json } => up::run(&options, json),
        Commands::Down { force, json } => down::run(&options, force, json),
        Commands::Goto { version: target, json } => goto::run(&options, &target, json),
        Commands::Version { json } => version::run(&options, json),
        Commands::Status { json } => status::run(&options, json),
        Commands::New { description } => new::run(&options, &description),
        Commands::Init => init::run(&options),
    }
}
