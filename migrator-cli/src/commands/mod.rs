//! CLI command implementations

pub mod down;
pub mod goto;
pub mod init;
pub mod new;
pub mod status;
pub mod up;
pub mod version;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use migrator_core::{Config, DuckDbDatabase, Migrator};

/// Options shared by every command; flags win over migrator.json and env
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub project: Option<PathBuf>,
    pub database: Option<PathBuf>,
    pub dir: Option<PathBuf>,
    pub table: Option<String>,
}

/// Open database plus the configuration it came from
pub struct Context {
    pub config: Config,
    pub db: DuckDbDatabase,
}

impl Context {
    /// Engine over this context's database
    pub fn migrator(&self) -> Result<Migrator<'_>> {
        let migrator = Migrator::with_table(
            &self.db,
            self.config.migrations_path(),
            &self.config.table_name,
        )?;
        Ok(migrator)
    }
}

/// Get the project directory from the flag or the current directory
pub fn get_project_dir(options: &Options) -> Result<PathBuf> {
    match &options.project {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .context("Could not determine current directory"),
    }
}

/// Load configuration and apply command line overrides
pub fn load_config(options: &Options) -> Result<Config> {
    let project_dir = get_project_dir(options)?;
    let mut config = Config::load(&project_dir)?;

    if let Some(database) = &options.database {
        config.database = database.clone();
    }
    if let Some(dir) = &options.dir {
        config.migrations_dir = dir.clone();
    }
    if let Some(table) = &options.table {
        config.table_name = table.clone();
    }

    Ok(config)
}

/// Load configuration and open the database
pub fn get_context(options: &Options) -> Result<Context> {
    let config = load_config(options)?;
    let db_path = config.database_path();
    log::debug!("Opening database {}", db_path.display());

    let db = DuckDbDatabase::open(&db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

    Ok(Context { config, db })
}
