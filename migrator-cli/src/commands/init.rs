//! Init command - write migrator.json and the scripts directory

use anyhow::{Context, Result};
use colored::Colorize;

use migrator_core::config::SETTINGS_FILE;

use super::{load_config, Options};
use crate::output;

pub fn run(options: &Options) -> Result<()> {
    let config = load_config(options)?;

    let settings_path = config.project_dir().join(SETTINGS_FILE);
    if settings_path.exists() {
        output::warning(&format!("{} already exists, updating it", settings_path.display()));
    }

    let migrations = config.migrations_path();
    std::fs::create_dir_all(&migrations)
        .with_context(|| format!("Failed to create {}", migrations.display()))?;
    let saved = config.save()?;

    println!("{} Wrote {}", "✓".green(), saved.display());
    println!("  database:   {}", config.database_path().display());
    println!("  migrations: {}", migrations.display());
    println!("  table:      {}", config.table_name);

    Ok(())
}
