//! New command - scaffold the next migration script pair

use anyhow::Result;
use colored::Colorize;

use migrator_core::services::create_script_pair;

use super::{load_config, Options};

pub fn run(options: &Options, description: &str) -> Result<()> {
    let config = load_config(options)?;
    let (up, down) = create_script_pair(&config.migrations_path(), description)?;

    println!("{} Created migration scripts", "✓".green());
    println!("  {}", up.display());
    println!("  {}", down.display());

    Ok(())
}
