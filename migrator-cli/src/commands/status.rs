//! Status command - show applied and pending migrations

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use migrator_core::{AppliedVersion, ScriptStatus};

use super::{get_context, Options};
use crate::output;

#[derive(Serialize)]
struct StatusOutput {
    version: String,
    table: String,
    scripts: Vec<ScriptStatus>,
    /// Applied versions with no up script on disk
    orphaned: Vec<AppliedVersion>,
}

pub fn run(options: &Options, json: bool) -> Result<()> {
    let ctx = get_context(options)?;
    let migrator = ctx.migrator()?;

    let version = migrator.version()?;
    let scripts = migrator.status()?;
    let applied = migrator.applied()?;
    let orphaned: Vec<AppliedVersion> = applied
        .iter()
        .filter(|a| !scripts.iter().any(|s| s.version == a.version))
        .cloned()
        .collect();

    if json {
        let output = StatusOutput {
            version,
            table: migrator.table_name().to_string(),
            scripts,
            orphaned,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Migration Status".bold());
    println!();
    println!("Database: {}", ctx.config.database_path().display());
    println!("Scripts:  {}", migrator.scripts_dir().display());
    println!("Version:  {}", output::format_version(&version));
    println!();

    if scripts.is_empty() {
        output::warning("No migration scripts found.");
    } else {
        let mut table = output::create_table();
        table.set_header(vec!["Version", "Script", "State", "Applied At"]);

        for script in &scripts {
            let applied_at = applied
                .iter()
                .find(|a| a.version == script.version)
                .and_then(|a| a.applied_at)
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default();
            let state = if script.applied {
                "applied".green().to_string()
            } else {
                "pending".yellow().to_string()
            };
            table.add_row(vec![
                script.version.clone(),
                script.file_name.clone(),
                state,
                applied_at,
            ]);
        }

        println!("{}", table);
    }

    if !orphaned.is_empty() {
        println!();
        println!("{}", "Applied versions without an up script:".red().bold());
        for record in &orphaned {
            println!("  • {}", record.version);
        }
    }

    Ok(())
}
