//! Down command - revert every applied migration

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;

use super::{get_context, Options};
use crate::output;

pub fn run(options: &Options, force: bool, json: bool) -> Result<()> {
    let ctx = get_context(options)?;
    let migrator = ctx.migrator()?;

    let current = migrator.version()?;
    if current.is_empty() {
        return output::report(&Default::default(), "reverted", json);
    }

    // Confirm unless --force (JSON output is non-interactive)
    if !force && !json {
        println!(
            "\n{}",
            format!(
                "This will revert every migration up to and including {} in {}.",
                current,
                ctx.config.database_path().display()
            )
            .yellow()
        );
        println!("{}\n", "Data in the affected tables will be lost.".dimmed());

        if !Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let report = migrator.down()?;
    output::report(&report, "reverted", json)
}
