//! Version command - show the applied version

use anyhow::Result;
use serde::Serialize;

use super::{get_context, Options};
use crate::output;

#[derive(Serialize)]
struct VersionOutput {
    version: String,
    table: String,
}

pub fn run(options: &Options, json: bool) -> Result<()> {
    let ctx = get_context(options)?;
    let migrator = ctx.migrator()?;
    let version = migrator.version()?;

    if json {
        let output = VersionOutput {
            version,
            table: migrator.table_name().to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", output::format_version(&version));
    Ok(())
}
