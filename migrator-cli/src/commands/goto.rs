//! Goto command - move the schema to a specific version

use anyhow::Result;

use super::{get_context, Options};
use crate::output;

pub fn run(options: &Options, version: &str, json: bool) -> Result<()> {
    let ctx = get_context(options)?;
    let migrator = ctx.migrator()?;

    let before = migrator.version()?;
    let report = migrator.set_version(version)?;
    let verb = if before.as_str() < version { "applied" } else { "reverted" };

    output::report(&report, verb, json)
}
