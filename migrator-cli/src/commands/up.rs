//! Up command - apply every pending migration

use anyhow::Result;

use super::{get_context, Options};
use crate::output;

pub fn run(options: &Options, json: bool) -> Result<()> {
    let ctx = get_context(options)?;
    let report = ctx.migrator()?.up()?;
    output::report(&report, "applied", json)
}
