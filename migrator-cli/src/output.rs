//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use migrator_core::MigrationReport;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Version for display; nothing applied shows as "(none)"
pub fn format_version(version: &str) -> String {
    if version.is_empty() {
        "(none)".to_string()
    } else {
        version.to_string()
    }
}

/// Print the outcome of an up/down/goto run
pub fn report(report: &MigrationReport, verb: &str, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    if report.is_noop() {
        info(&format!(
            "Nothing to do, at version {}",
            format_version(&report.version)
        ));
        return Ok(());
    }

    for script in &report.scripts {
        println!("  {} {}", verb.dimmed(), script);
    }
    success(&format!(
        "{} {} migration(s), now at version {}",
        capitalize(verb),
        report.scripts.len(),
        format_version(&report.version)
    ));
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
