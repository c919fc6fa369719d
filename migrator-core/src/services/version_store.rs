//! Version store - the tracking table of applied versions
//!
//! One row per applied version. Rows are inserted when an up script commits
//! and deleted when the matching down script commits; they are never updated.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{AppliedVersion, Error, Result, DEFAULT_TABLE_NAME};
use crate::ports::Database;

static TABLE_NAME: OnceLock<Regex> = OnceLock::new();

fn table_name_pattern() -> &'static Regex {
    TABLE_NAME.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
            .expect("table name pattern is valid")
    })
}

/// Tracking table accessor
pub struct VersionStore<'a> {
    db: &'a dyn Database,
    table: String,
}

impl<'a> VersionStore<'a> {
    /// Create a store over `table`; an empty name selects the default table.
    ///
    /// The name is interpolated into SQL, so it must be a plain identifier,
    /// optionally schema-qualified.
    pub fn new(db: &'a dyn Database, table: &str) -> Result<Self> {
        let table = if table.is_empty() {
            DEFAULT_TABLE_NAME
        } else {
            table
        };

        if !table_name_pattern().is_match(table) {
            return Err(Error::validation(format!(
                "invalid migration table name: {:?}",
                table
            )));
        }

        Ok(Self {
            db,
            table: table.to_string(),
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Create the tracking table if it does not exist yet
    pub fn ensure_initialized(&self) -> Result<()> {
        self.db
            .execute(
                &format!(
                    "CREATE TABLE IF NOT EXISTS {} (version VARCHAR, \"timestamp\" TIMESTAMP DEFAULT now())",
                    self.table
                ),
                &[],
            )
            .map_err(|e| {
                Error::store(format!(
                    "failed to initialize migration table {}: {}",
                    self.table, e
                ))
            })?;
        Ok(())
    }

    /// Highest applied version, or "" when nothing is applied
    pub fn current_version(&self) -> Result<String> {
        let rows = self.db.query(
            &format!(
                "SELECT version FROM {} WHERE version IS NOT NULL ORDER BY version DESC LIMIT 1",
                self.table
            ),
            &[],
            1,
        )?;

        Ok(rows
            .into_iter()
            .next()
            .and_then(|row| row.into_iter().next().flatten())
            .unwrap_or_default())
    }

    /// All applied versions, oldest first
    pub fn applied(&self) -> Result<Vec<AppliedVersion>> {
        let rows = self.db.query(
            &format!(
                "SELECT version, CAST(\"timestamp\" AS VARCHAR) FROM {} WHERE version IS NOT NULL ORDER BY version",
                self.table
            ),
            &[],
            2,
        )?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let mut cols = row.into_iter();
                let version = cols.next().flatten()?;
                let applied_at = cols.next().flatten();
                Some(AppliedVersion::from_text(version, applied_at.as_deref()))
            })
            .collect())
    }

    /// Insert a row for `version`. Duplicates are not checked here.
    pub fn record_applied(&self, version: &str) -> Result<()> {
        self.db.execute(
            &format!("INSERT INTO {} (version) VALUES (?)", self.table),
            &[version],
        )?;
        Ok(())
    }

    /// Delete every row for `version`
    pub fn record_reverted(&self, version: &str) -> Result<()> {
        self.db.execute(
            &format!("DELETE FROM {} WHERE version = ?", self.table),
            &[version],
        )?;
        Ok(())
    }
}
