//! Applied-version records and run reports

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Default name of the tracking table
pub const DEFAULT_TABLE_NAME: &str = "schema_migrations";

/// A row of the tracking table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedVersion {
    pub version: String,
    /// None when the stored timestamp could not be parsed
    pub applied_at: Option<NaiveDateTime>,
}

impl AppliedVersion {
    /// Build a record from the text columns returned by the database
    pub fn from_text(version: String, applied_at: Option<&str>) -> Self {
        let applied_at = applied_at
            .and_then(|s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok());
        Self {
            version,
            applied_at,
        }
    }
}

/// Outcome of an up/down run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationReport {
    /// Script files executed, in execution order
    pub scripts: Vec<String>,
    /// Current version once the run stopped ("" when nothing is applied)
    pub version: String,
}

impl MigrationReport {
    pub fn is_noop(&self) -> bool {
        self.scripts.is_empty()
    }
}
