//! Migration script naming
//!
//! Script files are named `<version>_<description>.<direction>.sql`. Versions
//! are compared as plain strings, so they must be fixed-width and zero-padded
//! (`001`, `002`, ...) for the order to match the numbering.

use serde::{Deserialize, Serialize};

/// Suffix of forward scripts
pub const SUFFIX_UP: &str = "up.sql";

/// Suffix of revert scripts
pub const SUFFIX_DOWN: &str = "down.sql";

/// Direction a script moves the schema in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// File suffix that selects scripts of this direction
    pub fn suffix(&self) -> &'static str {
        match self {
            Direction::Up => SUFFIX_UP,
            Direction::Down => SUFFIX_DOWN,
        }
    }

    /// Down scripts are walked newest first
    pub fn descending(&self) -> bool {
        matches!(self, Direction::Down)
    }
}

/// Version token of a script file: everything before the first `_`.
///
/// A name without `_` is its own version.
pub fn script_version(file_name: &str) -> &str {
    file_name
        .split_once('_')
        .map_or(file_name, |(version, _)| version)
}

/// One up-script and whether its version is recorded as applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStatus {
    pub version: String,
    pub file_name: String,
    pub applied: bool,
}
