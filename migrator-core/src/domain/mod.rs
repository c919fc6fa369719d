//! Core domain types
//!
//! Script naming, applied-version records and error types. Pure data, no I/O.

pub mod result;
mod script;
mod version;

pub use result::{Error, ExecutionError, Result};
pub use script::{script_version, Direction, ScriptStatus, SUFFIX_DOWN, SUFFIX_UP};
pub use version::{AppliedVersion, MigrationReport, DEFAULT_TABLE_NAME};
