//! Migrator Core - versioned SQL migrations
//!
//! Applies ordered change scripts to a database and records which version is
//! applied, so a schema can be moved up, down or to any version:
//!
//! - **domain**: Script naming, applied-version records, errors
//! - **ports**: The database capability the engine consumes
//! - **services**: Locator, version store, executor and the engine
//! - **adapters**: Concrete implementations (DuckDB)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types at crate root
pub use adapters::duckdb::DuckDbDatabase;
pub use config::Config;
pub use domain::{
    AppliedVersion, Direction, Error, ExecutionError, MigrationReport, Result, ScriptStatus,
    DEFAULT_TABLE_NAME,
};
pub use ports::{Database, DatabaseTransaction};
pub use services::Migrator;
