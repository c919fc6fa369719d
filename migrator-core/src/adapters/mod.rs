//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - DuckDB for the Database port

pub mod duckdb;

#[cfg(test)]
pub mod database_mock;
