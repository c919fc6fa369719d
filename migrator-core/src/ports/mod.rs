//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The engine depends
//! only on these traits, not on a concrete database driver.

mod database;

pub use database::{Database, DatabaseTransaction};
