//! Service layer - migration orchestration
//!
//! Each service focuses on one part of the migration flow: discovering
//! scripts, tracking applied versions, executing scripts and driving the
//! schema between versions.

pub mod executor;
pub mod locator;
pub mod migration;
pub mod scaffold;
pub mod version_store;

pub use executor::{split_statements, ScriptExecutor};
pub use locator::{find_scripts, read_script};
pub use migration::Migrator;
pub use scaffold::{create_script_pair, next_version};
pub use version_store::VersionStore;
