//! Migration engine - moves the schema between versions
//!
//! The engine keeps no state between calls. Scripts are discovered fresh on
//! every operation and the applied versions live in the tracking table.
//!
//! Versions are compared as strings. Callers must use fixed-width,
//! zero-padded versions (`001`, `002`, ...) for that order to be numeric.

use std::path::{Path, PathBuf};

use crate::domain::{
    script_version, AppliedVersion, Direction, Error, MigrationReport, Result, ScriptStatus,
    DEFAULT_TABLE_NAME,
};
use crate::ports::Database;
use crate::services::executor::ScriptExecutor;
use crate::services::locator::{find_scripts, read_script};
use crate::services::version_store::VersionStore;

/// Applies versioned scripts from a directory to a database
pub struct Migrator<'a> {
    scripts_dir: PathBuf,
    versions: VersionStore<'a>,
    executor: ScriptExecutor<'a>,
}

impl<'a> Migrator<'a> {
    /// Create a migrator tracking versions in the default table
    pub fn new(db: &'a dyn Database, scripts_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_table(db, scripts_dir, DEFAULT_TABLE_NAME)
    }

    /// Create a migrator tracking versions in `table` ("" means the default)
    pub fn with_table(
        db: &'a dyn Database,
        scripts_dir: impl Into<PathBuf>,
        table: &str,
    ) -> Result<Self> {
        Ok(Self {
            scripts_dir: scripts_dir.into(),
            versions: VersionStore::new(db, table)?,
            executor: ScriptExecutor::new(db),
        })
    }

    pub fn scripts_dir(&self) -> &Path {
        &self.scripts_dir
    }

    pub fn table_name(&self) -> &str {
        self.versions.table_name()
    }

    /// Apply every pending up script
    pub fn up(&self) -> Result<MigrationReport> {
        self.run_up(None)
    }

    /// Revert every applied version
    pub fn down(&self) -> Result<MigrationReport> {
        self.run_down(None)
    }

    /// Move to `version`, applying or reverting as needed.
    ///
    /// Going up, `version` ends up applied. Going down, `version` stays applied
    /// and everything after it is reverted.
    pub fn set_version(&self, version: &str) -> Result<MigrationReport> {
        if version.is_empty() {
            return Err(Error::validation("version cannot be empty"));
        }

        self.versions.ensure_initialized()?;
        let current = self.versions.current_version()?;

        if current.as_str() < version {
            self.run_up(Some(version))
        } else if current.as_str() > version {
            self.run_down(Some(version))
        } else {
            log::info!("Migration already at version {}", version);
            Ok(MigrationReport {
                scripts: Vec::new(),
                version: current,
            })
        }
    }

    /// Highest applied version, "" when none
    pub fn version(&self) -> Result<String> {
        self.versions.ensure_initialized()?;
        self.versions.current_version()
    }

    /// Rows of the tracking table, oldest first
    pub fn applied(&self) -> Result<Vec<AppliedVersion>> {
        self.versions.ensure_initialized()?;
        self.versions.applied()
    }

    /// Up scripts that `up` would run, in order
    pub fn pending(&self) -> Result<Vec<String>> {
        self.versions.ensure_initialized()?;
        let current = self.versions.current_version()?;
        let files = self.scripts(Direction::Up)?;

        Ok(files
            .into_iter()
            .filter(|file| script_version(file) > current.as_str())
            .collect())
    }

    /// Every up script with whether its version is recorded as applied
    pub fn status(&self) -> Result<Vec<ScriptStatus>> {
        let applied = self.applied()?;
        let files = self.scripts(Direction::Up)?;

        Ok(files
            .into_iter()
            .map(|file_name| {
                let version = script_version(&file_name).to_string();
                let applied = applied.iter().any(|a| a.version == version);
                ScriptStatus {
                    version,
                    file_name,
                    applied,
                }
            })
            .collect())
    }

    /// Apply up scripts newer than the current version, stopping after
    /// `target` has been applied.
    fn run_up(&self, target: Option<&str>) -> Result<MigrationReport> {
        self.versions.ensure_initialized()?;
        let mut current = self.versions.current_version()?;
        let files = self.scripts(Direction::Up)?;

        let mut executed = Vec::new();
        for file in files {
            let version = script_version(&file).to_string();
            if version <= current {
                continue;
            }

            self.apply_script(&file)?;
            self.versions
                .record_applied(&version)
                .map_err(|e| Error::Version {
                    action: "record",
                    version: version.clone(),
                    source: Box::new(e),
                })?;
            log::debug!("Applied migration {}", file);
            executed.push(file);

            if target == Some(version.as_str()) {
                log::info!("Migration up to specified version {}", version);
                return Ok(MigrationReport {
                    scripts: executed,
                    version,
                });
            }

            current = version;
        }

        log::info!("Migration up to latest version {:?}", current);
        Ok(MigrationReport {
            scripts: executed,
            version: current,
        })
    }

    /// Revert applied versions newest first, stopping before `target` is
    /// reverted.
    fn run_down(&self, target: Option<&str>) -> Result<MigrationReport> {
        self.versions.ensure_initialized()?;
        let current = self.versions.current_version()?;
        let files = self.scripts(Direction::Down)?;

        let mut executed = Vec::new();
        for file in files {
            let version = script_version(&file).to_string();
            if version > current {
                continue;
            }

            if target == Some(version.as_str()) {
                log::info!("Migration down to specified version {}", version);
                return Ok(MigrationReport {
                    scripts: executed,
                    version,
                });
            }

            self.apply_script(&file)?;
            self.versions
                .record_reverted(&version)
                .map_err(|e| Error::Version {
                    action: "remove",
                    version: version.clone(),
                    source: Box::new(e),
                })?;
            log::debug!("Reverted migration {}", file);
            executed.push(file);
        }

        let version = self.versions.current_version()?;
        log::info!("Migration down completed at version {:?}", version);
        Ok(MigrationReport {
            scripts: executed,
            version,
        })
    }

    fn scripts(&self, direction: Direction) -> Result<Vec<String>> {
        find_scripts(&self.scripts_dir, direction.suffix(), direction.descending())
    }

    fn apply_script(&self, file: &str) -> Result<()> {
        let script = read_script(&self.scripts_dir, file)?;
        self.executor
            .apply(&script)
            .map_err(|source| Error::Execution {
                file: file.to_string(),
                source,
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::database_mock::MockDatabase;
    use crate::adapters::duckdb::DuckDbDatabase;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    /// Two versions: 001 creates `users`, 002 creates `posts`
    fn example_dir() -> TempDir {
        let dir = tempdir().unwrap();
        let files = [
            ("001_users.up.sql", "CREATE TABLE users (id INTEGER, name VARCHAR);"),
            ("001_users.down.sql", "DROP TABLE users;"),
            (
                "002_posts.up.sql",
                "CREATE TABLE posts (id INTEGER, user_id INTEGER);\nINSERT INTO posts VALUES (1, 1);",
            ),
            ("002_posts.down.sql", "DROP TABLE posts;"),
        ];
        for (name, sql) in files {
            fs::write(dir.path().join(name), sql).unwrap();
        }
        dir
    }

    fn table_exists(db: &DuckDbDatabase, table: &str) -> bool {
        let rows = db
            .query(
                "SELECT CAST(COUNT(*) AS VARCHAR) FROM information_schema.tables WHERE table_name = ?",
                &[table],
                1,
            )
            .unwrap();
        rows[0][0].as_deref() == Some("1")
    }

    #[test]
    fn test_up_applies_all() {
        let dir = example_dir();
        let db = DuckDbDatabase::open_in_memory().unwrap();
        let migrator = Migrator::new(&db, dir.path()).unwrap();

        let report = migrator.up().unwrap();

        assert_eq!(report.scripts, vec!["001_users.up.sql", "002_posts.up.sql"]);
        assert_eq!(report.version, "002");
        assert_eq!(migrator.version().unwrap(), "002");
        assert!(table_exists(&db, "users"));
        assert!(table_exists(&db, "posts"));
    }

    #[test]
    fn test_down_reverts_all() {
        let dir = example_dir();
        let db = DuckDbDatabase::open_in_memory().unwrap();
        let migrator = Migrator::new(&db, dir.path()).unwrap();

        migrator.up().unwrap();
        let report = migrator.down().unwrap();

        assert_eq!(report.scripts, vec!["002_posts.down.sql", "001_users.down.sql"]);
        assert_eq!(report.version, "");
        assert_eq!(migrator.version().unwrap(), "");
        assert!(!table_exists(&db, "users"));
    }

    #[test]
    fn test_set_version_down_keeps_target() {
        let dir = example_dir();
        let db = DuckDbDatabase::open_in_memory().unwrap();
        let migrator = Migrator::new(&db, dir.path()).unwrap();
        migrator.up().unwrap();

        let report = migrator.set_version("001").unwrap();

        assert_eq!(report.scripts, vec!["002_posts.down.sql"]);
        assert_eq!(migrator.version().unwrap(), "001");
        assert!(table_exists(&db, "users"));
        assert!(!table_exists(&db, "posts"));
    }

    #[test]
    fn test_set_version_up_applies_target() {
        let dir = example_dir();
        let db = DuckDbDatabase::open_in_memory().unwrap();
        let migrator = Migrator::new(&db, dir.path()).unwrap();

        let report = migrator.set_version("001").unwrap();

        assert_eq!(report.scripts, vec!["001_users.up.sql"]);
        assert_eq!(report.version, "001");
        assert!(!table_exists(&db, "posts"));
    }

    #[test]
    fn test_set_version_empty_is_validation_error() {
        let db = MockDatabase::new();
        let migrator = Migrator::new(&db, "/nonexistent/migrations").unwrap();

        let err = migrator.set_version("").unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(db.events().is_empty());
    }

    #[test]
    fn test_set_version_current_is_noop() {
        let dir = example_dir();
        let db = DuckDbDatabase::open_in_memory().unwrap();
        let migrator = Migrator::new(&db, dir.path()).unwrap();
        migrator.up().unwrap();

        // Breaking every script proves none are read or executed
        for entry in fs::read_dir(dir.path()).unwrap() {
            fs::write(entry.unwrap().path(), "NOT VALID SQL;").unwrap();
        }

        let report = migrator.set_version("002").unwrap();
        assert!(report.is_noop());
        assert_eq!(migrator.version().unwrap(), "002");
    }

    #[test]
    fn test_up_twice_is_noop() {
        let dir = example_dir();
        let db = DuckDbDatabase::open_in_memory().unwrap();
        let migrator = Migrator::new(&db, dir.path()).unwrap();

        migrator.up().unwrap();
        let second = migrator.up().unwrap();

        assert!(second.is_noop());
        assert_eq!(second.version, "002");
        assert_eq!(migrator.applied().unwrap().len(), 2);
    }

    #[test]
    fn test_failed_script_stops_run() {
        let dir = example_dir();
        fs::write(
            dir.path().join("002_posts.up.sql"),
            "CREATE TABLE posts (id INTEGER);\nINSERT INTO nowhere VALUES (1);",
        )
        .unwrap();
        fs::write(dir.path().join("003_tags.up.sql"), "CREATE TABLE tags (id INTEGER);").unwrap();

        let db = DuckDbDatabase::open_in_memory().unwrap();
        let migrator = Migrator::new(&db, dir.path()).unwrap();
        let err = migrator.up().unwrap_err();

        match err {
            Error::Execution { file, .. } => assert_eq!(file, "002_posts.up.sql"),
            other => panic!("expected execution error, got {other:?}"),
        }
        assert_eq!(migrator.version().unwrap(), "001");
        assert!(!table_exists(&db, "posts"));
        assert!(!table_exists(&db, "tags"));
    }

    #[test]
    fn test_status_and_pending() {
        let dir = example_dir();
        let db = DuckDbDatabase::open_in_memory().unwrap();
        let migrator = Migrator::new(&db, dir.path()).unwrap();
        migrator.set_version("001").unwrap();

        let status = migrator.status().unwrap();
        assert_eq!(status.len(), 2);
        assert!(status[0].applied);
        assert_eq!(status[0].version, "001");
        assert!(!status[1].applied);

        assert_eq!(migrator.pending().unwrap(), vec!["002_posts.up.sql"]);
    }

    #[test]
    fn test_record_failure_stops_up() {
        let dir = example_dir();
        let db = MockDatabase::new().fail_execute("INSERT INTO schema_migrations");

        let err = Migrator::new(&db, dir.path()).unwrap().up().unwrap_err();

        match err {
            Error::Version {
                action, version, ..
            } => {
                assert_eq!(action, "record");
                assert_eq!(version, "001");
            }
            other => panic!("expected version error, got {other:?}"),
        }
        // 001 committed, nothing of 002 was attempted
        let events = db.events();
        assert_eq!(events.iter().filter(|e| *e == "begin").count(), 1);
        assert!(!events.iter().any(|e| e.contains("posts")));
    }

    #[test]
    fn test_remove_failure_stops_down() {
        let dir = example_dir();
        let db = MockDatabase::new()
            .with_version("002")
            .fail_execute("DELETE FROM schema_migrations");

        let err = Migrator::new(&db, dir.path()).unwrap().down().unwrap_err();

        match err {
            Error::Version {
                action, version, ..
            } => {
                assert_eq!(action, "remove");
                assert_eq!(version, "002");
            }
            other => panic!("expected version error, got {other:?}"),
        }
        assert!(!db.events().iter().any(|e| e.contains("DROP TABLE users")));
    }

    #[test]
    fn test_init_failure_precedes_discovery() {
        let db = MockDatabase::new().fail_execute("CREATE TABLE IF NOT EXISTS");
        let migrator = Migrator::new(&db, "/nonexistent/migrations").unwrap();

        let err = migrator.up().unwrap_err();

        assert!(matches!(err, Error::Store(_)));
        assert!(err.to_string().contains("schema_migrations"));
        assert_eq!(db.events().len(), 1);
    }

    #[test]
    fn test_unreadable_script_stops_run() {
        let dir = example_dir();
        fs::write(dir.path().join("002_posts.up.sql"), [0xff, 0xfe, 0x00]).unwrap();

        let db = DuckDbDatabase::open_in_memory().unwrap();
        let migrator = Migrator::new(&db, dir.path()).unwrap();
        let err = migrator.up().unwrap_err();

        match err {
            Error::Read { file, .. } => assert_eq!(file, "002_posts.up.sql"),
            other => panic!("expected read error, got {other:?}"),
        }
        assert_eq!(migrator.version().unwrap(), "001");
    }

    #[test]
    fn test_unterminated_statement_is_executed() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("001_a.up.sql"), "CREATE TABLE a (id INTEGER)").unwrap();

        let db = DuckDbDatabase::open_in_memory().unwrap();
        let migrator = Migrator::new(&db, dir.path()).unwrap();
        migrator.up().unwrap();

        assert_eq!(migrator.version().unwrap(), "001");
        assert!(table_exists(&db, "a"));
    }

    #[test]
    fn test_custom_table() {
        let dir = example_dir();
        let db = DuckDbDatabase::open_in_memory().unwrap();
        let migrator = Migrator::with_table(&db, dir.path(), "app_versions").unwrap();
        assert_eq!(migrator.table_name(), "app_versions");

        migrator.up().unwrap();
        assert!(table_exists(&db, "app_versions"));
        assert!(!table_exists(&db, DEFAULT_TABLE_NAME));
    }
}
