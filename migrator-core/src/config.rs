//! Configuration management
//!
//! Settings live in `migrator.json` in the project directory:
//! ```json
//! {
//!   "database": "app.duckdb",
//!   "migrationsDir": "migrations",
//!   "tableName": "schema_migrations"
//! }
//! ```
//! Every field is optional. Environment variables override the file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::DEFAULT_TABLE_NAME;

/// Name of the settings file inside the project directory
pub const SETTINGS_FILE: &str = "migrator.json";

/// Database file used when nothing is configured
pub const DEFAULT_DATABASE: &str = "migrator.duckdb";

/// Script directory used when nothing is configured
pub const DEFAULT_MIGRATIONS_DIR: &str = "migrations";

/// Raw migrator.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    migrations_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    table_name: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Migrator configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database: PathBuf,
    pub migrations_dir: PathBuf,
    pub table_name: String,
    project_dir: PathBuf,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Config {
    /// Defaults rooted at `project_dir`, without reading anything
    pub fn new(project_dir: &Path) -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            migrations_dir: PathBuf::from(DEFAULT_MIGRATIONS_DIR),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            project_dir: project_dir.to_path_buf(),
            _raw_settings: SettingsFile::default(),
        }
    }

    /// Load config from the project directory
    ///
    /// Values can be overridden with:
    /// - MIGRATOR_DATABASE
    /// - MIGRATOR_DIR
    /// - MIGRATOR_TABLE
    pub fn load(project_dir: &Path) -> Result<Self> {
        let settings_path = project_dir.join(SETTINGS_FILE);

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)
                .with_context(|| format!("Failed to read {}", settings_path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid settings in {}", settings_path.display()))?
        } else {
            SettingsFile::default()
        };

        let mut config = Self::new(project_dir);
        if let Some(database) = &raw.database {
            config.database = PathBuf::from(database);
        }
        if let Some(dir) = &raw.migrations_dir {
            config.migrations_dir = PathBuf::from(dir);
        }
        if let Some(table) = &raw.table_name {
            config.table_name = table.clone();
        }
        config._raw_settings = raw;

        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply MIGRATOR_* overrides looked up through `var`
    pub fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(database) = var("MIGRATOR_DATABASE").filter(|v| !v.is_empty()) {
            self.database = PathBuf::from(database);
        }
        if let Some(dir) = var("MIGRATOR_DIR").filter(|v| !v.is_empty()) {
            self.migrations_dir = PathBuf::from(dir);
        }
        if let Some(table) = var("MIGRATOR_TABLE").filter(|v| !v.is_empty()) {
            self.table_name = table;
        }
        self
    }

    /// Save config to the project directory
    /// Preserves other settings that migrator doesn't manage
    pub fn save(&self) -> Result<PathBuf> {
        let settings_path = self.project_dir.join(SETTINGS_FILE);

        let mut settings = self._raw_settings.clone();
        settings.database = Some(self.database.to_string_lossy().into_owned());
        settings.migrations_dir = Some(self.migrations_dir.to_string_lossy().into_owned());
        settings.table_name = Some(self.table_name.clone());

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)
            .with_context(|| format!("Failed to write {}", settings_path.display()))?;
        Ok(settings_path)
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Database file, resolved against the project directory
    pub fn database_path(&self) -> PathBuf {
        self.project_dir.join(&self.database)
    }

    /// Script directory, resolved against the project directory
    pub fn migrations_path(&self) -> PathBuf {
        self.project_dir.join(&self.migrations_dir)
    }
}
