//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use fanta_gatekeeper::ValidationConfig;
use fanta_manager::ManagerConfig;
use fanta_scheduler::SchedulerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
///
/// ```toml
/// database_path = "fanta.db"
/// log_filter = "info"
///
/// [settings]
/// color = true
/// format = "table"
///
/// [manager]
/// max_write_attempts = 3
///
/// [validation]
/// max_bench = 13
///
/// [scheduler]
/// reconcile_interval_secs = 60
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Output settings
    #[serde(default)]
    pub settings: Settings,

    /// Roster manager settings
    #[serde(default)]
    pub manager: ManagerConfig,

    /// Lineup and ingestion validation
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Background reconciliation
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".fanta").join("config.toml"))
    }

    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing file at the default location yields the defaults; a missing
    /// file that was asked for explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Check every section for out-of-range values.
    pub fn validate(&self) -> Result<()> {
        if self.database_path.trim().is_empty() {
            return Err(CliError::Config("database_path must not be empty".into()));
        }
        self.manager
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        self.validation
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        self.scheduler
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            log_filter: default_log_filter(),
            settings: Settings::default(),
            manager: ManagerConfig::default(),
            validation: ValidationConfig::default(),
            scheduler: SchedulerConfig::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_database_path() -> String {
    "fanta.db".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database_path, "fanta.db");
        assert!(config.settings.color);
        assert_eq!(config.manager, ManagerConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
database_path = "league.db"

[settings]
format = "json"

[scheduler]
reconcile_interval_secs = 15
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.database_path, "league.db");
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
        assert_eq!(config.scheduler.reconcile_interval_secs, 15);
        assert!(config.scheduler.settle_periods);
        assert_eq!(config.validation, ValidationConfig::default());
    }

    #[test]
    fn test_invalid_section_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[manager]\nmax_write_attempts = 0").unwrap();

        let result = Config::load(Some(file.path()));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = Config::load(Some(Path::new("/nonexistent/fanta.toml")));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
