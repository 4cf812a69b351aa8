//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default database file
    pub database: Option<PathBuf>,

    /// Default project, by id or name
    pub project: Option<String>,

    /// Log level used when no `-v` flag is given (error, warn, info, debug, trace)
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/tabula/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tabula")
            .join("config.toml")
    }

    /// Resolve the database file, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--db` argument
    /// 2. Config file `database` setting
    /// 3. `tabula/tabula.db` under the user data directory
    pub fn database_path(&self, cli_db: Option<&PathBuf>) -> PathBuf {
        cli_db
            .cloned()
            .or_else(|| self.database.clone())
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("tabula")
                    .join("tabula.db")
            })
    }

    /// Resolve the project selector, with CLI argument taking precedence.
    pub fn project(&self, cli_project: Option<&str>) -> Option<String> {
        cli_project
            .map(str::to_string)
            .or_else(|| self.project.clone())
    }

    /// Resolve the log level.
    ///
    /// Any `-v` wins over the config file: one for info, two for debug,
    /// three or more for trace. Without `-v` the config `log_level` is used,
    /// falling back to warn.
    pub fn log_level(&self, verbose: u8) -> Result<LevelFilter> {
        match verbose {
            0 => match &self.log_level {
                Some(level) => level
                    .parse()
                    .with_context(|| format!("invalid log_level in config: {}", level)),
                None => Ok(LevelFilter::WARN),
            },
            1 => Ok(LevelFilter::INFO),
            2 => Ok(LevelFilter::DEBUG),
            _ => Ok(LevelFilter::TRACE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_is_empty() {
        let config = Config::default();
        assert!(config.database.is_none());
        assert!(config.project.is_none());
    }

    #[test]
    fn database_path_prefers_cli_arg() {
        let config = Config {
            database: Some(PathBuf::from("/config/tabula.db")),
            ..Config::default()
        };
        let cli_db = PathBuf::from("/cli/tabula.db");
        assert_eq!(
            config.database_path(Some(&cli_db)),
            PathBuf::from("/cli/tabula.db")
        );
    }

    #[test]
    fn database_path_falls_back_to_config() {
        let config = Config {
            database: Some(PathBuf::from("/config/tabula.db")),
            ..Config::default()
        };
        assert_eq!(
            config.database_path(None),
            PathBuf::from("/config/tabula.db")
        );
    }

    #[test]
    fn database_path_defaults_to_data_dir() {
        let config = Config::default();
        assert!(config.database_path(None).ends_with("tabula/tabula.db"));
    }

    #[test]
    fn project_prefers_cli_arg() {
        let config = Config {
            project: Some("Backend".to_string()),
            ..Config::default()
        };
        assert_eq!(config.project(Some("3")), Some("3".to_string()));
        assert_eq!(config.project(None), Some("Backend".to_string()));
    }

    #[test]
    fn log_level_from_verbosity_and_config() {
        let config = Config {
            log_level: Some("debug".to_string()),
            ..Config::default()
        };
        assert_eq!(config.log_level(0).unwrap(), LevelFilter::DEBUG);
        assert_eq!(config.log_level(1).unwrap(), LevelFilter::INFO);
        assert_eq!(config.log_level(5).unwrap(), LevelFilter::TRACE);
        assert_eq!(Config::default().log_level(0).unwrap(), LevelFilter::WARN);
    }

    #[test]
    fn invalid_log_level_is_an_error() {
        let config = Config {
            log_level: Some("loud".to_string()),
            ..Config::default()
        };
        assert!(config.log_level(0).is_err());
    }

    #[test]
    fn load_from_parses_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "database = \"/data/t.db\"\nproject = \"Backend\"\nlog_level = \"info\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.database, Some(PathBuf::from("/data/t.db")));
        assert_eq!(config.project.as_deref(), Some("Backend"));
        assert_eq!(config.log_level.as_deref(), Some("info"));
    }

    #[test]
    fn load_from_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(config.database.is_none());
    }

    #[test]
    fn config_path_is_in_config_dir() {
        let path = Config::config_path();
        assert!(path.ends_with("tabula/config.toml"));
    }
}
