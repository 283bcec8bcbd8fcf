//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::Roster;
use crate::storage::{StorageConfig, DEFAULT_FILE_NAME};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Known players.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default = "default_players")]
    pub players: Vec<String>,
}

fn default_players() -> Vec<String> {
    Roster::default().players().to_vec()
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            players: default_players(),
        }
    }
}

/// Scores file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Fail on malformed records instead of skipping them
    #[serde(default)]
    pub strict: bool,
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            strict: false,
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub roster: RosterConfig,

    #[serde(default)]
    pub storage: StoreConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            roster: RosterConfig::default(),
            storage: StoreConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roster.players.is_empty() {
            return Err(ConfigError::ValidationError(
                "Roster must list at least one player".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for player in &self.roster.players {
            if player.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "Roster player names must not be empty".to_string(),
                ));
            }
            if !seen.insert(player) {
                return Err(ConfigError::ValidationError(format!(
                    "Duplicate roster player: {}",
                    player
                )));
            }
        }

        if self.storage.file_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Storage file name must not be empty".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn roster(&self) -> Roster {
        Roster::new(self.roster.players.iter().cloned())
    }

    pub fn storage_config(&self) -> StorageConfig {
        StorageConfig::new(self.data_dir.clone())
            .with_file_name(self.storage.file_name.clone())
            .with_strict(self.storage.strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.roster.players, vec!["Gregi", "Tomi", "Brina"]);
        assert_eq!(config.storage.file_name, "scores.json");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_validation_ok() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_roster() {
        let mut config = AppConfig::default();
        config.roster.players.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_duplicate_player() {
        let mut config = AppConfig::default();
        config.roster.players.push("Tomi".to_string());

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Tomi"));
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            data_dir = "/srv/pingpong"

            [roster]
            players = ["Ana", "Ben"]
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/pingpong"));
        assert_eq!(config.roster().players(), &["Ana", "Ben"]);
        assert_eq!(config.storage.file_name, "scores.json");
        assert!(!config.storage.strict);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_storage_config() {
        let mut config = AppConfig::default();
        config.storage.strict = true;
        let storage = config.storage_config();

        assert_eq!(storage.scores_path(), PathBuf::from("./data/scores.json"));
        assert!(storage.strict);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[roster]\nplayers = []\n").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
        assert_eq!(config.roster.players, parsed.roster.players);
    }
}
