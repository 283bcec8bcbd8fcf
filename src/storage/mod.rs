//! Match log persistence.
//!
//! The log is a single JSON document, `{"matches": [...]}`, in the data
//! directory. Records are only ever appended or deleted.

mod score_file;

pub use score_file::*;

use std::path::PathBuf;
use thiserror::Error;

use crate::models::MatchError;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Match rejected: {0}")]
    Rejected(#[from] MatchError),

    #[error("Malformed record at position {index}: {source}")]
    Malformed { index: usize, source: MatchError },

    #[error("Match not found: {0}")]
    NotFound(String),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub file_name: String,
    /// Abort loading on the first malformed record instead of skipping it.
    pub strict: bool,
}

pub const DEFAULT_FILE_NAME: &str = "scores.json";

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            file_name: DEFAULT_FILE_NAME.to_string(),
            strict: false,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn scores_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));
        assert_eq!(config.scores_path(), PathBuf::from("/data/scores.json"));

        let config = config.with_file_name("league.json");
        assert_eq!(config.scores_path(), PathBuf::from("/data/league.json"));
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert!(!config.strict);
    }
}
