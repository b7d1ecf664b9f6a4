//! Runtime configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Upper bound on a single journal frame.
pub const DEFAULT_MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

/// Runtime configuration. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RuntimeConfig {
    /// Journal file. Parent directories are created on open.
    /// Default: `journal/requests.log`
    pub journal_path: PathBuf,

    /// Largest accepted frame, in bytes.
    pub max_frame_len: usize,

    /// fsync after every append.
    pub fsync: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            journal_path: PathBuf::from("journal").join("requests.log"),
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
            fsync: true,
        }
    }
}

impl RuntimeConfig {
    /// Default config with the journal at `path`.
    pub fn with_journal_path(path: impl Into<PathBuf>) -> Self {
        Self {
            journal_path: path.into(),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_frame_len == 0 {
            return Err(ConfigError::Invalid(
                "max_frame_len must be positive".to_string(),
            ));
        }
        if self.journal_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "journal_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
