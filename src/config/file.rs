use std::path::Path;

use super::types::AppConfig;
use crate::error::ConfigError;

impl AppConfig {
    /// Replaces every top-level key present in the JSON file.
    pub(super) fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }
}
