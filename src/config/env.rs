use std::path::PathBuf;

use super::types::AppConfig;

pub(super) const ENV_CONFIG: &str = "FIRERISK_CONFIG";
pub(super) const ENV_ARTIFACT_DIR: &str = "FIRERISK_ARTIFACT_DIR";
pub(super) const ENV_TRANSFORM_FILE: &str = "FIRERISK_TRANSFORM_FILE";
pub(super) const ENV_CLASSIFIER_FILE: &str = "FIRERISK_CLASSIFIER_FILE";
pub(super) const ENV_EXPORT_DIR: &str = "FIRERISK_EXPORT_DIR";
pub(super) const ENV_LOG: &str = "FIRERISK_LOG";
pub(super) const ENV_MAP_ZOOM: &str = "FIRERISK_MAP_ZOOM";
pub(super) const ENV_MAP_STYLE: &str = "FIRERISK_MAP_STYLE";

pub(super) fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

impl AppConfig {
    pub(super) fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| non_empty(lookup(name));

        if let Some(v) = get(ENV_ARTIFACT_DIR) {
            self.artifact_dir = PathBuf::from(v);
        }
        if let Some(v) = get(ENV_TRANSFORM_FILE) {
            self.transform_file = v;
        }
        if let Some(v) = get(ENV_CLASSIFIER_FILE) {
            self.classifier_file = v;
        }
        if let Some(v) = get(ENV_EXPORT_DIR) {
            self.export_dir = PathBuf::from(v);
        }
        if let Some(v) = get(ENV_LOG) {
            self.log_filter = v;
        }
        if let Some(v) = get(ENV_MAP_ZOOM) {
            if let Ok(parsed) = v.trim().parse::<u8>() {
                self.map.zoom = parsed;
            }
        }
        if let Some(v) = get(ENV_MAP_STYLE) {
            self.map.style = v;
        }
    }
}
