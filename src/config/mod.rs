mod env;
mod file;
mod types;

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub use types::AppConfig;

impl AppConfig {
    /// Defaults, then the config file (`explicit` or `FIRERISK_CONFIG`), then
    /// `FIRERISK_*` environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(explicit, |name| std::env::var(name).ok())
    }

    pub fn load_with<F>(explicit: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path: Option<PathBuf> = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::non_empty(lookup(env::ENV_CONFIG)).map(PathBuf::from));

        let mut cfg = match path {
            Some(p) => Self::from_file(&p)?,
            None => Self::default(),
        };
        cfg.apply_env_overrides(lookup);
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.transform_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "transform_file must not be empty".into(),
            ));
        }
        if self.classifier_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "classifier_file must not be empty".into(),
            ));
        }
        if self.transform_file == self.classifier_file {
            return Err(ConfigError::InvalidValue(
                "transform_file and classifier_file must differ".into(),
            ));
        }
        if self.legend.default_color.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "legend.default_color must not be empty".into(),
            ));
        }
        Ok(())
    }
}
