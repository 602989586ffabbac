use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    core::{
        errors::{BookError, Result},
        utils::{ensure_dir, write_atomic, PathResolver},
    },
    currency::{CurrencyCode, LocaleConfig},
    domain::report::DEFAULT_UNCATEGORIZED_LABEL,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Breakdown label for entries whose category cannot be resolved.
    #[serde(default = "Config::default_uncategorized_label")]
    pub uncategorized_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "pt-BR".into(),
            currency: "BRL".into(),
            uncategorized_label: Self::default_uncategorized_label(),
            data_dir: None,
        }
    }
}

impl Config {
    fn default_uncategorized_label() -> String {
        DEFAULT_UNCATEGORIZED_LABEL.to_string()
    }

    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::from_tag(&self.locale)
    }

    pub fn currency_code(&self) -> CurrencyCode {
        CurrencyCode::new(&self.currency)
    }

    fn validate(&self) -> Result<()> {
        if self.uncategorized_label.trim().is_empty() {
            return Err(BookError::ConfigError(
                "uncategorized_label must not be empty".into(),
            ));
        }
        if self.currency.trim().is_empty() {
            return Err(BookError::ConfigError("currency must not be empty".into()));
        }
        Ok(())
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    /// Reads the config file, falling back to defaults when it does not exist.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)
            .map_err(|err| BookError::ConfigError(format!("{}: {}", self.path.display(), err)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
