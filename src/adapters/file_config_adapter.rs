//! INI file configuration adapter.
//!
//! Keys and section names are case-insensitive. Values that fail to parse
//! fall back to the caller's default; `config_validation` is what reports
//! them.

use crate::domain::error::StocksimError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
    /// File path, or `<string>` for inline configs. Used in error messages.
    source: String,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StocksimError> {
        let source = path.as_ref().display().to_string();
        let mut config = Ini::new();
        config
            .load(path.as_ref())
            .map_err(|reason| StocksimError::ConfigParse {
                file: source.clone(),
                reason,
            })?;
        log::debug!("loaded config from {}", source);
        Ok(Self { config, source })
    }

    pub fn from_string(content: &str) -> Result<Self, StocksimError> {
        let source = "<string>".to_string();
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| StocksimError::ConfigParse {
                file: source.clone(),
                reason,
            })?;
        Ok(Self { config, source })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }

    fn sections(&self) -> Vec<String> {
        let mut names = self.config.sections();
        names.sort();
        names
    }
}
