//! Persisted settings (vault, target note, default country, anchor line) in the app data directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::app_data;
use crate::country::{self, CountryTable};

const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_ANCHOR_LINE: &str = "# Applied";
pub const DEFAULT_COUNTRY: &str = "germany";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the user's vault (chosen by them).
    pub vault_root: Option<String>,
    /// Vault-relative path of the note links are inserted into.
    pub target_note: Option<String>,
    /// Country whose links get no flag. Always lowercase.
    pub default_country: String,
    /// Links go directly under the first line equal to this.
    pub anchor_line: String,
    /// User-defined countries on top of the built-in table.
    pub countries: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault_root: None,
            target_note: None,
            default_country: DEFAULT_COUNTRY.to_string(),
            anchor_line: DEFAULT_ANCHOR_LINE.to_string(),
            countries: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Settings as they are written to disk.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Built-in countries plus the user's own.
    pub fn country_table(&self) -> CountryTable {
        CountryTable::builtin().with_extra(&self.countries)
    }

    /// The configured vault root, if any.
    pub fn vault_root(&self) -> Option<PathBuf> {
        self.vault_root
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    }

    /// The configured target note, if any.
    pub fn target_note(&self) -> Option<&str> {
        self.target_note.as_deref().filter(|s| !s.is_empty())
    }

    pub fn set_vault_root(&mut self, path: &Path) -> Result<(), ConfigError> {
        let path = path.canonicalize().map_err(ConfigError::Canonicalize)?;
        if !path.is_dir() {
            return Err(ConfigError::NotADirectory(path));
        }
        self.vault_root = Some(path.to_string_lossy().into_owned());
        Ok(())
    }

    pub fn set_target_note(&mut self, note: &str) -> Result<(), ConfigError> {
        let note = note.trim().trim_start_matches('/').replace('\\', "/");
        if !note.ends_with(".md") {
            return Err(ConfigError::NotANote(note));
        }
        self.target_note = Some(note);
        Ok(())
    }

    pub fn set_default_country(&mut self, name: &str) -> Result<(), ConfigError> {
        let key = country::normalize(name);
        if !self.country_table().contains(&key) {
            return Err(ConfigError::UnknownCountry(name.to_string()));
        }
        self.default_country = key;
        Ok(())
    }

    pub fn set_anchor_line(&mut self, line: &str) -> Result<(), ConfigError> {
        let line = line.trim_end();
        if line.is_empty() {
            return Err(ConfigError::EmptyAnchor);
        }
        self.anchor_line = line.to_string();
        Ok(())
    }

    pub fn add_country(&mut self, name: &str, emoji: &str) -> Result<(), ConfigError> {
        let key = country::normalize(name);
        if key.is_empty() || emoji.trim().is_empty() {
            return Err(ConfigError::EmptyCountry);
        }
        self.countries.insert(key, emoji.trim().to_string());
        Ok(())
    }

    /// Removes a user-defined country. Built-ins and the default country stay.
    pub fn remove_country(&mut self, name: &str) -> Result<(), ConfigError> {
        let key = country::normalize(name);
        if key == self.default_country {
            return Err(ConfigError::RemovingDefault(key));
        }
        self.countries
            .remove(&key)
            .map(|_| ())
            .ok_or(ConfigError::UnknownCountry(name.to_string()))
    }
}

/// `config.toml` in the app data directory.
pub fn default_config_path() -> Option<PathBuf> {
    app_data::app_data_dir().map(|dir| dir.join(CONFIG_FILENAME))
}

/// Load config from `path`. Missing keys take their defaults; a missing or invalid file yields the default config.
pub fn load_config(path: &Path) -> Config {
    let Ok(s) = std::fs::read_to_string(path) else {
        return Config::default();
    };
    match toml::from_str::<Config>(&s) {
        Ok(mut config) => {
            config.default_country = country::normalize(&config.default_country);
            config
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            Config::default()
        }
    }
}

/// Save config to `path`, creating its directory if needed.
pub fn save_config(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(ConfigError::Write)?;
    }
    std::fs::write(path, config.to_toml()?).map_err(ConfigError::Write)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine app data directory")]
    NoDataDir,
    #[error("failed to serialize config: {0}")]
    Serialize(toml::ser::Error),
    #[error("failed to write config: {0}")]
    Write(std::io::Error),
    #[error("failed to resolve path: {0}")]
    Canonicalize(std::io::Error),
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("not a markdown note: {0}")]
    NotANote(String),
    #[error("unknown country: {0}")]
    UnknownCountry(String),
    #[error("cannot remove the default country: {0}")]
    RemovingDefault(String),
    #[error("country name and emoji must not be empty")]
    EmptyCountry,
    #[error("anchor line must not be empty")]
    EmptyAnchor,
}
