// src/config/mod.rs
//! User settings loaded from `<config_dir>/folio/config.toml`.

use std::{fs, path::Path, path::PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    preview::PreviewLimits,
    view::{DisplayMode, SortKey, ViewState},
};

/// A config file that exists but cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display_mode: DisplayMode,
    pub sort_key: SortKey,
    pub sort_ascending: bool,
    /// Upper bound on bytes read for a text preview.
    pub preview_max_bytes: usize,
    /// Images larger than this are not decoded.
    pub image_max_bytes: u64,
    /// Two clicks on one row within this window count as a double click.
    pub double_click_ms: u64,
    pub log_level: String,
    /// Ask y/n before deleting the selection.
    pub confirm_delete: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::List,
            sort_key: SortKey::Name,
            sort_ascending: true,
            preview_max_bytes: 1024 * 1024,
            image_max_bytes: 64 * 1024 * 1024,
            double_click_ms: 400,
            log_level: "info".to_string(),
            confirm_delete: true,
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("folio").join("config.toml"))
    }

    /// Load from `path`, or the default location. A missing file yields the defaults.
    ///
    /// Runs before logging is up, so failures are returned for the caller to report.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Ok(Self::default());
        };
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        Self::parse(&contents).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn preview_limits(&self) -> PreviewLimits {
        PreviewLimits {
            text_bytes: self.preview_max_bytes,
            image_bytes: self.image_max_bytes,
        }
    }

    /// Initial view options.
    pub fn view_state(&self) -> ViewState {
        ViewState {
            display_mode: self.display_mode,
            sort_key: self.sort_key,
            sort_ascending: self.sort_ascending,
            ..ViewState::default()
        }
    }
}
