//! User preferences for the circa landing card.
//!
//! Preferences live in an optional TOML file under the platform config
//! directory. Every key is optional: missing keys (or a missing file)
//! fall back to compiled-in defaults, while a present-but-invalid file is
//! reported as an error rather than silently ignored.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use circa_core::{AnimationSpeed, ThemeVariant};
use circa_field::FieldOverrides;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// One row of the project listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    pub url: String,
}

/// Text content of the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageContent {
    /// Name shown in the header.
    pub site_name: String,
    /// Line shown in the footer.
    pub footer: String,
    /// Rows of the project listing.
    pub projects: Vec<ProjectEntry>,
}

impl Default for PageContent {
    fn default() -> Self {
        Self {
            site_name: "circa".to_string(),
            footer: "circa".to_string(),
            projects: vec![ProjectEntry {
                title: "circa".to_string(),
                description: "an animated landing card for your terminal".to_string(),
                url: "https://crates.io/crates/circa".to_string(),
            }],
        }
    }
}

/// The full preferences file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Preferences {
    /// Initial theme variant; defaults to dark.
    pub theme: Option<ThemeVariant>,
    /// Global animation speed.
    pub speed: Option<AnimationSpeed>,
    /// Page text content.
    pub page: PageContent,
    /// Partial circle field overrides.
    pub field: FieldOverrides,
}

impl Preferences {
    /// Load preferences from the platform config directory.
    ///
    /// A missing directory or file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load preferences from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Location of the preferences file, when the platform exposes a
    /// config directory.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "circa").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Errors that can occur while loading preferences.
#[derive(Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    Io(io::Error),
    /// The file is not valid preferences TOML.
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read preferences: {err}"),
            ConfigError::Parse(err) => write!(f, "invalid preferences file: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}
