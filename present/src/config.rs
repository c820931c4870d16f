//! Tool configuration from present.toml

use crate::commands::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// File name looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "present.toml";

/// Main configuration from present.toml
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PresentConfig {
    /// Whether `.play` snippets are marked runnable
    pub play_enabled: bool,

    /// File extensions (without the dot) treated as documents by `list`
    pub extensions: Vec<String>,
}

impl Default for PresentConfig {
    fn default() -> Self {
        Self {
            play_enabled: false,
            extensions: vec!["slide".to_string(), "article".to_string()],
        }
    }
}

impl PresentConfig {
    /// Load configuration from a present.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the present.toml configuration file
    ///
    /// # Returns
    /// * `Ok(PresentConfig)` - Successfully loaded configuration
    /// * `Err(ConfigError)` - Error reading or parsing the configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(ConfigError::IoError)?;

        let config: PresentConfig = toml::from_str(&content).map_err(ConfigError::ParseError)?;

        Ok(config)
    }

    /// Load `path` if given, otherwise present.toml in the working directory
    ///
    /// A missing default file yields the defaults; an explicit path must exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::load(DEFAULT_CONFIG_FILE),
            None => {
                log::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                Ok(Self::default())
            }
        }
    }

    /// Context handed to command handlers
    pub fn command_context(&self) -> Context {
        Context {
            play_enabled: self.play_enabled,
        }
    }

    /// Whether `path` has one of the configured document extensions
    pub fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|known| known == ext))
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug)]
#[allow(clippy::enum_variant_names)]
pub enum ConfigError {
    /// IO error when reading the file
    IoError(std::io::Error),

    /// Error parsing TOML
    ParseError(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "TOML parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
