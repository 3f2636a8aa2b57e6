use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

use crate::plugins::Plugins;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parsing(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parsing(e) => write!(f, "TOML parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Parsing(value)
    }
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct Config {
    pub site: Option<SiteConfig>,
    pub plugins: Option<Plugins>,
}

impl Config {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&data)?;

        Ok(config)
    }

    pub fn parse(data: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(data)?)
    }
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(default)]
pub struct SiteConfig {
    pub title: Option<String>,
    /// Public root URL of the documentation site. In development mode,
    /// links under it are redirected to the local server.
    pub base_url: Option<String>,
    /// File extensions treated as renderable source documents.
    pub template_formats: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: None,
            base_url: None,
            template_formats: vec!["md".to_string(), "txt".to_string()],
        }
    }
}
