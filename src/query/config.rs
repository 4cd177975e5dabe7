use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use locationiq::ProviderConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub provider: ProviderConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
}

fn default_listen() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Settings used when no config file is given.
    pub fn from_defaults(api_key: String) -> Self {
        Self {
            server: ServerConfig::default(),
            provider: ProviderConfig::new(api_key),
        }
    }
}
