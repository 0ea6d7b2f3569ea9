use crate::error::Result;
use crate::path::{CONFIG_ENV, expand_tilde, resolve_data_dir};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CARDS_URL: &str = "https://thronesdb.com/api/public/cards/";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Where `--update` downloads the card list from
    #[serde(default = "default_cards_url")]
    pub cards_url: String,

    /// Overrides the managed card database location
    #[serde(default)]
    pub cards_file: Option<String>,
}

fn default_cards_url() -> String {
    DEFAULT_CARDS_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cards_url: default_cards_url(),
            cards_file: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(expand_tilde(&path));
        }
        Ok(resolve_data_dir()?.join("config.toml"))
    }
}
