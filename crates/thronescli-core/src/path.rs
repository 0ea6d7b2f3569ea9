use crate::config::Config;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming a card database file to read as-is.
pub const DATA_ENV: &str = "THRONESCLI_DATA";

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "THRONESCLI_CONFIG";

/// File name of the managed card database. The suffix tracks the line format.
pub const CARDS_FILE: &str = "cards-v3.json";

/// Where the card database lives and who owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardsLocation {
    pub path: PathBuf,
    /// Managed files are refreshed when their marker is missing or stale.
    /// Explicit files are only downloaded when they do not exist.
    pub managed: bool,
}

impl CardsLocation {
    /// Resolve using the `THRONESCLI_DATA` environment variable and `config`.
    pub fn resolve(config: &Config) -> Result<Self> {
        let explicit = std::env::var(DATA_ENV).ok();
        Self::resolve_with(explicit.as_deref(), config)
    }

    /// Resolve the card database path based on priority:
    /// 1. Explicit path (with tilde expansion)
    /// 2. `cards_file` from the config
    /// 3. System data directory
    /// 4. ~/.thronescli (fallback for systems without a data directory)
    pub fn resolve_with(explicit: Option<&str>, config: &Config) -> Result<Self> {
        if let Some(path) = explicit.filter(|p| !p.is_empty()) {
            return Ok(Self {
                path: expand_tilde(path),
                managed: false,
            });
        }

        if let Some(path) = config.cards_file.as_deref() {
            return Ok(Self {
                path: expand_tilde(path),
                managed: true,
            });
        }

        Ok(Self {
            path: resolve_data_dir()?.join(CARDS_FILE),
            managed: true,
        })
    }
}

/// The application data directory.
pub fn resolve_data_dir() -> Result<PathBuf> {
    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("thronescli"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".thronescli"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or system data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// `path` with `suffix` appended to its file name, e.g. `cards-v3.json.meta`.
pub fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}
