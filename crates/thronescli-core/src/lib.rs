// Core: everything between the command line and the card database file.
// Resolves where the database lives, keeps it fresh, and reads it.

pub mod cache;
pub mod config;
pub mod error;
pub mod path;
pub mod reader;

pub use cache::{Marker, install, needs_refresh, refresh};
pub use config::Config;
pub use error::{Error, Result};
pub use path::{CardsLocation, expand_tilde};
pub use reader::{JsonLineReader, Records};

use std::fs::File;
use std::io::BufReader;

/// Open the card database, downloading it first when needed.
pub fn open_cards(config: &Config) -> Result<JsonLineReader<BufReader<File>>> {
    let location = CardsLocation::resolve(config)?;
    if needs_refresh(&location.path, location.managed) {
        refresh(&config.cards_url, &location.path)?;
    }
    tracing::debug!(path = %location.path.display(), "reading card database");
    JsonLineReader::open(&location.path)
}

/// Unconditionally download a fresh card database.
pub fn update_cards(config: &Config) -> Result<CardsLocation> {
    let location = CardsLocation::resolve(config)?;
    refresh(&config.cards_url, &location.path)?;
    Ok(location)
}
