//! The locally cached card database: freshness marker and refresh.

use crate::error::{Error, Result};
use crate::path::sibling;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Version of the one-object-per-line layout written by [`install`].
pub const FORMAT: u32 = 3;

/// Written next to the card database after each successful refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub format: u32,
    pub fetched_at: DateTime<Utc>,
}

impl Marker {
    pub fn now() -> Self {
        Self {
            format: FORMAT,
            fetched_at: Utc::now(),
        }
    }

    /// Read the marker of `cards`, if there is a readable one.
    pub fn read(cards: &Path) -> Option<Self> {
        let content = fs::read_to_string(sibling(cards, ".meta")).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn write(&self, cards: &Path) -> Result<()> {
        let content = serde_json::to_string(self)?;
        fs::write(sibling(cards, ".meta"), content)?;
        Ok(())
    }

    pub fn is_current(&self) -> bool {
        self.format == FORMAT
    }
}

/// Whether `cards` must be downloaded before it can be read.
pub fn needs_refresh(cards: &Path, managed: bool) -> bool {
    if !cards.exists() {
        return true;
    }
    managed && !Marker::read(cards).is_some_and(|m| m.is_current())
}

/// Download the card list from `url` and install it at `cards`.
///
/// On failure the previous database, if any, is left untouched.
pub fn refresh(url: &str, cards: &Path) -> Result<usize> {
    tracing::info!(url, path = %cards.display(), "downloading card database");
    download(url)
        .and_then(|list| install(&list, cards))
        .map_err(|err| Error::Refresh(Box::new(err)))
}

fn download(url: &str) -> Result<Vec<Value>> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("thronescli/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let body = client.get(url).send()?.error_for_status()?.text()?;
    let list: Vec<Value> = serde_json::from_str(&body)?;
    tracing::debug!(cards = list.len(), "downloaded card list");
    Ok(list)
}

/// Write `list` to `cards`, one compact object per line, through a
/// temporary `.output` file that replaces the old database when complete.
pub fn install(list: &[Value], cards: &Path) -> Result<usize> {
    if let Some(parent) = cards.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let temp = sibling(cards, ".output");
    if let Err(err) = write_lines(list, &temp) {
        let _ = fs::remove_file(&temp);
        return Err(err);
    }

    if cards.exists() {
        fs::remove_file(cards)?;
    }
    fs::rename(&temp, cards)?;

    // The database is in place; without a marker it is fetched again next run
    if let Err(err) = Marker::now().write(cards) {
        tracing::warn!(error = %err, path = %cards.display(), "failed to write card database marker");
    }

    tracing::info!(cards = list.len(), path = %cards.display(), "card database installed");
    Ok(list.len())
}

fn write_lines(list: &[Value], temp: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(temp)?);
    for card in list {
        serde_json::to_writer(&mut out, card)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
