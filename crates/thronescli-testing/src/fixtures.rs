//! Sample card database in the one-object-per-line cache format.

use anyhow::Result;
use std::fs;
use std::path::Path;

/// A handful of real cards covering characters, a plot, a neutral card
/// and one card from a draft-only pack.
pub const SAMPLE_CARDS: &str = include_str!("../fixtures/cards.jsonl");

/// Number of cards in [`SAMPLE_CARDS`], draft cards included.
pub fn sample_card_count() -> usize {
    SAMPLE_CARDS.lines().filter(|line| !line.trim().is_empty()).count()
}

/// Write the sample card database to `dest`.
pub fn write_sample_cards(dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, SAMPLE_CARDS)?;
    Ok(())
}
