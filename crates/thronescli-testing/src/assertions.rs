//! Custom assertions for thronescli output.
//!
//! Provides high-level assertions that make tests more readable:
//! - Total count validation
//! - Count table entries
//! - Presence and absence of cards

use anyhow::{Context, Result};

/// Assert that output ends with the expected total count.
pub fn assert_total_count(stdout: &str, expected: usize) -> Result<()> {
    let line = stdout
        .lines()
        .rev()
        .find(|line| line.starts_with("Total count: "))
        .context("Expected a 'Total count' line in output")?;

    let total: usize = line["Total count: ".len()..]
        .trim()
        .parse()
        .with_context(|| format!("Bad total count line: {}", line))?;

    if total != expected {
        anyhow::bail!("Expected total count {}, got {}", expected, total);
    }

    Ok(())
}

/// Assert that a count table lists `bucket` with `expected` hits.
pub fn assert_bucket_count(stdout: &str, bucket: &str, expected: usize) -> Result<()> {
    let prefix = format!("{}:", bucket);
    let line = stdout
        .lines()
        .find(|line| line.starts_with(&prefix))
        .with_context(|| format!("Expected a count line for '{}'", bucket))?;

    let count: usize = line[prefix.len()..]
        .trim()
        .parse()
        .with_context(|| format!("Bad count line: {}", line))?;

    if count != expected {
        anyhow::bail!("Expected {} '{}', got {}", expected, bucket, count);
    }

    Ok(())
}

/// Assert that every card in `names` appears at the start of an output line.
pub fn assert_cards_listed(stdout: &str, names: &[&str]) -> Result<()> {
    for name in names {
        if !stdout.lines().any(|line| line.starts_with(name)) {
            anyhow::bail!("Expected card '{}' in output:\n{}", name, stdout);
        }
    }
    Ok(())
}

/// Assert that no card in `names` appears at the start of an output line.
pub fn assert_cards_absent(stdout: &str, names: &[&str]) -> Result<()> {
    for name in names {
        if stdout.lines().any(|line| line.starts_with(name)) {
            anyhow::bail!("Unexpected card '{}' in output:\n{}", name, stdout);
        }
    }
    Ok(())
}
