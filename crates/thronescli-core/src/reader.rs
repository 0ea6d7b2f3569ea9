use crate::error::{Error, Result};
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use thronescli_engine::Record;

/// Reads a card database holding one JSON object per line.
pub struct JsonLineReader<R> {
    reader: R,
}

impl JsonLineReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> JsonLineReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Lazily parsed records. Blank lines are skipped.
    pub fn records(self) -> Records<R> {
        Records {
            lines: self.reader.lines(),
            line: 0,
        }
    }
}

pub struct Records<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = self.lines.next()?;
            self.line += 1;
            match text {
                Err(err) => return Some(Err(err.into())),
                Ok(text) if text.trim().is_empty() => continue,
                Ok(text) => return Some(parse_line(&text, self.line)),
            }
        }
    }
}

fn parse_line(text: &str, line: usize) -> Result<Record> {
    let value: Value = serde_json::from_str(text).map_err(|err| Error::Parse {
        line,
        message: err.to_string(),
    })?;
    Record::from_json(value).ok_or_else(|| Error::Parse {
        line,
        message: "expected a JSON object".to_string(),
    })
}
