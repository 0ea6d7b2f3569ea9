//! Minimal inline markup: `<b>bold</b>` and `<i>italic</i>`.
//!
//! Tags do not nest. Any other tag is dropped without changing the style.

/// Style of a markup fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Markup {
    #[default]
    Plain,
    Bold,
    Italic,
}

/// Iterator over the styled fragments of a markup string.
///
/// Each call to [`parse`] starts from scratch; empty runs are skipped.
#[derive(Debug, Clone)]
pub struct Fragments<'a> {
    rest: &'a str,
    state: Markup,
}

pub fn parse(text: &str) -> Fragments<'_> {
    Fragments {
        rest: text,
        state: Markup::Plain,
    }
}

/// The text with all tags removed.
pub fn strip(text: &str) -> String {
    parse(text).map(|(run, _)| run).collect()
}

impl<'a> Iterator for Fragments<'a> {
    type Item = (&'a str, Markup);

    fn next(&mut self) -> Option<Self::Item> {
        while !self.rest.is_empty() {
            let style = self.state;

            let Some(open) = self.rest.find('<') else {
                let run = self.rest;
                self.rest = "";
                return Some((run, style));
            };

            let Some(close) = self.rest[open..].find('>').map(|i| open + i) else {
                // Lone '<' is literal text
                let run = self.rest;
                self.rest = "";
                return Some((run, style));
            };

            let run = &self.rest[..open];
            let tag = &self.rest[open..=close];
            self.rest = &self.rest[close + 1..];

            match tag {
                "<b>" => self.state = Markup::Bold,
                "<i>" => self.state = Markup::Italic,
                "</b>" | "</i>" => self.state = Markup::Plain,
                _ => {}
            }

            if !run.is_empty() {
                return Some((run, style));
            }
        }
        None
    }
}
