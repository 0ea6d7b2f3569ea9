//! Text output: brief, verbose and name-only records, and the count summary.

use crate::count::CountTable;
use crate::field::FieldSpec;
use crate::markup::{self, Markup};
use crate::options::{Options, ViewMode};
use crate::record::Record;
use crate::schema::Schema;
use owo_colors::{OwoColorize, Style};
use std::fmt::Write;

/// Applies styles when color output is enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct Painter {
    color: bool,
}

impl Painter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    /// Render inline markup, layering bold and italic over `base`.
    pub fn markup(&self, text: &str, base: Style) -> String {
        markup::parse(text)
            .map(|(run, kind)| {
                let style = match kind {
                    Markup::Plain => base,
                    Markup::Bold => base.bold(),
                    Markup::Italic => Style::new().magenta().bold(),
                };
                self.paint(run, style)
            })
            .collect()
    }
}

pub struct Renderer<'a> {
    schema: &'a Schema,
    options: &'a Options,
    painter: Painter,
}

impl<'a> Renderer<'a> {
    pub fn new(schema: &'a Schema, options: &'a Options, painter: Painter) -> Self {
        Self {
            schema,
            options,
            painter,
        }
    }

    /// One record in the requested view mode, newline terminated.
    pub fn record(&self, record: &Record) -> String {
        match self.options.view {
            ViewMode::Brief => self.brief(record),
            ViewMode::NameOnly => self.name_only(record),
            ViewMode::Verbose(level) => self.verbose(record, level),
        }
    }

    pub fn name_only(&self, record: &Record) -> String {
        format!("{}\n", self.title(record))
    }

    pub fn brief(&self, record: &Record) -> String {
        let mut line = self.painter.paint(&format!("{}:", self.title_text(record)), self.title_style());
        for (index, field) in self.body_fields() {
            let show = self.options.show.contains(&index);
            if !show && (!self.options.show.is_empty() || field.verbosity != Some(0)) {
                continue;
            }
            let Ok(value) = field.fetch(record) else {
                continue;
            };
            if let Some(fragment) = field.format_brief(&value, show, &self.painter) {
                let _ = write!(line, " {}.", fragment);
            }
        }
        line.push('\n');
        line
    }

    pub fn verbose(&self, record: &Record, level: u8) -> String {
        let mut out = format!("{}\n", self.title(record));
        for (index, field) in self.body_fields() {
            let shown = self.options.show.contains(&index);
            if !shown && !field.verbosity.is_some_and(|v| v <= level) {
                continue;
            }
            let Ok(value) = field.fetch(record) else {
                continue;
            };
            let Some(text) = field.format_value(&value, &self.painter) else {
                continue;
            };
            if field.unlabeled {
                let _ = writeln!(out, "{}", text);
            } else {
                let label = self.painter.paint(&format!("{}:", field.realname), Style::new().bold());
                let _ = writeln!(out, "{} {}", label, text);
            }
        }
        out.push('\n');
        out
    }

    /// Count tables followed by the grand total.
    pub fn summary(&self, counts: &CountTable) -> String {
        let mut out = String::new();
        let verbose = matches!(self.options.view, ViewMode::Verbose(_));
        if !verbose && !self.options.count_only {
            out.push('\n');
        }

        let heading = Style::new().green().bold();
        for field_counts in counts.fields() {
            let field = self.schema.field(field_counts.field);
            let items = field_counts.sorted();
            let _ = writeln!(
                out,
                "{}",
                self.painter.paint(&format!("{} counts", field.realname), heading)
            );
            let fill = items.iter().map(|(key, _)| key.chars().count() + 1).max().unwrap_or(0);
            for (key, n) in items {
                let label = format!("{:<fill$}", format!("{}:", key), fill = fill);
                let _ = writeln!(out, "{} {}", self.painter.paint(&label, Style::new().bold()), n);
            }
            out.push('\n');
        }

        let _ = writeln!(
            out,
            "{}{}",
            self.painter.paint("Total count: ", heading),
            counts.total()
        );
        out
    }

    fn body_fields(&self) -> impl Iterator<Item = (usize, &'a FieldSpec)> + 'a {
        self.schema.fields().iter().enumerate().skip(1)
    }

    fn title_text(&self, record: &Record) -> String {
        let title = self.schema.title();
        match title.fetch(record) {
            Ok(value) => title
                .haystacks(&value)
                .into_iter()
                .next()
                .map(|s| s.into_owned())
                .unwrap_or_default(),
            Err(_) => String::new(),
        }
    }

    fn title_style(&self) -> Style {
        self.schema.title().style
    }

    fn title(&self, record: &Record) -> String {
        self.painter.paint(&self.title_text(record), self.title_style())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ChoiceTable, SubFlag};
    use serde_json::json;

    fn schema() -> Schema {
        Schema::new(vec![
            FieldSpec::text("name").style(Style::new().cyan().bold()),
            FieldSpec::delimited("traits", '.')
                .optname("trait")
                .verbosity(1)
                .unlabeled(),
            FieldSpec::flag("is_unique").hide_false(),
            FieldSpec::choice("faction_name", ChoiceTable::from_values(["The Night's Watch"])),
            FieldSpec::count("cost"),
            FieldSpec::composite(
                "icons",
                vec![
                    SubFlag::new("military", "is_military", "M", Style::new().red()),
                    SubFlag::new("power", "is_power", "P", Style::new().blue()),
                ],
            )
            .realname("Icons")
            .optname("icon"),
            FieldSpec::text("illustrator").verbosity(2),
        ])
    }

    fn record() -> Record {
        json!({
            "name": "Arry",
            "traits": "Lady. Recruit.",
            "is_unique": false,
            "faction_name": "The Night's Watch",
            "cost": 4,
            "is_military": true,
            "is_power": false,
            "illustrator": "Someone",
        })
        .into()
    }

    fn render(options: Options) -> String {
        let schema = schema();
        Renderer::new(&schema, &options, Painter::plain()).record(&record())
    }

    #[test]
    fn brief_lists_default_fields() {
        assert_eq!(
            render(Options::default()),
            "Arry: The Night's Watch. 4 Cost. M.\n"
        );
    }

    #[test]
    fn brief_with_show_lists_only_shown_fields() {
        let options = Options {
            show: vec![2, 1],
            ..Options::default()
        };
        assert_eq!(render(options), "Arry: Lady. Recruit. Non-Unique.\n");
    }

    #[test]
    fn verbose_levels() {
        let options = Options {
            view: ViewMode::Verbose(1),
            ..Options::default()
        };
        assert_eq!(
            render(options),
            "Arry\nLady. Recruit.\nUnique: No\nFaction: The Night's Watch\nCost: 4\nIcons: M\n\n"
        );

        let options = Options {
            view: ViewMode::Verbose(2),
            ..Options::default()
        };
        assert!(render(options).contains("Illustrator: Someone\n"));
    }

    #[test]
    fn name_only() {
        let options = Options {
            view: ViewMode::NameOnly,
            ..Options::default()
        };
        assert_eq!(render(options), "Arry\n");
    }

    #[test]
    fn colored_markup_keeps_text() {
        let painter = Painter::new(true);
        let rendered = painter.markup("<b>Bold</b> plain", Style::new());
        assert!(rendered.contains("Bold"));
        assert!(rendered.contains("\x1b["));
        assert_eq!(Painter::plain().markup("<b>Bold</b> plain", Style::new()), "Bold plain");
    }
}
