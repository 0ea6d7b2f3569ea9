//! Field definitions: how one named attribute of a record is fetched,
//! matched, sorted, counted and formatted.

use crate::markup;
use crate::record::{FieldValue, MissingField, Record};
use crate::render::Painter;
use owo_colors::Style;
use serde_json::Value;
use std::borrow::Cow;

pub type Applies = fn(&Record) -> bool;
pub type Extract = fn(&Record) -> Result<FieldValue, MissingField>;
pub type Buckets = fn(&FieldValue) -> Vec<String>;

/// The kind of a field decides its options and its default behavior.
#[derive(Debug, Clone)]
pub enum FieldKind {
    Text,
    /// Text carrying inline markup; matched on the untagged text
    Markup,
    /// Text split on `delimiter` into independent parts
    Delimited { delimiter: char },
    /// Integer with equality and `-gt`/`-lt` comparisons
    Count,
    Flag,
    Choice(ChoiceTable),
    /// A bundle of boolean sub-flags read from several keys
    Composite(Vec<SubFlag>),
}

/// One boolean member of a composite field.
#[derive(Debug, Clone)]
pub struct SubFlag {
    pub name: &'static str,
    pub key: &'static str,
    pub glyph: &'static str,
    pub style: Style,
}

impl SubFlag {
    pub fn new(name: &'static str, key: &'static str, glyph: &'static str, style: Style) -> Self {
        Self {
            name,
            key,
            glyph,
            style,
        }
    }
}

/// Closed set of legal values for a choice field, with aliases.
#[derive(Debug, Clone, Default)]
pub struct ChoiceTable {
    entries: Vec<(String, String)>,
}

impl ChoiceTable {
    /// Build from `(alias, canonical)` pairs.
    pub fn new<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(alias, value)| (alias.to_string(), value.to_string()))
                .collect(),
        }
    }

    /// Build from plain values, each being its own alias.
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(values.into_iter().map(|v| (v, v)))
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(alias, _)| alias.as_str())
    }

    /// Resolve a user argument to its canonical value: exact alias first,
    /// then a prefix shared by aliases of a single canonical value.
    pub fn resolve(&self, arg: &str) -> Option<&str> {
        single_match(
            arg,
            self.entries
                .iter()
                .map(|(alias, value)| (alias.as_str(), value.as_str())),
        )
    }
}

/// Case-insensitive lookup of `arg` among named candidates.
///
/// An exact name wins. Otherwise every candidate starting with `arg` is
/// collected, and the lookup succeeds only if they all carry the same value.
pub fn single_match<'a, T: PartialEq + Copy>(
    arg: &str,
    candidates: impl IntoIterator<Item = (&'a str, T)>,
) -> Option<T> {
    let arg = arg.to_lowercase();
    let mut found: Option<T> = None;
    let mut ambiguous = false;

    for (name, value) in candidates {
        let name = name.to_lowercase();
        if name == arg {
            return Some(value);
        }
        if name.starts_with(&arg) {
            match found {
                Some(previous) if previous != value => ambiguous = true,
                _ => found = Some(value),
            }
        }
    }

    if ambiguous { None } else { found }
}

/// Orderable key for one field of one record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// Declarative description of one queryable attribute.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub key: &'static str,
    pub realname: String,
    pub optname: String,
    pub optalias: Option<char>,
    pub kind: FieldKind,
    /// `Some(0)` brief, `Some(1)` verbose, `Some(2)` very verbose, `None` never shown
    pub verbosity: Option<u8>,
    pub inclusive: bool,
    pub unlabeled: bool,
    pub hide_false: bool,
    /// Option and value implied when this field is filtered on
    pub implied: Option<(&'static str, &'static str)>,
    pub style: Style,
    pub help: Option<String>,
    applies: Option<Applies>,
    extract: Option<Extract>,
    buckets: Option<Buckets>,
}

impl FieldSpec {
    pub fn new(key: &'static str, kind: FieldKind) -> Self {
        let realname = default_realname(key);
        let optname = realname.to_lowercase().replace(' ', "-");
        let inclusive = matches!(kind, FieldKind::Choice(_));
        Self {
            key,
            realname,
            optname,
            optalias: None,
            kind,
            verbosity: Some(0),
            inclusive,
            unlabeled: false,
            hide_false: false,
            implied: None,
            style: Style::new(),
            help: None,
            applies: None,
            extract: None,
            buckets: None,
        }
    }

    pub fn text(key: &'static str) -> Self {
        Self::new(key, FieldKind::Text)
    }

    pub fn markup(key: &'static str) -> Self {
        Self::new(key, FieldKind::Markup)
    }

    pub fn delimited(key: &'static str, delimiter: char) -> Self {
        Self::new(key, FieldKind::Delimited { delimiter })
    }

    pub fn count(key: &'static str) -> Self {
        Self::new(key, FieldKind::Count)
    }

    pub fn flag(key: &'static str) -> Self {
        Self::new(key, FieldKind::Flag)
    }

    pub fn choice(key: &'static str, table: ChoiceTable) -> Self {
        Self::new(key, FieldKind::Choice(table))
    }

    pub fn composite(key: &'static str, flags: Vec<SubFlag>) -> Self {
        Self::new(key, FieldKind::Composite(flags))
    }

    /// Set the display name; the option name follows unless set explicitly.
    pub fn realname(mut self, realname: &str) -> Self {
        self.realname = realname.to_string();
        self.optname = realname.to_lowercase().replace(' ', "-");
        self
    }

    pub fn optname(mut self, optname: &str) -> Self {
        self.optname = optname.to_string();
        self
    }

    pub fn alias(mut self, short: char) -> Self {
        self.optalias = Some(short);
        self
    }

    pub fn verbosity(mut self, level: u8) -> Self {
        self.verbosity = Some(level);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.verbosity = None;
        self
    }

    pub fn inclusive(mut self) -> Self {
        self.inclusive = true;
        self
    }

    pub fn unlabeled(mut self) -> Self {
        self.unlabeled = true;
        self
    }

    pub fn hide_false(mut self) -> Self {
        self.hide_false = true;
        self
    }

    pub fn implies(mut self, option: &'static str, value: &'static str) -> Self {
        self.implied = Some((option, value));
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    pub fn applies(mut self, applies: Applies) -> Self {
        self.applies = Some(applies);
        self
    }

    pub fn extract(mut self, extract: Extract) -> Self {
        self.extract = Some(extract);
        self
    }

    pub fn buckets(mut self, buckets: Buckets) -> Self {
        self.buckets = Some(buckets);
        self
    }

    pub fn sub_flags(&self) -> &[SubFlag] {
        match &self.kind {
            FieldKind::Composite(flags) => flags,
            _ => &[],
        }
    }

    /// Extract this field from `record`.
    pub fn fetch(&self, record: &Record) -> Result<FieldValue, MissingField> {
        if let Some(applies) = self.applies
            && !applies(record)
        {
            return Err(MissingField);
        }
        if let Some(extract) = self.extract {
            return extract(record);
        }

        if let FieldKind::Composite(flags) = &self.kind {
            return Ok(FieldValue::Flags(
                flags
                    .iter()
                    .map(|flag| (flag.name, record.bool(flag.key).unwrap_or(false)))
                    .collect(),
            ));
        }

        let raw = record.get(self.key).ok_or(MissingField)?;
        let value = match &self.kind {
            FieldKind::Delimited { delimiter } => {
                FieldValue::Parts(split_parts(&scalar_text(raw), *delimiter))
            }
            FieldKind::Count => match raw.as_i64() {
                Some(n) => FieldValue::Int(n),
                None => FieldValue::Text(scalar_text(raw)),
            },
            FieldKind::Flag => FieldValue::Bool(raw.as_bool().ok_or(MissingField)?),
            _ => FieldValue::Text(scalar_text(raw)),
        };
        Ok(value)
    }

    /// Texts a filter argument is matched against. Markup is stripped.
    pub fn haystacks<'v>(&self, value: &'v FieldValue) -> Vec<Cow<'v, str>> {
        let untag = |s: &'v str| -> Cow<'v, str> {
            if s.contains('<') {
                Cow::Owned(markup::strip(s))
            } else {
                Cow::Borrowed(s)
            }
        };
        match value {
            FieldValue::Text(s) => vec![untag(s)],
            FieldValue::Parts(parts) => parts.iter().map(|p| untag(p)).collect(),
            FieldValue::Int(n) => vec![Cow::Owned(n.to_string())],
            FieldValue::Bool(_) | FieldValue::Flags(_) => Vec::new(),
        }
    }

    /// Sort key; `None` means absent and is ordered last by the sorter.
    pub fn sort_key(&self, record: &Record) -> Option<SortValue> {
        let value = self.fetch(record).ok()?;
        Some(match value {
            FieldValue::Int(n) => SortValue::Int(n),
            FieldValue::Bool(b) => SortValue::Bool(b),
            FieldValue::Text(s) => SortValue::Text(markup::strip(&s)),
            FieldValue::Parts(parts) => SortValue::Text(parts.join(". ")),
            FieldValue::Flags(flags) => SortValue::Text(
                flags
                    .iter()
                    .filter(|(_, on)| *on)
                    .map(|(name, _)| *name)
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
        })
    }

    /// Count buckets hit by `value`. One per part for multi-valued fields.
    pub fn count_buckets(&self, value: &FieldValue) -> Vec<String> {
        if let Some(buckets) = self.buckets {
            return buckets(value);
        }
        match value {
            FieldValue::Text(s) if s.is_empty() => Vec::new(),
            FieldValue::Text(s) => vec![markup::strip(s)],
            FieldValue::Parts(parts) => parts.clone(),
            FieldValue::Int(n) => vec![format!("{} {}", n, self.realname)],
            FieldValue::Bool(b) => vec![self.flag_label(*b)],
            FieldValue::Flags(flags) => flags
                .iter()
                .filter(|(_, on)| *on)
                .map(|(name, _)| title_case(name))
                .collect(),
        }
    }

    /// Fragment for one-line output, without the trailing period.
    pub fn format_brief(&self, value: &FieldValue, show: bool, painter: &Painter) -> Option<String> {
        match (&self.kind, value) {
            (FieldKind::Flag, FieldValue::Bool(b)) => {
                if !b && self.hide_false && !show {
                    None
                } else {
                    Some(painter.paint(&self.flag_label(*b), self.style))
                }
            }
            (FieldKind::Count, FieldValue::Int(n)) => Some(painter.paint(
                &format!("{} {}", n, self.realname),
                self.style,
            )),
            (FieldKind::Count, FieldValue::Text(s)) => Some(painter.paint(
                &format!("{} {}", s, self.realname),
                self.style,
            )),
            (_, FieldValue::Text(_) | FieldValue::Parts(_)) => {
                let text = self.plain_text(value)?;
                Some(self.paint_text(text.trim_end_matches('.'), painter))
            }
            _ => self.format_value(value, painter),
        }
    }

    fn plain_text(&self, value: &FieldValue) -> Option<String> {
        match value {
            FieldValue::Text(s) if !s.is_empty() => Some(s.clone()),
            FieldValue::Parts(parts) if !parts.is_empty() => Some(format!("{}.", parts.join(". "))),
            _ => None,
        }
    }

    fn paint_text(&self, text: &str, painter: &Painter) -> String {
        match self.kind {
            FieldKind::Markup => painter.markup(text, self.style),
            _ => painter.paint(text, self.style),
        }
    }

    /// The value as shown after a label in verbose output.
    pub fn format_value(&self, value: &FieldValue, painter: &Painter) -> Option<String> {
        match value {
            FieldValue::Text(_) | FieldValue::Parts(_) => self
                .plain_text(value)
                .map(|text| self.paint_text(&text, painter)),
            FieldValue::Int(n) => Some(painter.paint(&n.to_string(), self.style)),
            FieldValue::Bool(b) => Some(if *b { "Yes" } else { "No" }.to_string()),
            FieldValue::Flags(flags) => {
                let glyphs: Vec<String> = self
                    .sub_flags()
                    .iter()
                    .zip(flags)
                    .filter(|(_, (_, on))| *on)
                    .map(|(sub, _)| painter.paint(sub.glyph, sub.style))
                    .collect();
                if glyphs.is_empty() {
                    Some(format!("No {}", self.realname))
                } else {
                    Some(glyphs.join(" "))
                }
            }
        }
    }

    fn flag_label(&self, value: bool) -> String {
        if value {
            self.realname.clone()
        } else {
            format!("Non-{}", self.realname)
        }
    }
}

fn default_realname(key: &str) -> String {
    let name = key.strip_prefix("is_").unwrap_or(key);
    let name = name
        .strip_suffix("_name")
        .or_else(|| name.strip_suffix("_code"))
        .unwrap_or(name);
    title_case(&name.replace('_', " "))
}

pub(crate) fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn split_parts(text: &str, delimiter: char) -> Vec<String> {
    text.split(delimiter)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn arry() -> Record {
        json!({
            "name": "Arry",
            "traits": "Lady. Recruit.",
            "cost": 4,
            "strength": 3,
            "is_unique": true,
            "is_military": true,
            "is_intrigue": true,
            "is_power": false,
            "claim": null,
        })
        .into()
    }

    #[test]
    fn realname_and_optname_derive_from_key() {
        let field = FieldSpec::flag("is_unique");
        assert_eq!(field.realname, "Unique");
        assert_eq!(field.optname, "unique");

        let field = FieldSpec::text("faction_name");
        assert_eq!(field.realname, "Faction");

        let field = FieldSpec::count("strength").realname("STR");
        assert_eq!(field.optname, "str");
    }

    #[test]
    fn delimited_parts_are_trimmed_and_non_empty() {
        let field = FieldSpec::delimited("traits", '.');
        assert_eq!(
            field.fetch(&arry()),
            Ok(FieldValue::Parts(vec!["Lady".into(), "Recruit".into()]))
        );
    }

    #[test]
    fn null_and_missing_are_absent() {
        assert_eq!(FieldSpec::count("claim").fetch(&arry()), Err(MissingField));
        assert_eq!(FieldSpec::count("income").fetch(&arry()), Err(MissingField));
    }

    #[test]
    fn applies_guard_raises_missing_field() {
        let field = FieldSpec::count("strength").applies(|r| r.str("type_code") == Some("character"));
        assert_eq!(field.fetch(&arry()), Err(MissingField));
    }

    #[test]
    fn non_numeric_count_is_text() {
        let record: Record = json!({ "cost": "X" }).into();
        assert_eq!(
            FieldSpec::count("cost").fetch(&record),
            Ok(FieldValue::Text("X".into()))
        );
    }

    #[test]
    fn single_match_prefers_exact_then_unique_prefix() {
        let names = [("income", 0), ("initiative", 1), ("str", 2), ("strength", 3)];
        assert_eq!(single_match("str", names), Some(2));
        assert_eq!(single_match("inc", names), Some(0));
        assert_eq!(single_match("in", names), None);
        assert_eq!(single_match("zzz", names), None);
    }

    #[test]
    fn choice_aliases_of_same_value_are_not_ambiguous() {
        let table = ChoiceTable::new([
            ("Greyjoy", "House Greyjoy"),
            ("GJ", "House Greyjoy"),
            ("Night's Watch", "The Night's Watch"),
            ("NW", "The Night's Watch"),
            ("Neutral", "Neutral"),
        ]);
        assert_eq!(table.resolve("gj"), Some("House Greyjoy"));
        assert_eq!(table.resolve("greyjoy"), Some("House Greyjoy"));
        assert_eq!(table.resolve("g"), Some("House Greyjoy"));
        assert_eq!(table.resolve("nw"), Some("The Night's Watch"));
        assert_eq!(table.resolve("n"), None);
    }

    #[test]
    fn composite_counts_each_active_flag() {
        let field = FieldSpec::composite(
            "icons",
            vec![
                SubFlag::new("military", "is_military", "M", Style::new()),
                SubFlag::new("intrigue", "is_intrigue", "I", Style::new()),
                SubFlag::new("power", "is_power", "P", Style::new()),
            ],
        )
        .realname("Icons");
        let value = field.fetch(&arry()).unwrap();
        assert_eq!(field.count_buckets(&value), vec!["Military", "Intrigue"]);
        assert_eq!(
            field.format_value(&value, &Painter::plain()).as_deref(),
            Some("M I")
        );
    }

    #[test]
    fn brief_flag_hides_false_unless_shown() {
        let field = FieldSpec::flag("is_loyal").hide_false();
        let painter = Painter::plain();
        assert_eq!(field.format_brief(&FieldValue::Bool(false), false, &painter), None);
        assert_eq!(
            field.format_brief(&FieldValue::Bool(false), true, &painter).as_deref(),
            Some("Non-Loyal")
        );
        assert_eq!(
            field.format_brief(&FieldValue::Bool(true), false, &painter).as_deref(),
            Some("Loyal")
        );
    }
}
