//! The card schema: which card attributes can be searched, sorted, counted
//! and displayed, and how.

use regex::Regex;
use std::sync::LazyLock;
use thronescli_engine::markup;
use thronescli_engine::{
    ChoiceTable, Exclusion, FieldSpec, FieldValue, MissingField, Record, Schema, Style, SubFlag,
};

/// Keywords that may open a card's text, each ending at the next period.
pub const KEYWORDS: &[&str] = &[
    "Ambush",
    "Assault",
    "Bestow",
    "Insight",
    "Intimidate",
    "Limited",
    "No attachments",
    "Pillage",
    "Renown",
    "Shadow",
    "Stealth",
    "Terminal",
];

/// Packs only legal in draft play.
pub const DRAFT_PACKS: &[&str] = &["VDS"];

/// Matches one leading keyword, parameters included, e.g. `Ambush (3).`
static KEYWORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let names: Vec<String> = KEYWORDS.iter().map(|k| regex::escape(k)).collect();
    Regex::new(&format!(r"^\s*(({})[^.]*)\.", names.join("|"))).unwrap()
});

const FACTIONS: &[(&str, &str)] = &[
    ("Baratheon", "House Baratheon"),
    ("Greyjoy", "House Greyjoy"),
    ("GJ", "House Greyjoy"),
    ("Lannister", "House Lannister"),
    ("Martell", "House Martell"),
    ("Neutral", "Neutral"),
    ("Stark", "House Stark"),
    ("Targaryen", "House Targaryen"),
    ("Night's Watch", "The Night's Watch"),
    ("The Night's Watch", "The Night's Watch"),
    ("NW", "The Night's Watch"),
    ("Tyrell", "House Tyrell"),
];

const TYPES: &[&str] = &[
    "Agenda",
    "Attachment",
    "Character",
    "Event",
    "Location",
    "Plot",
    "Title",
];

pub fn card_schema() -> Schema {
    Schema::new(vec![
        // Basic card properties
        FieldSpec::text("name")
            .alias('n')
            .style(Style::new().cyan().bold()),
        FieldSpec::delimited("traits", '.')
            .optname("trait")
            .verbosity(1)
            .unlabeled()
            .style(Style::new().magenta()),
        FieldSpec::markup("text")
            .alias('x')
            .verbosity(1)
            .unlabeled()
            .style(Style::new().white()),
        FieldSpec::delimited("text", '.')
            .realname("Keywords")
            .optname("keyword")
            .hidden()
            .extract(keywords)
            .buckets(keyword_buckets),
        FieldSpec::flag("is_unique").hide_false().applies(|card| {
            matches!(
                card.str("type_name"),
                Some("Character" | "Location" | "Attachment")
            )
        }),
        FieldSpec::flag("is_loyal")
            .hide_false()
            .applies(|card| card.str("faction_code") != Some("neutral")),
        FieldSpec::choice("faction_name", ChoiceTable::new(FACTIONS.iter().copied())).alias('f'),
        FieldSpec::choice("type_name", ChoiceTable::from_values(TYPES.iter().copied()))
            .realname("Type")
            .alias('t'),
        FieldSpec::count("cost").inclusive(),
        // Characters
        FieldSpec::count("strength")
            .realname("STR")
            .implies("type", "character"),
        FieldSpec::composite(
            "icons",
            vec![
                SubFlag::new("military", "is_military", "M", Style::new().red()),
                SubFlag::new("intrigue", "is_intrigue", "I", Style::new().green()),
                SubFlag::new("power", "is_power", "P", Style::new().blue()),
            ],
        )
        .realname("Icons")
        .optname("icon")
        .implies("type", "character")
        .applies(|card| card.str("type_name") == Some("Character")),
        // Plots
        FieldSpec::count("claim").inclusive().implies("type", "plot"),
        FieldSpec::count("income").inclusive().implies("type", "plot"),
        FieldSpec::count("initiative").inclusive().implies("type", "plot"),
        FieldSpec::count("reserve").inclusive().implies("type", "plot"),
        // Non-default fields
        FieldSpec::text("illustrator").inclusive().verbosity(2),
        FieldSpec::text("pack_name")
            .realname("Set")
            .inclusive()
            .verbosity(2),
    ])
    .search_fields(&["name", "text", "trait"])
    .exclude(Exclusion::new(
        "draft",
        "pack_code",
        DRAFT_PACKS,
        "Include cards only legal in draft format",
    ))
}

/// Split the keywords off the start of a card text, parameters included.
pub fn parse_keywords(text: &str) -> Vec<String> {
    let mut rest = text;
    let mut found = Vec::new();
    while let Some(caps) = KEYWORD_REGEX.captures(rest) {
        found.push(caps[1].trim().to_string());
        rest = &rest[caps[0].len()..];
    }
    found
}

fn keywords(card: &Record) -> Result<FieldValue, MissingField> {
    let text = markup::strip(card.str("text").ok_or(MissingField)?);
    let found = parse_keywords(&text);
    if found.is_empty() {
        return Err(MissingField);
    }
    Ok(FieldValue::Parts(found))
}

/// Keywords are counted without their parameters.
fn keyword_buckets(value: &FieldValue) -> Vec<String> {
    let FieldValue::Parts(found) = value else {
        return Vec::new();
    };
    found
        .iter()
        .filter_map(|full| KEYWORDS.iter().find(|k| full.starts_with(**k)))
        .map(|k| k.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keywords_stop_at_first_non_keyword() {
        assert_eq!(
            parse_keywords("Ambush (3). Stealth. Reaction: After Arry enters play, draw 1 card. Renown."),
            vec!["Ambush (3)", "Stealth"]
        );
        assert!(parse_keywords("Reaction: Shadow.").is_empty());
    }

    #[test]
    fn keywords_ignore_markup() {
        let card: Record = json!({ "text": "<b>Bestow (2).</b> No attachments." }).into();
        assert_eq!(
            keywords(&card),
            Ok(FieldValue::Parts(vec!["Bestow (2)".into(), "No attachments".into()]))
        );
    }

    #[test]
    fn card_without_keywords_is_missing() {
        let card: Record = json!({ "text": "Reaction: draw 1 card." }).into();
        assert_eq!(keywords(&card), Err(MissingField));
    }

    #[test]
    fn keyword_counts_drop_parameters() {
        let value = FieldValue::Parts(vec!["Ambush (3)".into(), "Shadow (2)".into()]);
        assert_eq!(keyword_buckets(&value), vec!["Ambush", "Shadow"]);
    }

    #[test]
    fn schema_generates_card_options() {
        let schema = card_schema();
        for long in [
            "name", "trait-isnt", "keyword", "unique", "non-loyal", "faction", "type", "cost-gt",
            "str", "icon", "icon-isnt", "claim-lt", "set",
        ] {
            assert!(schema.option(long).is_some(), "missing --{}", long);
        }
        assert_eq!(schema.exclusions()[0].flag, "include-draft");
    }
}
