use clap::{Args, Command, FromArgMatches};
use serde_json::json;
use thronescli_engine::{
    ChoiceTable, Exclusion, FieldSpec, Options, Painter, Record, Schema, Search, SearchArgs,
};

fn schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("name").alias('n'),
        FieldSpec::delimited("traits", '.')
            .optname("trait")
            .verbosity(1)
            .unlabeled(),
        FieldSpec::flag("is_loyal")
            .hide_false()
            .applies(|r| r.str("faction_code") != Some("neutral")),
        FieldSpec::choice(
            "faction_name",
            ChoiceTable::new([
                ("Neutral", "Neutral"),
                ("Night's Watch", "The Night's Watch"),
                ("NW", "The Night's Watch"),
            ]),
        )
        .alias('f'),
        FieldSpec::count("cost").inclusive(),
    ])
    .search_fields(&["name", "trait"])
    .exclude(Exclusion::new("draft", "pack_code", &["VDS"], "Include draft cards"))
}

fn records() -> Vec<Record> {
    [
        json!({ "name": "Arry", "traits": "Lady. Recruit.", "is_loyal": true, "faction_code": "thenightswatch", "faction_name": "The Night's Watch", "cost": 4, "pack_code": "Core" }),
        json!({ "name": "Recruit from the Dungeons", "traits": "", "is_loyal": false, "faction_code": "thenightswatch", "faction_name": "The Night's Watch", "cost": 3, "pack_code": "TKP" }),
        json!({ "name": "Highborn Recruit", "traits": "Recruit.", "is_loyal": false, "faction_code": "thenightswatch", "faction_name": "The Night's Watch", "cost": 1, "pack_code": "LoCR" }),
        json!({ "name": "Hedge Knight", "traits": "Knight.", "is_loyal": false, "faction_code": "neutral", "faction_name": "Neutral", "cost": 4, "pack_code": "VDS" }),
    ]
    .into_iter()
    .map(Record::from)
    .collect()
}

fn run(argv: &[&str]) -> String {
    let schema = schema();
    let cmd = schema.augment(SearchArgs::augment_args(Command::new("thronescli")));
    let matches = cmd
        .try_get_matches_from(std::iter::once("thronescli").chain(argv.iter().copied()))
        .unwrap();
    let args = SearchArgs::from_arg_matches(&matches).unwrap();
    let options = Options::from_matches(&schema, &args, &matches).unwrap();

    let search = Search::new(&schema, &options);
    let selected = search.select(records());
    let mut out = Vec::new();
    search.report(selected, Painter::plain(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn search_term_matches_name_or_trait() {
    insta::assert_snapshot!(run(&["recruit"]), @r"
    Arry: Loyal. The Night's Watch. 4 Cost.
    Recruit from the Dungeons: The Night's Watch. 3 Cost.
    Highborn Recruit: The Night's Watch. 1 Cost.

    Total count: 3
    ");
}

#[test]
fn non_loyal_sorted_by_cost() {
    insta::assert_snapshot!(run(&["--non-loyal", "--sort", "cost", "--name-only"]), @r"
    Highborn Recruit
    Recruit from the Dungeons

    Total count: 2
    ");
}

#[test]
fn count_only_faction_breakdown() {
    insta::assert_snapshot!(run(&["--count", "faction", "--count-only", "--include-draft"]), @r"
    Faction counts
    The Night's Watch: 3
    Neutral:           1

    Total count: 4
    ");
}

#[test]
fn verbose_output_lists_labels() {
    insta::assert_snapshot!(run(&["-v", "-n", "arry"]), @r"
    Arry
    Lady. Recruit.
    Loyal: Yes
    Faction: The Night's Watch
    Cost: 4

    Total count: 1
    ");
}

#[test]
fn draft_cards_need_include_flag() {
    assert!(!run(&["-f", "neutral"]).contains("Hedge Knight"));
    assert!(run(&["-f", "neutral", "--include-draft"]).contains("Hedge Knight"));
}

#[test]
fn inclusive_cost_values() {
    let out = run(&["--cost", "1", "--cost", "3", "--name-only"]);
    assert!(out.contains("Highborn Recruit\n"));
    assert!(out.contains("Recruit from the Dungeons\n"));
    assert!(!out.contains("Arry"));
}
