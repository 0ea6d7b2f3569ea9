//! Usage, validation and database errors.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use thronescli_testing::TestWorld;

#[test]
fn test_no_arguments_prints_usage() {
    let world = TestWorld::new();
    let result = world.run(&[]).unwrap();

    assert!(result.success());
    assert!(result.stdout().contains("Usage: thronescli"));
    assert!(result.stdout().contains("--faction"));
}

#[test]
fn test_unknown_faction_lists_candidates() {
    let world = TestWorld::new();
    let result = world.run(&["--faction", "tully"]).unwrap();

    assert_eq!(result.code(), Some(1));
    assert!(result.stdout().is_empty());
    assert_eq!(
        result.stderr().trim_end(),
        "Error: no such --faction argument: tully.  (Possible arguments: Baratheon, Greyjoy, GJ, \
         Lannister, Martell, Neutral, Stark, Targaryen, Night's Watch, The Night's Watch, NW, Tyrell)"
    );
}

#[test]
fn test_ambiguous_sort_field_is_rejected() {
    let world = TestWorld::new();
    let result = world.run(&["--trait", "recruit", "--sort", "in"]).unwrap();

    assert_eq!(result.code(), Some(1));
    assert!(result.stderr().contains("no such --sort argument: in."));
}

#[test]
fn test_bad_number_is_usage_error() {
    let world = TestWorld::new();
    let result = world.run(&["--cost", "many"]).unwrap();

    assert_eq!(result.code(), Some(2));
}

#[test]
fn test_bad_regex_is_reported() {
    let world = TestWorld::new();
    let mut cmd = cargo_bin_cmd!("thronescli");
    world.configure_command(&mut cmd).args(["--regex", "--name", "("]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error: invalid regular expression"));
}

#[test]
fn test_failed_download_keeps_error_and_exit_code() {
    let world = TestWorld::new()
        .without_cards()
        .with_config("cards_url = \"http://127.0.0.1:9/cards/\"\n");
    let mut cmd = cargo_bin_cmd!("thronescli");
    world.configure_command(&mut cmd).args(["--trait", "Recruit"]);

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to update card database"));
    assert!(!world.cards_file().exists());
}

#[test]
fn test_failed_update_keeps_existing_database() {
    let world = TestWorld::new().with_config("cards_url = \"http://127.0.0.1:9/cards/\"\n");
    let before = std::fs::read_to_string(world.cards_file()).unwrap();

    let result = world.run(&["--update"]).unwrap();

    assert_eq!(result.code(), Some(1));
    assert_eq!(std::fs::read_to_string(world.cards_file()).unwrap(), before);
}

#[test]
fn test_malformed_database_line_is_reported() {
    let world = TestWorld::new();
    std::fs::write(world.cards_file(), "{\"name\": \"Arry\"}\nnot json\n").unwrap();

    let result = world.run(&["arry"]).unwrap();

    assert_eq!(result.code(), Some(1));
    assert!(result.stderr().contains("line 2"));
}

#[test]
fn test_version() {
    let world = TestWorld::new();
    let result = world.run(&["--version"]).unwrap();

    assert!(result.success());
    assert!(result.stdout().starts_with("thronescli "));
}
