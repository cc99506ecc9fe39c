//! Tests for CLI dispatch logic: argument parsing and params extraction.

use std::path::PathBuf;

use rsz_lib::MatchMode;
use tracing::level_filters::LevelFilter;

use super::*;
use crate::cli::commands::{class_command, dump_command, resave_command, search_command};

#[test]
fn dump_defaults() {
    let m = dump_command()
        .try_get_matches_from(["dump", "a.user.2", "--schema", "rszre4.json"])
        .unwrap();

    let params = DumpParams::from_matches(&m);

    assert_eq!(params.file, PathBuf::from("a.user.2"));
    assert_eq!(params.source.schema, PathBuf::from("rszre4.json"));
    assert_eq!(params.source.game, "re4");
    assert_eq!(params.source.tdb, None);
    assert!(!params.tree);
}

#[test]
fn dump_requires_schema() {
    let result = dump_command().try_get_matches_from(["dump", "a.user.2"]);

    assert!(result.is_err());
}

#[test]
fn game_and_tdb_select_version() {
    let m = dump_command()
        .try_get_matches_from([
            "dump", "a.pfb.16", "--schema", "s.json", "-g", "dmc5", "--tdb", "67", "--tree",
        ])
        .unwrap();

    let params = DumpParams::from_matches(&m);
    let version = params.source.version().unwrap();

    assert!(params.tree);
    assert_eq!(version.tdb_version, 67);
    assert!(version.uses_embedded_userdata());
}

#[test]
fn unknown_game_is_an_error() {
    let m = dump_command()
        .try_get_matches_from(["dump", "a.user.2", "--schema", "s.json", "-g", "zelda"])
        .unwrap();

    let params = DumpParams::from_matches(&m);

    assert!(params.source.version().is_err());
}

#[test]
fn tdb_must_be_numeric() {
    let result =
        dump_command().try_get_matches_from(["dump", "a.user.2", "--schema", "s.json", "--tdb", "x"]);

    assert!(result.is_err());
}

#[test]
fn search_criteria_and_mode() {
    let m = search_command()
        .try_get_matches_from([
            "search", "a.user.2", "--schema", "s.json", "--class", "Enemy", "--value", "^1", "--mode",
            "regex",
        ])
        .unwrap();

    let params = SearchParams::from_matches(&m);

    assert_eq!(params.class.as_deref(), Some("Enemy"));
    assert_eq!(params.field, None);
    assert_eq!(params.value.as_deref(), Some("^1"));
    assert_eq!(params.mode, MatchMode::Regex);
}

#[test]
fn search_mode_defaults_to_contains() {
    let m = search_command()
        .try_get_matches_from(["search", "a.user.2", "--schema", "s.json", "--field", "hp"])
        .unwrap();

    assert_eq!(SearchParams::from_matches(&m).mode, MatchMode::Contains);
}

#[test]
fn search_rejects_unknown_mode() {
    let result = search_command().try_get_matches_from([
        "search", "a.user.2", "--schema", "s.json", "--mode", "glob",
    ]);

    assert!(result.is_err());
}

#[test]
fn resave_output_and_rebuild() {
    let m = resave_command()
        .try_get_matches_from([
            "resave", "a.user.2", "--schema", "s.json", "-o", "b.user.2", "--rebuild",
        ])
        .unwrap();

    let params = ResaveParams::from_matches(&m);

    assert_eq!(params.output, Some(PathBuf::from("b.user.2")));
    assert!(params.rebuild);
}

#[test]
fn class_takes_name_and_schema() {
    let m = class_command()
        .try_get_matches_from(["class", "app.Foo", "--schema", "s.json"])
        .unwrap();

    let params = ClassParams::from_matches(&m);

    assert_eq!(params.class, "app.Foo");
    assert_eq!(params.schema, PathBuf::from("s.json"));
}

#[test]
fn verbosity_is_global() {
    let quiet = build_cli()
        .try_get_matches_from(["rsz", "class", "Foo", "--schema", "s.json"])
        .unwrap();
    let loud = build_cli()
        .try_get_matches_from(["rsz", "class", "Foo", "--schema", "s.json", "-vv"])
        .unwrap();

    assert_eq!(log_level(&quiet), LevelFilter::WARN);
    assert_eq!(log_level(&loud), LevelFilter::DEBUG);
}

#[test]
fn subcommand_is_required() {
    assert!(build_cli().try_get_matches_from(["rsz"]).is_err());
}
