//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Container file (positional).
pub fn file_arg() -> Arg {
    Arg::new("file")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("User, prefab or scene file")
}

/// Schema catalog (--schema).
pub fn schema_arg() -> Arg {
    Arg::new("schema")
        .long("schema")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("JSON class catalog (rszXXX.json)")
}

/// Game the file belongs to (-g/--game).
pub fn game_arg() -> Arg {
    Arg::new("game")
        .short('g')
        .long("game")
        .value_name("GAME")
        .default_value("re4")
        .help("Game (re2, re3, re4, re7, re8, dmc5, mhrise, sf6)")
}

/// Type database version (--tdb).
pub fn tdb_arg() -> Arg {
    Arg::new("tdb")
        .long("tdb")
        .value_name("N")
        .value_parser(value_parser!(u32))
        .help("Type database version (defaults to the game's current one)")
}

/// Verbosity (-v, repeatable).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Raise log level (-v info, -vv debug, -vvv trace)")
}

/// Print the game object hierarchy (--tree).
pub fn tree_arg() -> Arg {
    Arg::new("tree")
        .long("tree")
        .action(ArgAction::SetTrue)
        .help("Print the game object hierarchy instead of instances")
}

/// Class name criterion (--class).
pub fn class_filter_arg() -> Arg {
    Arg::new("class")
        .long("class")
        .value_name("TEXT")
        .help("Match instance class names")
}

/// Field name criterion (--field).
pub fn field_filter_arg() -> Arg {
    Arg::new("field")
        .long("field")
        .value_name("TEXT")
        .help("Match field names")
}

/// Field value criterion (--value).
pub fn value_filter_arg() -> Arg {
    Arg::new("value")
        .long("value")
        .value_name("TEXT")
        .help("Match rendered field values")
}

/// How criteria compare (--mode).
pub fn mode_arg() -> Arg {
    Arg::new("mode")
        .long("mode")
        .value_name("MODE")
        .default_value("contains")
        .value_parser(["exact", "contains", "regex"])
        .help("How criteria compare")
}

/// Output path (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write here instead of over the input")
}

/// Force an instance list rebuild (--rebuild).
pub fn rebuild_arg() -> Arg {
    Arg::new("rebuild")
        .long("rebuild")
        .action(ArgAction::SetTrue)
        .help("Rebuild the instance list before writing")
}

/// Class name or hash (positional).
pub fn class_arg() -> Arg {
    Arg::new("class")
        .value_name("CLASS")
        .required(true)
        .help("Class name or hex type hash")
}
