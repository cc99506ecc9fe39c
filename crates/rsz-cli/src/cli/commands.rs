//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Schema and version flags shared by every command that reads a file.
fn with_schema_args(cmd: Command) -> Command {
    cmd.arg(schema_arg()).arg(game_arg()).arg(tdb_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("rsz")
        .about("Inspect and resave RSZ user, prefab and scene files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(dump_command())
        .subcommand(search_command())
        .subcommand(resave_command())
        .subcommand(class_command())
}

/// Print instances or the game object hierarchy.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Print every instance of a file")
        .after_help(
            r#"EXAMPLES:
  rsz dump enemy.user.2 --schema rszre4.json
  rsz dump stage.scn.20 --schema rszre4.json --tree
  rsz dump old.pfb.16 --schema rszdmc5.json -g dmc5"#,
        )
        .arg(file_arg())
        .arg(tree_arg());

    with_schema_args(cmd)
}

/// Find instances by class, field name and field value.
pub fn search_command() -> Command {
    let cmd = Command::new("search")
        .about("Find instances by class, field name or value")
        .after_help(
            r#"EXAMPLES:
  rsz search a.user.2 --schema rszre4.json --class Enemy
  rsz search a.user.2 --schema rszre4.json --field hp --value 100 --mode exact
  rsz search a.user.2 --schema rszre4.json --value '^Boss\d+$' --mode regex"#,
        )
        .arg(file_arg())
        .arg(class_filter_arg())
        .arg(field_filter_arg())
        .arg(value_filter_arg())
        .arg(mode_arg());

    with_schema_args(cmd)
}

/// Read a file and write it back.
pub fn resave_command() -> Command {
    let cmd = Command::new("resave")
        .about("Read a file and write it back")
        .after_help(
            r#"EXAMPLES:
  rsz resave a.user.2 --schema rszre4.json
  rsz resave a.user.2 --schema rszre4.json -o b.user.2 --rebuild"#,
        )
        .arg(file_arg())
        .arg(output_arg())
        .arg(rebuild_arg());

    with_schema_args(cmd)
}

/// Describe one schema class.
pub fn class_command() -> Command {
    Command::new("class")
        .about("Show a class from the schema")
        .after_help(
            r#"EXAMPLES:
  rsz class app.EnemyParam --schema rszre4.json
  rsz class 0x1a2b3c4d --schema rszre4.json"#,
        )
        .arg(class_arg())
        .arg(schema_arg())
}
