//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors pull the relevant fields
//! - `Into<*Args>` impls bridge dispatch to command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use rsz_lib::MatchMode;
use tracing::level_filters::LevelFilter;

use crate::commands::class::ClassArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::resave::ResaveArgs;
use crate::commands::schema_source::SchemaSource;
use crate::commands::search::SearchArgs;

pub struct DumpParams {
    pub file: PathBuf,
    pub source: SchemaSource,
    pub tree: bool,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: parse_file(m),
            source: parse_schema_source(m),
            tree: m.get_flag("tree"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            file: p.file,
            source: p.source,
            tree: p.tree,
        }
    }
}

pub struct SearchParams {
    pub file: PathBuf,
    pub source: SchemaSource,
    pub class: Option<String>,
    pub field: Option<String>,
    pub value: Option<String>,
    pub mode: MatchMode,
}

impl SearchParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: parse_file(m),
            source: parse_schema_source(m),
            class: m.get_one::<String>("class").cloned(),
            field: m.get_one::<String>("field").cloned(),
            value: m.get_one::<String>("value").cloned(),
            mode: parse_mode(m),
        }
    }
}

impl From<SearchParams> for SearchArgs {
    fn from(p: SearchParams) -> Self {
        Self {
            file: p.file,
            source: p.source,
            class: p.class,
            field: p.field,
            value: p.value,
            mode: p.mode,
        }
    }
}

pub struct ResaveParams {
    pub file: PathBuf,
    pub source: SchemaSource,
    pub output: Option<PathBuf>,
    pub rebuild: bool,
}

impl ResaveParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: parse_file(m),
            source: parse_schema_source(m),
            output: m.get_one::<PathBuf>("output").cloned(),
            rebuild: m.get_flag("rebuild"),
        }
    }
}

impl From<ResaveParams> for ResaveArgs {
    fn from(p: ResaveParams) -> Self {
        Self {
            file: p.file,
            source: p.source,
            output: p.output,
            rebuild: p.rebuild,
        }
    }
}

pub struct ClassParams {
    pub schema: PathBuf,
    pub class: String,
}

impl ClassParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema: m.get_one::<PathBuf>("schema").cloned().unwrap_or_default(),
            class: m.get_one::<String>("class").cloned().unwrap_or_default(),
        }
    }
}

impl From<ClassParams> for ClassArgs {
    fn from(p: ClassParams) -> Self {
        Self {
            schema: p.schema,
            class: p.class,
        }
    }
}

/// Log level for the global `-v` count. Warnings are always shown.
pub fn log_level(m: &ArgMatches) -> LevelFilter {
    match m.get_count("verbose") {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

// Required args: clap rejects the command line before these run.
fn parse_file(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("file").cloned().unwrap_or_default()
}

fn parse_schema_source(m: &ArgMatches) -> SchemaSource {
    SchemaSource {
        schema: m.get_one::<PathBuf>("schema").cloned().unwrap_or_default(),
        game: m
            .get_one::<String>("game")
            .cloned()
            .unwrap_or_else(|| "re4".to_string()),
        tdb: m.get_one::<u32>("tdb").copied(),
    }
}

fn parse_mode(m: &ArgMatches) -> MatchMode {
    match m.get_one::<String>("mode").map(|s| s.as_str()) {
        Some("exact") => MatchMode::Exact,
        Some("regex") => MatchMode::Regex,
        _ => MatchMode::Contains,
    }
}
