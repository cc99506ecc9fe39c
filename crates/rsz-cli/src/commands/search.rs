use std::path::PathBuf;

use rsz_lib::{Document, MatchMode, SearchQuery, Searcher, TextMatcher};

use super::error::{CliError, Result};
use super::schema_source::SchemaSource;

pub struct SearchArgs {
    pub file: PathBuf,
    pub source: SchemaSource,
    pub class: Option<String>,
    pub field: Option<String>,
    pub value: Option<String>,
    pub mode: MatchMode,
}

pub fn run(args: SearchArgs) -> Result<()> {
    let query = build_query(&args)?;
    let doc = Document::open(&args.file, args.source.load()?)?;
    let mut searcher = Searcher::new(query);
    let rsz = doc.rsz();
    for id in searcher.search(rsz) {
        println!("{}", rsz.instance_label(id));
    }
    tracing::debug!(class_scans = searcher.class_scans(), "search finished");
    Ok(())
}

pub fn build_query(args: &SearchArgs) -> Result<SearchQuery> {
    let matcher = |text: &Option<String>| match text {
        Some(text) => TextMatcher::new(args.mode, text),
        None => Ok(TextMatcher::disabled()),
    };
    let query = SearchQuery {
        instance_name: matcher(&args.class)?,
        field_name: matcher(&args.field)?,
        field_value: matcher(&args.value)?,
    };
    if query.is_empty() {
        return Err(CliError::Usage("nothing to search for; pass --class, --field or --value"));
    }
    Ok(query)
}
