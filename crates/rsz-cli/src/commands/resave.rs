use std::path::PathBuf;

use rsz_lib::Document;

use super::error::Result;
use super::schema_source::SchemaSource;

pub struct ResaveArgs {
    pub file: PathBuf,
    pub source: SchemaSource,
    pub output: Option<PathBuf>,
    pub rebuild: bool,
}

pub fn run(args: ResaveArgs) -> Result<()> {
    let mut doc = Document::open(&args.file, args.source.load()?)?;
    if args.rebuild {
        doc.rsz_mut().rebuild();
    }
    match &args.output {
        Some(output) => doc.save_as(output)?,
        None => doc.save()?,
    }
    let written = args.output.as_ref().unwrap_or(&args.file);
    tracing::info!(path = %written.display(), instances = doc.rsz().instances().len(), "saved");
    Ok(())
}
