use std::fmt::Write;
use std::path::PathBuf;

use rsz_core::{ClassDescriptor, Schema, SchemaRegistry};

use super::error::{CliError, Result};

pub struct ClassArgs {
    pub schema: PathBuf,
    pub class: String,
}

pub fn run(args: ClassArgs) -> Result<()> {
    let schema = SchemaRegistry::global().load(&args.schema)?;
    let class = lookup(&schema, &args.class)?;
    print!("{}", describe(class));
    Ok(())
}

/// Find a class by name, falling back to a hex type hash.
pub fn lookup<'s>(schema: &'s Schema, key: &str) -> Result<&'s ClassDescriptor> {
    if let Some(class) = schema.resolve_by_name(key) {
        return Ok(class.as_ref());
    }
    let digits = key.strip_prefix("0x").unwrap_or(key);
    u32::from_str_radix(digits, 16)
        .ok()
        .and_then(|hash| schema.resolve_by_hash(hash))
        .map(|class| class.as_ref())
        .ok_or_else(|| CliError::UnknownClass(key.to_string()))
}

pub fn describe(class: &ClassDescriptor) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", class.name);
    let _ = writeln!(out, "  hash: {:#010x}", class.type_hash);
    let _ = writeln!(out, "  crc: {:#010x}", class.crc);
    if class.native {
        let _ = writeln!(out, "  native");
    }
    for (index, field) in class.fields.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {index:>3} {}: {} (size {}, align {})",
            field.name,
            field.display_type(),
            field.size,
            field.align
        );
    }
    out
}
