//! JSON deserialization for RSZ type catalogs.
//!
//! The catalog is one object keyed by hex type hash. Each value describes a
//! class and its fields in serialization order.

use indexmap::IndexMap;
use serde::Deserialize;

use super::types::{ClassDescriptor, FieldDescriptor};
use super::Schema;
use crate::FieldType;

/// Error while loading a schema.
#[derive(Debug)]
pub enum SchemaError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Binary(postcard::Error),
    /// Catalog key or crc that is not a hex number.
    BadHex(String),
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read schema: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Binary(e) => write!(f, "binary decode error: {e}"),
            Self::BadHex(s) => write!(f, "invalid hex number in schema: {s:?}"),
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Binary(e) => Some(e),
            Self::BadHex(_) => None,
        }
    }
}

impl Schema {
    /// Parse a schema from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let raw: IndexMap<String, RawEntry> =
            serde_json::from_str(json).map_err(SchemaError::Json)?;

        let mut classes = Vec::with_capacity(raw.len());
        for (key, entry) in raw {
            let RawEntry::Class(class) = entry else {
                tracing::debug!(key = %key, "skipping non-class schema entry");
                continue;
            };
            let type_hash = parse_hex(&key)?;
            classes.push(class.into_descriptor(type_hash)?);
        }

        Ok(Self::from_classes(classes))
    }

    /// Read and parse a schema file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, SchemaError> {
        let text = std::fs::read_to_string(path).map_err(SchemaError::Io)?;
        Self::from_json(&text)
    }
}

/// Parse a hex number with or without a `0x` prefix.
pub(crate) fn parse_hex(text: &str) -> Result<u32, SchemaError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u32::from_str_radix(digits, 16).map_err(|_| SchemaError::BadHex(text.to_string()))
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Class(RawClass),
    Other(#[allow(dead_code)] serde_json::Value),
}

#[derive(Debug, Deserialize)]
struct RawClass {
    #[serde(default)]
    crc: RawHex,
    name: String,
    #[serde(default)]
    native: bool,
    #[serde(default)]
    fields: Vec<RawField>,
}

impl RawClass {
    fn into_descriptor(self, type_hash: u32) -> Result<ClassDescriptor, SchemaError> {
        let crc = match self.crc {
            RawHex::Text(text) => parse_hex(&text)?,
            RawHex::Number(n) => n,
        };
        Ok(ClassDescriptor {
            type_hash,
            crc,
            name: self.name,
            native: self.native,
            fields: self.fields.into_iter().map(Into::into).collect(),
        })
    }
}

/// Hex string in catalogs written by dumpers, plain number in hand-written ones.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawHex {
    Text(String),
    Number(u32),
}

impl Default for RawHex {
    fn default() -> Self {
        Self::Number(0)
    }
}

#[derive(Debug, Deserialize)]
struct RawField {
    name: String,
    #[serde(default)]
    align: u32,
    #[serde(default)]
    size: u32,
    #[serde(default)]
    array: bool,
    #[serde(default)]
    native: bool,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    original_type: String,
}

impl From<RawField> for FieldDescriptor {
    fn from(raw: RawField) -> Self {
        let field_type = FieldType::from_name(&raw.type_name).unwrap_or_else(|| {
            tracing::debug!(field = %raw.name, ty = %raw.type_name, "unknown field type");
            FieldType::Undefined
        });
        let mut field = FieldDescriptor::new(raw.name, field_type)
            .with_layout(raw.size, raw.align)
            .with_array(raw.array)
            .with_original_type(raw.original_type);
        field.native = raw.native;
        field
    }
}
