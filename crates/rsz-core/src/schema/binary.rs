//! Binary serialization for schemas using postcard.
//!
//! Large catalogs take a while to parse as JSON; the binary form is a cache.

use super::json::SchemaError;
use super::types::ClassDescriptor;
use super::Schema;

impl Schema {
    /// Deserialize a schema from binary format.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, SchemaError> {
        let classes: Vec<ClassDescriptor> =
            postcard::from_bytes(bytes).map_err(SchemaError::Binary)?;
        Ok(Self::from_classes(classes))
    }

    /// Serialize schema to binary format.
    pub fn to_binary(&self) -> Vec<u8> {
        let classes: Vec<&ClassDescriptor> = self.classes().map(|c| c.as_ref()).collect();
        postcard::to_allocvec(&classes).expect("serialization should not fail")
    }
}
