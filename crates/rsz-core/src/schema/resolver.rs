//! In-memory class registry with lookup helpers.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;

use super::types::{ClassDescriptor, FieldDescriptor};
use crate::FieldType;

/// Returned by name lookups that miss.
pub const NOT_FOUND: &str = "not found";

/// Returned by [`Schema::class_name`] for unknown hashes.
pub const UNKNOWN_CLASS: &str = "Unknown Class!";

/// A loaded type catalog, keyed by type hash and by class name.
///
/// Immutable once built. Classes are shared as `Arc` so instances can hold
/// on to their descriptor without borrowing the schema.
#[derive(Debug, Default)]
pub struct Schema {
    classes: IndexMap<u32, Arc<ClassDescriptor>>,
    by_name: HashMap<String, u32>,
}

impl Schema {
    /// Build a schema from descriptors, refining opaque field types.
    ///
    /// Every `Data` field is resolved here, before any instance is parsed.
    pub fn from_classes(classes: impl IntoIterator<Item = ClassDescriptor>) -> Self {
        let mut schema = Self::default();
        for mut class in classes {
            for field in &mut class.fields {
                field.refine_data_type();
                field.fill_natural_layout();
            }
            if let Some(&previous) = schema.by_name.get(&class.name) {
                if previous != class.type_hash {
                    tracing::warn!(
                        name = %class.name,
                        previous = format_args!("{previous:08x}"),
                        current = format_args!("{:08x}", class.type_hash),
                        "duplicate class name in schema"
                    );
                }
            }
            schema.by_name.insert(class.name.clone(), class.type_hash);
            schema.classes.insert(class.type_hash, Arc::new(class));
        }
        schema
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Classes in catalog order.
    pub fn classes(&self) -> impl Iterator<Item = &Arc<ClassDescriptor>> {
        self.classes.values()
    }

    pub fn resolve_by_hash(&self, type_hash: u32) -> Option<&Arc<ClassDescriptor>> {
        self.classes.get(&type_hash)
    }

    pub fn resolve_by_name(&self, name: &str) -> Option<&Arc<ClassDescriptor>> {
        self.by_name
            .get(name)
            .and_then(|hash| self.classes.get(hash))
    }

    pub fn field_at(&self, type_hash: u32, index: usize) -> Option<&FieldDescriptor> {
        self.resolve_by_hash(type_hash)?.fields.get(index)
    }

    // Sentinel accessors. These never fail so batch inspection code can run
    // over arbitrary hashes without branching on existence.

    pub fn class_name(&self, type_hash: u32) -> &str {
        self.resolve_by_hash(type_hash)
            .map_or(UNKNOWN_CLASS, |c| c.name.as_str())
    }

    pub fn class_crc(&self, type_hash: u32) -> u32 {
        self.resolve_by_hash(type_hash).map_or(0, |c| c.crc)
    }

    pub fn is_class_native(&self, type_hash: u32) -> bool {
        self.resolve_by_hash(type_hash).is_some_and(|c| c.native)
    }

    /// Number of fields, or -1 for an unknown class.
    pub fn field_count(&self, type_hash: u32) -> i32 {
        self.resolve_by_hash(type_hash)
            .map_or(-1, |c| c.fields.len() as i32)
    }

    pub fn field_name(&self, type_hash: u32, index: usize) -> &str {
        self.field_at(type_hash, index)
            .map_or(NOT_FOUND, |f| f.name.as_str())
    }

    /// Field type, or a sentinel distinguishing unknown class from bad index.
    pub fn field_type(&self, type_hash: u32, index: usize) -> FieldType {
        match self.resolve_by_hash(type_hash) {
            Some(class) => class
                .fields
                .get(index)
                .map_or(FieldType::OutOfRange, |f| f.field_type),
            None => FieldType::ClassNotFound,
        }
    }

    pub fn field_type_name(&self, type_hash: u32, index: usize) -> &str {
        self.field_at(type_hash, index)
            .map_or(NOT_FOUND, |f| f.field_type.as_str())
    }

    pub fn field_original_type(&self, type_hash: u32, index: usize) -> &str {
        self.field_at(type_hash, index)
            .map_or(NOT_FOUND, |f| f.original_type.as_str())
    }

    /// Field byte size, or -1.
    pub fn field_size(&self, type_hash: u32, index: usize) -> i64 {
        self.field_at(type_hash, index)
            .map_or(-1, |f| i64::from(f.size))
    }

    /// Field alignment, or -1.
    pub fn field_align(&self, type_hash: u32, index: usize) -> i64 {
        self.field_at(type_hash, index)
            .map_or(-1, |f| i64::from(f.align))
    }

    pub fn field_is_array(&self, type_hash: u32, index: usize) -> bool {
        self.field_at(type_hash, index).is_some_and(|f| f.array)
    }

    pub fn field_is_native(&self, type_hash: u32, index: usize) -> bool {
        self.field_at(type_hash, index).is_some_and(|f| f.native)
    }
}
