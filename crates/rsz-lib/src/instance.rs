//! Schema-typed instances.

use std::fmt;
use std::sync::Arc;

use rsz_core::{ClassDescriptor, FieldDescriptor, Schema};

use crate::value::Value;

/// Index into an RSZ instance list. Index 0 is the null instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u32);

impl InstanceId {
    pub const NULL: InstanceId = InstanceId(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An object conforming to a class descriptor.
///
/// `values` always has one slot per field of `class`.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub class: Arc<ClassDescriptor>,
    /// Checksum stored next to this instance, normally the class crc.
    pub crc: u32,
    pub values: Vec<Value>,
}

impl Instance {
    /// New instance with every field at its zero value.
    pub fn new_default(class: Arc<ClassDescriptor>) -> Self {
        let values = class.fields.iter().map(Value::field_default).collect();
        Self {
            crc: class.crc,
            class,
            values,
        }
    }

    /// The placeholder occupying index 0 of every instance list.
    pub fn null() -> Self {
        Self::new_default(Arc::new(ClassDescriptor::null()))
    }

    pub fn is_null(&self) -> bool {
        self.class.is_null()
    }

    /// Class name, used as the instance name.
    pub fn name(&self) -> &str {
        &self.class.name
    }

    pub fn type_hash(&self) -> u32 {
        self.class.type_hash
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.class.index_of_field(name).map(|i| &self.values[i])
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.class.index_of_field(name).map(|i| &mut self.values[i])
    }

    /// Fields paired with their values, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&FieldDescriptor, &Value)> {
        self.class.fields.iter().zip(&self.values)
    }
}

/// A fresh array element.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayElement {
    Value(Value),
    /// New instance to be registered before a reference to it is inserted.
    Instance(Instance),
}

/// Build a new element for an array field.
///
/// Reference fields need a class: `class_override` if given, otherwise the
/// element type named by the field's `original_type`. Returns `None` when no
/// class resolves.
pub fn create_array_element(
    schema: &Schema,
    field: &FieldDescriptor,
    class_override: Option<&str>,
) -> Option<ArrayElement> {
    if !field.is_reference() {
        return Some(ArrayElement::Value(Value::element_default(field)));
    }
    let class_name = class_override.or_else(|| field.element_type_name())?;
    let class = schema.resolve_by_name(class_name)?;
    Some(ArrayElement::Instance(Instance::new_default(Arc::clone(class))))
}
