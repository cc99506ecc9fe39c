//! Schema type definitions.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::FieldType;

/// One class of the type catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDescriptor {
    /// Type hash, the primary key.
    pub type_hash: u32,
    /// Layout checksum stored next to every instance of this class.
    pub crc: u32,
    /// Fully qualified class name (e.g. `app.ropeway.EnemyController`).
    pub name: String,
    pub native: bool,
    /// Fields in serialization order.
    pub fields: Vec<FieldDescriptor>,
}

impl ClassDescriptor {
    /// Placeholder class for the null instance at index 0.
    pub fn null() -> Self {
        Self {
            type_hash: 0,
            crc: 0,
            name: String::new(),
            native: false,
            fields: Vec::new(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.type_hash == 0
    }

    pub fn index_of_field(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl PartialEq for ClassDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.type_hash == other.type_hash
    }
}

impl Eq for ClassDescriptor {}

/// One field of a class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub align: u32,
    pub size: u32,
    pub array: bool,
    pub native: bool,
    pub field_type: FieldType,
    /// Type as spelled by the engine (e.g. ``System.Collections.Generic.List`1<app.Foo>``).
    pub original_type: String,
    #[serde(skip)]
    display_type: OnceLock<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let (size, align) = field_type.natural_layout();
        Self {
            name: name.into(),
            align,
            size,
            array: false,
            native: false,
            field_type,
            original_type: String::new(),
            display_type: OnceLock::new(),
        }
    }

    pub fn with_layout(mut self, size: u32, align: u32) -> Self {
        self.size = size;
        self.align = align;
        self
    }

    pub fn with_array(mut self, array: bool) -> Self {
        self.array = array;
        self
    }

    pub fn with_original_type(mut self, original_type: impl Into<String>) -> Self {
        self.original_type = original_type.into();
        self
    }

    /// Refine an opaque `Data` type from size and alignment.
    ///
    /// Has no effect on any other type, so calling it again is a no-op.
    pub fn refine_data_type(&mut self) {
        if self.field_type != FieldType::Data {
            return;
        }
        if let Some(ty) = FieldType::guess_from_layout(self.size, self.align) {
            self.field_type = ty;
        }
    }

    /// Fill a missing size/alignment from the declared type.
    pub(crate) fn fill_natural_layout(&mut self) {
        let (size, align) = self.field_type.natural_layout();
        if self.size == 0 {
            self.size = size;
        }
        if self.align == 0 {
            self.align = align;
        }
    }

    pub fn is_reference(&self) -> bool {
        self.field_type.is_reference()
    }

    pub fn is_string(&self) -> bool {
        self.field_type.is_string()
    }

    /// Name shown for the field's type, cached on first use.
    pub fn display_type(&self) -> &str {
        self.display_type.get_or_init(|| {
            if !self.original_type.is_empty() {
                self.original_type.clone()
            } else if self.array {
                format!("{}[]", self.field_type)
            } else {
                self.field_type.to_string()
            }
        })
    }

    /// Element class name carried by `original_type`.
    ///
    /// Strips array brackets and generic collection wrappers:
    /// ``List`1<app.Foo>`` and `app.Foo[]` both yield `app.Foo`.
    pub fn element_type_name(&self) -> Option<&str> {
        element_type_name(&self.original_type)
    }
}

/// Strip collection syntax from an engine type name.
pub fn element_type_name(original: &str) -> Option<&str> {
    let mut name = original.trim();
    if let (Some(open), Some(close)) = (name.find('<'), name.rfind('>')) {
        if open < close {
            name = name[open + 1..close].trim();
        }
    }
    while let Some(stripped) = name.strip_suffix("[]") {
        name = stripped.trim_end();
    }
    if name.is_empty() { None } else { Some(name) }
}
