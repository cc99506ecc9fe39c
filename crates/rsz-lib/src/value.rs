//! Field values.

use std::fmt;

use rsz_core::{FieldDescriptor, FieldType};

use crate::instance::InstanceId;

/// One field slot of an instance.
///
/// Types without a dedicated variant are kept as raw bytes of the field's
/// size, which is also the fallback whenever typed decoding would not
/// reproduce the original bytes.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat4([f32; 16]),
    Guid([u8; 16]),
    String(String),
    Object(InstanceId),
    UserData(InstanceId),
    Data(Vec<u8>),
    Array(Vec<Value>),
}

/// How a field type is represented in memory and on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Repr {
    Bool,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Vec2,
    Vec3,
    Vec4,
    Mat4,
    Guid,
    String,
    Object,
    UserData,
    Raw,
}

impl Repr {
    pub(crate) fn of(ty: FieldType) -> Self {
        use FieldType as T;
        match ty {
            T::Bool => Self::Bool,
            T::S8 => Self::I8,
            T::U8 => Self::U8,
            T::S16 => Self::I16,
            T::U16 => Self::U16,
            T::S32 | T::Enum => Self::I32,
            T::U32 => Self::U32,
            T::S64 => Self::I64,
            T::U64 => Self::U64,
            T::F32 => Self::F32,
            T::F64 => Self::F64,
            T::Vec2 | T::Float2 => Self::Vec2,
            T::Vec3 | T::Float3 => Self::Vec3,
            T::Vec4 | T::Float4 | T::Quaternion => Self::Vec4,
            T::Mat4 => Self::Mat4,
            T::Guid | T::Uuid | T::GameObjectRef => Self::Guid,
            T::String | T::Resource | T::RuntimeType => Self::String,
            T::Object => Self::Object,
            T::UserData => Self::UserData,
            _ => Self::Raw,
        }
    }

    /// Bytes the typed form occupies, if fixed.
    pub(crate) fn width(self) -> Option<usize> {
        Some(match self {
            Self::Bool | Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 | Self::Vec2 => 8,
            Self::Vec3 => 12,
            Self::Vec4 | Self::Guid => 16,
            Self::Mat4 => 64,
            Self::String | Self::Object | Self::UserData | Self::Raw => return None,
        })
    }
}

impl Value {
    /// Zero value for one element of `field`.
    pub fn element_default(field: &FieldDescriptor) -> Value {
        match Repr::of(field.field_type) {
            Repr::Bool => Value::Bool(false),
            Repr::I8 => Value::I8(0),
            Repr::U8 => Value::U8(0),
            Repr::I16 => Value::I16(0),
            Repr::U16 => Value::U16(0),
            Repr::I32 => Value::I32(0),
            Repr::U32 => Value::U32(0),
            Repr::I64 => Value::I64(0),
            Repr::U64 => Value::U64(0),
            Repr::F32 => Value::F32(0.0),
            Repr::F64 => Value::F64(0.0),
            Repr::Vec2 => Value::Vec2([0.0; 2]),
            Repr::Vec3 => Value::Vec3([0.0; 3]),
            Repr::Vec4 => Value::Vec4([0.0; 4]),
            Repr::Mat4 => Value::Mat4([0.0; 16]),
            Repr::Guid => Value::Guid([0; 16]),
            Repr::String => Value::String(String::new()),
            Repr::Object => Value::Object(InstanceId::NULL),
            Repr::UserData => Value::UserData(InstanceId::NULL),
            Repr::Raw => Value::Data(vec![0; field.size as usize]),
        }
    }

    /// Zero value for a whole field slot: empty for arrays.
    pub fn field_default(field: &FieldDescriptor) -> Value {
        if field.array {
            Value::Array(Vec::new())
        } else {
            Value::element_default(field)
        }
    }

    /// Variant name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Bool",
            Value::I8(_) => "I8",
            Value::U8(_) => "U8",
            Value::I16(_) => "I16",
            Value::U16(_) => "U16",
            Value::I32(_) => "I32",
            Value::U32(_) => "U32",
            Value::I64(_) => "I64",
            Value::U64(_) => "U64",
            Value::F32(_) => "F32",
            Value::F64(_) => "F64",
            Value::Vec2(_) => "Vec2",
            Value::Vec3(_) => "Vec3",
            Value::Vec4(_) => "Vec4",
            Value::Mat4(_) => "Mat4",
            Value::Guid(_) => "Guid",
            Value::String(_) => "String",
            Value::Object(_) => "Object",
            Value::UserData(_) => "UserData",
            Value::Data(_) => "Data",
            Value::Array(_) => "Array",
        }
    }

    fn repr(&self) -> Option<Repr> {
        Some(match self {
            Value::Bool(_) => Repr::Bool,
            Value::I8(_) => Repr::I8,
            Value::U8(_) => Repr::U8,
            Value::I16(_) => Repr::I16,
            Value::U16(_) => Repr::U16,
            Value::I32(_) => Repr::I32,
            Value::U32(_) => Repr::U32,
            Value::I64(_) => Repr::I64,
            Value::U64(_) => Repr::U64,
            Value::F32(_) => Repr::F32,
            Value::F64(_) => Repr::F64,
            Value::Vec2(_) => Repr::Vec2,
            Value::Vec3(_) => Repr::Vec3,
            Value::Vec4(_) => Repr::Vec4,
            Value::Mat4(_) => Repr::Mat4,
            Value::Guid(_) => Repr::Guid,
            Value::String(_) => Repr::String,
            Value::Object(_) => Repr::Object,
            Value::UserData(_) => Repr::UserData,
            Value::Data(_) | Value::Array(_) => return None,
        })
    }

    /// Whether this value encodes as one element of `field` without loss.
    ///
    /// Raw `Data` fits a fixed-size field when it has exactly the field's
    /// size, and a string field when it holds whole UTF-16 units.
    pub fn fits_element(&self, field: &FieldDescriptor) -> bool {
        let repr = Repr::of(field.field_type);
        match (repr, self) {
            (Repr::String, Value::Data(bytes)) => bytes.len() % 2 == 0,
            (Repr::String | Repr::Object | Repr::UserData, value) => value.repr() == Some(repr),
            (_, Value::Data(bytes)) => bytes.len() == field.size as usize,
            (repr, value) => {
                value.repr() == Some(repr) && repr.width().is_some_and(|width| width <= field.size as usize)
            }
        }
    }

    /// Whether this value can fill the whole slot of `field`.
    pub fn fits_field(&self, field: &FieldDescriptor) -> bool {
        match (field.array, self) {
            (true, Value::Array(items)) => items.iter().all(|item| item.fits_element(field)),
            (true, _) => false,
            (false, value) => value.fits_element(field),
        }
    }

    /// Referenced instance, for `Object` and `UserData` values.
    pub fn as_reference(&self) -> Option<InstanceId> {
        match self {
            Value::Object(id) | Value::UserData(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        self.as_reference().is_some()
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Visit every reference in this value, including array elements.
    pub fn for_each_reference(&self, f: &mut impl FnMut(InstanceId)) {
        match self {
            Value::Object(id) | Value::UserData(id) => f(*id),
            Value::Array(items) => items.iter().for_each(|v| v.for_each_reference(f)),
            _ => {}
        }
    }

    /// Rewrite every reference in this value, including array elements.
    pub fn map_references(&mut self, f: &mut impl FnMut(InstanceId) -> InstanceId) {
        match self {
            Value::Object(id) | Value::UserData(id) => *id = f(*id),
            Value::Array(items) => items.iter_mut().for_each(|v| v.map_references(f)),
            _ => {}
        }
    }
}

fn write_floats(f: &mut fmt::Formatter<'_>, values: &[f32]) -> fmt::Result {
    f.write_str("(")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{v}")?;
    }
    f.write_str(")")
}

/// Plain rendering. References print as `@index`; see `Rsz::value_text`
/// for the class-qualified form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Vec2(v) => write_floats(f, v),
            Value::Vec3(v) => write_floats(f, v),
            Value::Vec4(v) => write_floats(f, v),
            Value::Mat4(v) => write_floats(f, v),
            Value::Guid(bytes) => write!(f, "{}", uuid::Uuid::from_bytes_le(*bytes)),
            Value::String(s) => f.write_str(s),
            Value::Object(id) | Value::UserData(id) if id.is_null() => f.write_str("null"),
            Value::Object(id) | Value::UserData(id) => write!(f, "@{}", id.0),
            Value::Data(bytes) => f.write_str(&hex::encode(bytes)),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}
