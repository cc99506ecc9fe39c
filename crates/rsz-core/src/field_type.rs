//! Canonical field type definitions.
//!
//! Every schema field carries one of these kinds. `Data` is the schema's
//! placeholder for opaque bytes and gets refined from the field layout at load
//! time (see [`FieldType::guess_from_layout`]).

use serde::{Deserialize, Serialize};

/// Declared type of a schema field.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum FieldType {
    Undefined,
    Object,
    UserData,
    Resource,
    String,
    RuntimeType,
    Bool,
    S8,
    U8,
    S16,
    U16,
    S32,
    U32,
    S64,
    U64,
    F32,
    F64,
    Enum,
    Vec2,
    Vec3,
    Vec4,
    Float2,
    Float3,
    Float4,
    Int2,
    Int3,
    Int4,
    Uint2,
    Uint3,
    Uint4,
    Quaternion,
    Mat4,
    Guid,
    Uuid,
    GameObjectRef,
    Color,
    Range,
    RangeI,
    Point,
    Size,
    Rect,
    Position,
    Sphere,
    AABB,
    Capsule,
    OBB,
    /// Opaque bytes; refined once from size/alignment.
    Data,
    /// Resolver sentinel: field index past the end of the class.
    OutOfRange,
    /// Resolver sentinel: unknown type hash.
    ClassNotFound,
}

const NAMES: &[(&str, FieldType)] = &[
    ("Undefined", FieldType::Undefined),
    ("Object", FieldType::Object),
    ("UserData", FieldType::UserData),
    ("Resource", FieldType::Resource),
    ("String", FieldType::String),
    ("RuntimeType", FieldType::RuntimeType),
    ("Bool", FieldType::Bool),
    ("S8", FieldType::S8),
    ("U8", FieldType::U8),
    ("S16", FieldType::S16),
    ("U16", FieldType::U16),
    ("S32", FieldType::S32),
    ("U32", FieldType::U32),
    ("S64", FieldType::S64),
    ("U64", FieldType::U64),
    ("F32", FieldType::F32),
    ("F64", FieldType::F64),
    ("Enum", FieldType::Enum),
    ("Vec2", FieldType::Vec2),
    ("Vec3", FieldType::Vec3),
    ("Vec4", FieldType::Vec4),
    ("Float2", FieldType::Float2),
    ("Float3", FieldType::Float3),
    ("Float4", FieldType::Float4),
    ("Int2", FieldType::Int2),
    ("Int3", FieldType::Int3),
    ("Int4", FieldType::Int4),
    ("Uint2", FieldType::Uint2),
    ("Uint3", FieldType::Uint3),
    ("Uint4", FieldType::Uint4),
    ("Quaternion", FieldType::Quaternion),
    ("Mat4", FieldType::Mat4),
    ("Guid", FieldType::Guid),
    ("Uuid", FieldType::Uuid),
    ("GameObjectRef", FieldType::GameObjectRef),
    ("Color", FieldType::Color),
    ("Range", FieldType::Range),
    ("RangeI", FieldType::RangeI),
    ("Point", FieldType::Point),
    ("Size", FieldType::Size),
    ("Rect", FieldType::Rect),
    ("Position", FieldType::Position),
    ("Sphere", FieldType::Sphere),
    ("AABB", FieldType::AABB),
    ("Capsule", FieldType::Capsule),
    ("OBB", FieldType::OBB),
    ("Data", FieldType::Data),
    ("out_of_range", FieldType::OutOfRange),
    ("class_not_found", FieldType::ClassNotFound),
];

impl FieldType {
    /// Parse a schema type name, ignoring ASCII case.
    ///
    /// The resolver sentinels are not accepted here: they never appear in a
    /// schema file.
    pub fn from_name(name: &str) -> Option<Self> {
        NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, ty)| ty)
            .filter(|ty| !ty.is_sentinel())
    }

    /// Name as written in schema files.
    pub fn as_str(self) -> &'static str {
        NAMES
            .iter()
            .find(|&&(_, ty)| ty == self)
            .map(|&(n, _)| n)
            .unwrap_or("Undefined")
    }

    /// Resolve the opaque `Data` placeholder from a field's byte layout.
    ///
    /// Returns `None` when the layout is still ambiguous.
    pub fn guess_from_layout(size: u32, align: u32) -> Option<Self> {
        match size {
            64 => Some(Self::Mat4),
            16 if align == 8 => Some(Self::Guid),
            16 => Some(Self::Vec4),
            8 if align == 8 => Some(Self::U64),
            8 => Some(Self::Vec2),
            1 => Some(Self::U8),
            _ => None,
        }
    }

    /// Object or UserData: the value is an index into the instance list.
    pub fn is_reference(self) -> bool {
        matches!(self, Self::Object | Self::UserData)
    }

    /// String or Resource.
    pub fn is_string(self) -> bool {
        matches!(self, Self::String | Self::Resource)
    }

    /// Encoded as a length-prefixed UTF-16 string on disk.
    pub fn encodes_as_string(self) -> bool {
        self.is_string() || self == Self::RuntimeType
    }

    pub fn is_sentinel(self) -> bool {
        matches!(self, Self::OutOfRange | Self::ClassNotFound)
    }

    /// Natural `(size, align)` used when a schema omits them.
    ///
    /// Opaque kinds have no natural layout and report `(0, 1)`.
    pub fn natural_layout(self) -> (u32, u32) {
        match self {
            Self::Bool | Self::S8 | Self::U8 => (1, 1),
            Self::S16 | Self::U16 => (2, 2),
            Self::S32 | Self::U32 | Self::F32 | Self::Enum | Self::Color => (4, 4),
            Self::Object | Self::UserData => (4, 4),
            Self::String | Self::Resource | Self::RuntimeType => (4, 4),
            Self::S64 | Self::U64 | Self::F64 => (8, 8),
            Self::Vec2
            | Self::Float2
            | Self::Int2
            | Self::Uint2
            | Self::Range
            | Self::RangeI
            | Self::Point
            | Self::Size => (8, 4),
            Self::Float3 | Self::Int3 | Self::Uint3 => (12, 4),
            Self::Float4 | Self::Int4 | Self::Uint4 | Self::Rect => (16, 4),
            Self::Vec3 | Self::Vec4 | Self::Quaternion | Self::Sphere => (16, 16),
            Self::Guid | Self::Uuid | Self::GameObjectRef => (16, 8),
            Self::Position => (24, 8),
            Self::AABB => (32, 16),
            Self::Capsule => (48, 16),
            Self::Mat4 => (64, 16),
            Self::OBB => (80, 16),
            Self::Undefined | Self::Data | Self::OutOfRange | Self::ClassNotFound => (0, 1),
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
