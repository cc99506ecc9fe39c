#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for RSZ type information.
//!
//! Two layers:
//! - **Deserialization layer**: 1:1 mapping to the JSON class catalog
//! - **Lookup layer**: hash- and name-indexed [`Schema`] shared through
//!   [`SchemaRegistry`]

mod field_type;
pub mod schema;


pub use field_type::FieldType;
pub use schema::{
    ClassDescriptor, FieldDescriptor, NOT_FOUND, Schema, SchemaError, SchemaRegistry,
    UNKNOWN_CLASS,
};
