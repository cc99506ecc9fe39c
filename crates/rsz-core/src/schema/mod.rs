//! RSZ type schema.
//!
//! This module loads the JSON class catalog that describes every serializable
//! type of a game, and answers the lookups the rest of the engine needs to
//! interpret instance bytes.

mod binary;
mod json;
mod registry;
mod resolver;
mod types;

#[cfg(test)]
mod binary_tests;
#[cfg(test)]
mod registry_tests;

pub use json::SchemaError;
pub use registry::SchemaRegistry;
pub use resolver::{NOT_FOUND, Schema, UNKNOWN_CLASS};
pub use types::{ClassDescriptor, FieldDescriptor, element_type_name};
