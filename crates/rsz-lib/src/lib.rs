//! RSZ containers: read, edit and write user, prefab and scene files.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use rsz_core::Schema;
//! use rsz_format::{Game, GameVersion};
//! use rsz_lib::{ContainerFile, RszOptions, UserFile};
//!
//! let schema = Schema::from_json(r#"{ "1": { "name": "Foo", "fields": [{ "name": "hp", "type": "U32" }] } }"#)
//!     .expect("valid schema");
//! let options = RszOptions::new(Arc::new(schema), GameVersion::latest(Game::Re4));
//!
//! let mut file = UserFile::new(&options);
//! let foo = file.rsz.new_instance("Foo").expect("known class");
//! let id = file.rsz.add_instance(foo);
//! file.rsz.push_object(id).expect("valid id");
//!
//! let bytes = file.to_bytes().expect("writable");
//! let reread = UserFile::from_bytes(bytes, &options).expect("readable");
//! assert_eq!(reread.rsz.stringify(id), "Foo[1]\n  hp: 0");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod array;
mod document;
mod error;
pub mod file;
pub mod instance;
mod options;
pub mod rsz;
pub mod search;
pub mod value;

#[cfg(test)]
pub mod test_utils;


pub use array::DuplicateMode;
pub use document::Document;
pub use error::{EditError, Error, Result};
pub use file::{Container, ContainerFile, GameObjectSnapshot, GameObjectTarget, PfbFile, ScnFile, UserFile};
pub use instance::{ArrayElement, Instance, InstanceId, create_array_element};
pub use options::RszOptions;
pub use rsz::{Clipboard, Rsz, RszUserdata, UserdataPayload};
pub use search::{MatchMode, SearchQuery, Searcher, TextMatcher};
pub use value::Value;
