//! Error types.
//!
//! Two channels: [`Error`] aborts a read or write and propagates, while
//! [`EditError`] reports a rejected edit and leaves the graph untouched.

use std::path::{Path, PathBuf};

use rsz_core::SchemaError;
use rsz_format::{ContainerKind, FormatError};

/// Fatal error while reading or writing a container.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("unknown class hash {type_hash:#010x} for instance {index}")]
    UnknownClass { type_hash: u32, index: usize },

    #[error("schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid search pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("{class}.{field} cannot hold a {found} value")]
    FieldValue {
        class: String,
        field: String,
        found: &'static str,
    },

    #[error("cannot tell container kind from file name")]
    UnknownKind,

    #[error("document has no file path")]
    NoPath,

    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the offending file to an error.
    pub fn in_file(self, path: impl AsRef<Path>) -> Self {
        match self {
            Self::File { .. } => self,
            other => Self::File {
                path: path.as_ref().to_path_buf(),
                source: Box::new(other),
            },
        }
    }

    /// The error without any file context.
    pub fn root(&self) -> &Error {
        match self {
            Self::File { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type for container operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Edit rejected by a precondition check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("copied instance is {copied}, destination holds {expected}")]
    ClassMismatch { copied: String, expected: String },

    #[error("cannot resolve element class {0:?}")]
    UnresolvedClass(String),

    #[error("no instance {0}")]
    NoSuchInstance(u32),

    #[error("{class} has no field {index}")]
    NoSuchField { class: String, index: usize },

    #[error("field {0} is not an array")]
    NotAnArray(String),

    #[error("field {0} does not hold references")]
    NotAReference(String),

    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("field {field} of type {expected} cannot hold a {found} value")]
    TypeMismatch {
        field: String,
        expected: String,
        found: &'static str,
    },

    #[error("no game object at row {0}")]
    NoSuchGameObject(usize),

    #[error("no folder at row {0}")]
    NoSuchFolder(usize),

    #[error("game objects can only be edited in a scene, not a {0}")]
    NotAScene(ContainerKind),

    #[error("clipboard is empty")]
    EmptyClipboard,
}
