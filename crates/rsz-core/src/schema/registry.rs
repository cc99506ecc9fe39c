//! Memoized schema loading.
//!
//! Catalogs are tens of megabytes; every container of a game shares one.
//! The registry parses each source once and hands out the same `Arc` on
//! every later load. Entries are never evicted.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use super::Schema;
use super::json::SchemaError;

/// Cache of loaded schemas keyed by source path.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    entries: Mutex<HashMap<PathBuf, Arc<Schema>>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared process-wide registry.
    pub fn global() -> &'static SchemaRegistry {
        static GLOBAL: OnceLock<SchemaRegistry> = OnceLock::new();
        GLOBAL.get_or_init(SchemaRegistry::new)
    }

    /// Load a schema, parsing it only on the first request for this path.
    ///
    /// The lock is held across the parse so that concurrent first loads of
    /// the same source produce a single schema.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Arc<Schema>, SchemaError> {
        let key = source_key(path.as_ref());
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(schema) = entries.get(&key) {
            return Ok(Arc::clone(schema));
        }

        tracing::debug!(path = %key.display(), "loading schema");
        let schema = Arc::new(Schema::from_path(&key)?);
        entries.insert(key, Arc::clone(&schema));
        Ok(schema)
    }

    /// Register an already built schema under a key.
    pub fn insert(&self, key: impl AsRef<Path>, schema: Schema) -> Arc<Schema> {
        let schema = Arc::new(schema);
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(source_key(key.as_ref()), Arc::clone(&schema));
        schema
    }

    /// Number of cached schemas.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn source_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
