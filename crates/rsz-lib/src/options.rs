use std::sync::Arc;

use rsz_core::Schema;
use rsz_format::GameVersion;

/// Everything a container needs besides its bytes.
#[derive(Clone, Debug)]
pub struct RszOptions {
    pub schema: Arc<Schema>,
    pub version: GameVersion,
}

impl RszOptions {
    pub fn new(schema: Arc<Schema>, version: GameVersion) -> Self {
        Self { schema, version }
    }

    /// Whether RSZ userdata is stored as nested blocks.
    pub fn embedded_userdata(&self) -> bool {
        self.version.uses_embedded_userdata()
    }
}
