use std::path::PathBuf;

use rsz_core::SchemaRegistry;
use rsz_format::{Game, GameVersion};
use rsz_lib::RszOptions;

use super::error::Result;

/// Where the schema comes from and which game version files use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaSource {
    pub schema: PathBuf,
    pub game: String,
    pub tdb: Option<u32>,
}

impl SchemaSource {
    pub fn version(&self) -> Result<GameVersion> {
        let game: Game = self.game.parse()?;
        Ok(match self.tdb {
            Some(tdb) => GameVersion::new(game, tdb),
            None => GameVersion::latest(game),
        })
    }

    pub fn load(&self) -> Result<RszOptions> {
        let version = self.version()?;
        let schema = SchemaRegistry::global().load(&self.schema)?;
        tracing::info!(schema = %self.schema.display(), classes = schema.len(), %version, "schema loaded");
        Ok(RszOptions::new(schema, version))
    }
}
