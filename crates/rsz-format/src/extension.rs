//! Games, type database versions and file extensions.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::FormatError;

/// Highest type database version whose RSZ blocks embed userdata inline.
pub const LAST_EMBEDDED_USERDATA_TDB: u32 = 67;

/// Titles with a known extension table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Game {
    Re2,
    Re3,
    Re4,
    Re7,
    Re8,
    Dmc5,
    MhRise,
    Sf6,
}

impl Game {
    pub const ALL: [Game; 8] = [
        Game::Re2,
        Game::Re3,
        Game::Re4,
        Game::Re7,
        Game::Re8,
        Game::Dmc5,
        Game::MhRise,
        Game::Sf6,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Game::Re2 => "re2",
            Game::Re3 => "re3",
            Game::Re4 => "re4",
            Game::Re7 => "re7",
            Game::Re8 => "re8",
            Game::Dmc5 => "dmc5",
            Game::MhRise => "mhrise",
            Game::Sf6 => "sf6",
        }
    }

    /// Type database version of the current release.
    pub fn default_tdb_version(self) -> u32 {
        match self {
            Game::Re2 | Game::Re3 | Game::Re7 => 70,
            Game::Re8 => 69,
            Game::Dmc5 => 67,
            Game::Re4 | Game::MhRise | Game::Sf6 => 71,
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Game {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Game::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| FormatError::UnknownGame(s.to_string()))
    }
}

/// A game together with the type database version its files were built with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GameVersion {
    pub game: Game,
    pub tdb_version: u32,
}

impl GameVersion {
    pub fn new(game: Game, tdb_version: u32) -> Self {
        Self { game, tdb_version }
    }

    /// Latest version of `game`.
    pub fn latest(game: Game) -> Self {
        Self::new(game, game.default_tdb_version())
    }

    /// Whether RSZ userdata is stored as nested blocks instead of paths.
    pub fn uses_embedded_userdata(self) -> bool {
        self.tdb_version <= LAST_EMBEDDED_USERDATA_TDB
    }

    /// Numeric extension suffix for a container kind, e.g. `".17"`.
    pub fn extension(self, kind: ContainerKind) -> &'static str {
        let tdb = self.tdb_version;
        match kind {
            ContainerKind::User => ".2",
            ContainerKind::Prefab => match self.game {
                Game::Re2 if tdb == 66 => ".16",
                Game::Re7 if tdb == 49 => ".16",
                Game::Dmc5 => ".16",
                _ => ".17",
            },
            ContainerKind::Scene => match self.game {
                Game::Re2 if tdb == 66 => ".19",
                Game::Re7 if tdb == 49 => ".18",
                Game::Dmc5 => ".19",
                _ => ".20",
            },
        }
    }

    /// Full file name for `stem` re-exported as `kind`, e.g. `foo.pfb.17`.
    pub fn file_name(self, stem: &str, kind: ContainerKind) -> String {
        format!("{stem}.{}{}", kind.as_str(), self.extension(kind))
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (tdb {})", self.game, self.tdb_version)
    }
}

/// On-disk container kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    User,
    Prefab,
    Scene,
}

impl ContainerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContainerKind::User => "user",
            ContainerKind::Prefab => "pfb",
            ContainerKind::Scene => "scn",
        }
    }

    /// Detect the kind from a file name such as `enemy.pfb.17`.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let name = path.as_ref().file_name()?.to_str()?.to_ascii_lowercase();
        name.split('.').skip(1).find_map(|part| match part {
            "user" => Some(ContainerKind::User),
            "pfb" => Some(ContainerKind::Prefab),
            "scn" => Some(ContainerKind::Scene),
            _ => None,
        })
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
