//! The three fixed partitions of synchronized game state.
//!
//! The scope set is closed: a key only exists inside its scope, so a team
//! key can never collide with a player key. Adding a scope is a protocol
//! change, not a runtime event.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the three fixed partitions of synchronized game state.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataScope {
    /// State shared by every player on one team.
    #[serde(rename = "TeamData")]
    Team = 0,
    /// State scoped to a single player.
    #[serde(rename = "PlayerData")]
    Player = 1,
    /// State visible to the whole lobby.
    #[serde(rename = "GlobalData")]
    Global = 2,
}

/// Error returned when a wire string names no known scope.
///
/// This is the invalid-argument condition for the whole stack: a typed
/// [`DataScope`] can never be missing or garbage past this point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown data scope: {0:?}")]
pub struct UnknownScope(pub String);

impl DataScope {
    /// Every scope, in stable order. Handy for exhaustive iteration.
    pub const ALL: [Self; 3] = [Self::Team, Self::Player, Self::Global];

    /// The scope's name on the wire.
    ///
    /// These exact strings appear in the HUD-side event payloads; the
    /// authoritative side must use the same spelling.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Team => "TeamData",
            Self::Player => "PlayerData",
            Self::Global => "GlobalData",
        }
    }

    /// Stable index of the scope, for fixed-size table lookups.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DataScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for DataScope {
    type Err = UnknownScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TeamData" => Ok(Self::Team),
            "PlayerData" => Ok(Self::Player),
            "GlobalData" => Ok(Self::Global),
            other => Err(UnknownScope(other.to_string())),
        }
    }
}
