//! Team and its display color.

use serde::{Deserialize, Serialize};

/// Unique, stable identifier for a team. Synthetic fallback teams use ids <= 0.
pub type TeamId = i32;

/// RGB triple used by the renderer for a team's kit.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// A team in the roster. Immutable once loaded.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Penguin skin the renderer should draw for this team.
    pub skin_id: u32,
    pub color: Rgb,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>, skin_id: u32, color: Rgb) -> Self {
        Self {
            id,
            name: name.into(),
            skin_id,
            color,
        }
    }

    /// Stand-in for a player team id that the roster does not know.
    pub fn placeholder() -> Self {
        Self::new(0, "Default Player Team", 1, Rgb(200, 200, 200))
    }

    /// Stand-in opponent when the roster has nobody left to pick.
    pub fn placeholder_opponent() -> Self {
        Self::new(-1, "Default Opponent", 2, Rgb(100, 100, 100))
    }

    /// Asset path of this team's skin. The crate never loads it.
    pub fn skin_path(&self) -> String {
        format!("assets/skins/skin_{}.png", self.skin_id)
    }
}
