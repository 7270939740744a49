//! Character roster inputs
//!
//! The movement layer owns characters; the room only sees a per-frame
//! snapshot of position and activity, keyed by a stable id that doubles
//! as the occupancy bitset index.

use serde::{Deserialize, Serialize};

use quest_math::Vec2;

/// Stable character identifier, assigned externally at game start.
/// Also the index into every region's occupancy masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub usize);

/// One character's per-frame state as seen by the room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterInfo {
    pub id: CharacterId,
    pub position: Vec2,
    /// Inactive characters (not in the room) are treated as outside every
    /// region regardless of position.
    pub active: bool,
    pub is_player: bool,
}

impl CharacterInfo {
    pub fn new(id: CharacterId) -> Self {
        Self {
            id,
            position: Vec2::ZERO,
            active: true,
            is_player: false,
        }
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn as_player(mut self) -> Self {
        self.is_player = true;
        self
    }
}
