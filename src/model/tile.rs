use serde::{Deserialize, Serialize};

use super::entity::Position;

/// Terrain classification for a single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Open,
    Blocked,
    Difficult,
    Water,
    Pit,
}

impl TileKind {
    /// Default movement cost for this terrain under the baseline rule module.
    /// Rule modules may override this via `movement.terrain_cost`.
    pub fn default_step_cost(self) -> u32 {
        match self {
            TileKind::Open | TileKind::Pit => 1,
            TileKind::Difficult | TileKind::Water => 2,
            TileKind::Blocked => u32::MAX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub kind: TileKind,
    pub blocks_movement: bool,
    pub blocks_vision: bool,
}

impl Tile {
    pub fn position(&self) -> Position {
        Position { x: self.x, y: self.y }
    }
}
